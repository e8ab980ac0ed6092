//! Field-level shape declarations for request bodies.
//!
//! Each request type lists its fields with the JSON kind it accepts. A raw
//! JSON body is checked against that list before it is deserialised, so a
//! client receives every violation at once instead of the first serde error.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Location prefix used for body violations.
pub const BODY_LOC: &str = "body";

/// JSON kind accepted by a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// A JSON integer that fits a signed 64-bit integer. Numeric strings and
    /// floats such as `7.0` are rejected, not coerced.
    Integer,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64(),
        }
    }

    fn violation_code(self) -> &'static str {
        match self {
            Self::String => "string_type",
            Self::Integer => "int_type",
        }
    }

    fn violation_message(self) -> &'static str {
        match self {
            Self::String => "Input should be a valid string",
            Self::Integer => "Input should be a valid integer",
        }
    }
}

/// One declared field of a request shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    name: &'static str,
    kind: FieldKind,
    required: bool,
}

impl Field {
    /// Declare a field that must be present and non-null.
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    /// Declare a field that may be absent or `null`.
    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    /// Field name as it appears on the wire.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    fn check(&self, object: &Map<String, Value>) -> Option<Violation> {
        match object.get(self.name) {
            None | Some(Value::Null) if self.required => Some(Violation::at_field(
                self.name,
                "missing",
                "Field required",
            )),
            None | Some(Value::Null) => None,
            Some(value) if self.kind.accepts(value) => None,
            Some(_) => Some(Violation::at_field(
                self.name,
                self.kind.violation_code(),
                self.kind.violation_message(),
            )),
        }
    }
}

/// A request shape with declared field constraints.
///
/// # Examples
/// ```
/// use serde::Deserialize;
/// use users_api::models::schema::{Field, FieldKind, Schema};
///
/// #[derive(Deserialize)]
/// struct Rename {
///     first_name: String,
/// }
///
/// impl Schema for Rename {
///     const FIELDS: &'static [Field] = &[Field::required("first_name", FieldKind::String)];
/// }
/// ```
pub trait Schema: DeserializeOwned {
    /// Declared fields, in the order violations are reported.
    const FIELDS: &'static [Field];
}

/// A single shape violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Path to the offending value, e.g. `["body", "email"]`.
    pub loc: Vec<String>,
    /// Stable machine-readable violation code.
    pub code: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl Violation {
    /// Build a violation at an arbitrary location.
    pub fn new(loc: Vec<String>, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            loc,
            code,
            message: message.into(),
        }
    }

    fn at_field(field: &str, code: &'static str, message: &str) -> Self {
        Self::new(vec![BODY_LOC.to_owned(), field.to_owned()], code, message)
    }
}

/// Failure to turn a JSON body into a typed request shape.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The body broke one or more declared field constraints.
    #[error("request body failed validation with {} violation(s)", .0.len())]
    Invalid(Vec<Violation>),
    /// The body passed the shape check but could not be deserialised.
    #[error("request body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SchemaError {
    /// Violations to report to the client.
    pub fn violations(&self) -> Vec<Violation> {
        match self {
            Self::Invalid(violations) => violations.clone(),
            Self::Decode(err) => vec![Violation::new(
                vec![BODY_LOC.to_owned()],
                "value_error",
                err.to_string(),
            )],
        }
    }
}

/// Collect every violation of `fields` in `value`.
pub fn check(fields: &[Field], value: &Value) -> Vec<Violation> {
    let Some(object) = value.as_object() else {
        return vec![Violation::new(
            vec![BODY_LOC.to_owned()],
            "model_type",
            "Input should be a valid dictionary or object",
        )];
    };
    fields.iter().filter_map(|field| field.check(object)).collect()
}

/// Check `value` against `T`'s declared fields and deserialise it.
///
/// # Errors
/// Returns [`SchemaError::Invalid`] listing every violation, or
/// [`SchemaError::Decode`] when deserialisation still fails.
pub fn validate<T: Schema>(value: Value) -> Result<T, SchemaError> {
    let violations = check(T::FIELDS, &value);
    if !violations.is_empty() {
        return Err(SchemaError::Invalid(violations));
    }
    Ok(serde_json::from_value(value)?)
}
