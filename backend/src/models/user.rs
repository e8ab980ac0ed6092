//! User data shapes.
//!
//! [`User`] is the full record including the store-assigned identifier.
//! [`UserCreate`] is the creation shape without it. Neither carries rules
//! beyond field types; see [`Schema`] for how those are checked.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::schema::{Field, FieldKind, Schema};

/// Application user record.
///
/// `id` is assigned by a backing store and is optional on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "+44 20 7946 0000")]
    pub phone_number: String,
    #[schema(example = "United Kingdom")]
    pub residence_country: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl Schema for User {
    const FIELDS: &'static [Field] = &[
        Field::optional("id", FieldKind::Integer),
        Field::required("first_name", FieldKind::String),
        Field::required("last_name", FieldKind::String),
        Field::required("phone_number", FieldKind::String),
        Field::required("residence_country", FieldKind::String),
        Field::required("email", FieldKind::String),
    ];
}

/// Body accepted when creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserCreate {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "+44 20 7946 0000")]
    pub phone_number: String,
    #[schema(example = "United Kingdom")]
    pub residence_country: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl Schema for UserCreate {
    const FIELDS: &'static [Field] = &[
        Field::required("first_name", FieldKind::String),
        Field::required("last_name", FieldKind::String),
        Field::required("phone_number", FieldKind::String),
        Field::required("residence_country", FieldKind::String),
        Field::required("email", FieldKind::String),
    ];
}

impl From<UserCreate> for User {
    fn from(value: UserCreate) -> Self {
        let UserCreate {
            first_name,
            last_name,
            phone_number,
            residence_country,
            email,
        } = value;
        Self {
            id: None,
            first_name,
            last_name,
            phone_number,
            residence_country,
            email,
        }
    }
}
