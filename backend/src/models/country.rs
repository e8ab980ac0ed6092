//! Country enrichment shape.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const PLACEHOLDER_NAME: &str = "Example Country";
const PLACEHOLDER_CODE: &str = "EX";

/// Country details attached to user responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Country {
    #[schema(example = "Example Country")]
    pub country_name: String,
    #[schema(example = "EX")]
    pub country_code: String,
    /// Free-text notes; omitted when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl Country {
    /// Fixed enrichment value returned until a real lookup exists.
    ///
    /// # Examples
    /// ```
    /// use users_api::models::Country;
    ///
    /// let country = Country::placeholder();
    /// assert_eq!(country.country_code, "EX");
    /// ```
    pub fn placeholder() -> Self {
        Self {
            country_name: PLACEHOLDER_NAME.to_owned(),
            country_code: PLACEHOLDER_CODE.to_owned(),
            additional_info: None,
        }
    }
}
