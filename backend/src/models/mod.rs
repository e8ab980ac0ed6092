//! Data shapes exchanged over HTTP.
//!
//! Public surface:
//! - Error / ErrorCode: error envelope and its stable codes.
//! - User / UserCreate: user record and its creation body.
//! - Country: enrichment attached to user responses.
//! - schema: field-level shape checks run before handlers.

pub mod country;
pub mod error;
pub mod schema;
pub mod user;

pub use self::country::Country;
pub use self::error::{Error, ErrorCode};
pub use self::user::{User, UserCreate};

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;
