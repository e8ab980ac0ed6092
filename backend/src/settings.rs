//! Service settings loaded via OrthoConfig.
//!
//! Sources, highest precedence first: CLI flags, `USERS_API_*` environment
//! variables, an optional configuration file, then the defaults below.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LEGACY_ROUTES: bool = true;
const DEFAULT_DOCS: bool = true;

/// Settings controlling how the HTTP server binds and which routes it exposes.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_API")]
pub struct AppSettings {
    /// Host or address to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// Also serve single-user routes on the slash-less `/users{user_id}` pattern.
    pub legacy_routes: Option<bool>,
    /// Serve Swagger UI at `/docs` and the OpenAPI document at `/openapi.json`.
    pub docs: Option<bool>,
}

impl AppSettings {
    /// Return the configured host, falling back to the default.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to the default.
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Whether the slash-less legacy user routes are served; on unless disabled.
    pub fn legacy_routes(&self) -> bool {
        self.legacy_routes.unwrap_or(DEFAULT_LEGACY_ROUTES)
    }

    /// Whether the API docs are served; on unless disabled.
    pub fn docs(&self) -> bool {
        self.docs.unwrap_or(DEFAULT_DOCS)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("users-api")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("USERS_API_HOST", None::<String>),
            ("USERS_API_PORT", None::<String>),
            ("USERS_API_LEGACY_ROUTES", None::<String>),
            ("USERS_API_DOCS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert!(settings.legacy_routes());
        assert!(settings.docs());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USERS_API_HOST", Some("127.0.0.1".to_owned())),
            ("USERS_API_PORT", Some("9090".to_owned())),
            ("USERS_API_LEGACY_ROUTES", Some("false".to_owned())),
            ("USERS_API_DOCS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), "127.0.0.1");
        assert_eq!(settings.port(), 9090);
        assert!(!settings.legacy_routes());
        assert!(!settings.docs());
    }
}
