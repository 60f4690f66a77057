use crate::auth::jwt::JwtConfig;

/// Error raised when an environment variable is missing or malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// Defaults suit local development; production overrides via env.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for in-flight requests on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Inbox that receives a copy of every contact form submission.
    /// Notifications are off when unset.
    pub contact_notify_email: Option<String>,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `CONTACT_NOTIFY_EMAIL`  | unset                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_var("PORT", 3000u16)?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", 30u64)?;
        let shutdown_timeout_secs = parse_var("SHUTDOWN_TIMEOUT_SECS", 30u64)?;

        let contact_notify_email = std::env::var("CONTACT_NOTIFY_EMAIL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let jwt = JwtConfig::from_env()?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            contact_notify_email,
            jwt,
        })
    }
}

/// Read `var` and parse it, falling back to `default` when unset.
pub(crate) fn parse_var<T: std::str::FromStr>(
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_var_uses_default_when_unset() {
        let port = parse_var("VITRINE_TEST_UNSET_PORT", 8080u16).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn config_error_messages() {
        let err = ConfigError::Invalid {
            var: "PORT",
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "PORT has invalid value 'abc'");
        assert_eq!(
            ConfigError::Missing("JWT_SECRET").to_string(),
            "JWT_SECRET must be set"
        );
    }

    #[test]
    fn parse_var_rejects_malformed_value() {
        std::env::set_var("VITRINE_TEST_BAD_TIMEOUT", "soon");
        let result = parse_var("VITRINE_TEST_BAD_TIMEOUT", 30u64);
        assert_matches!(
            result,
            Err(ConfigError::Invalid { var: "VITRINE_TEST_BAD_TIMEOUT", ref value }) if value == "soon"
        );
    }
}
