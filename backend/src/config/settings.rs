use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_FROM_EMAIL: &str = "onboarding@resend.dev";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_ADDR {value:?} is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("FRONTEND_URL {0:?} must be an http(s) origin")]
    InvalidFrontendUrl(String),
}

/// Runtime settings, read once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// Allowed CORS origin. Any origin is allowed when unset.
    pub frontend_origin: Option<HeaderValue>,
    /// Where booking notifications go. Notifications are skipped when unset.
    pub notification_email: Option<String>,
    pub notification_from_email: String,
    pub sentry_dsn: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let bind_value = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr { value: bind_value.clone(), source })?;

        let frontend_origin = var("FRONTEND_URL").map(parse_origin).transpose()?;

        Ok(Settings {
            bind_addr,
            frontend_origin,
            notification_email: var("NOTIFICATION_EMAIL"),
            notification_from_email: var("NOTIFICATION_FROM_EMAIL")
                .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            sentry_dsn: var("SENTRY_DSN"),
        })
    }
}

fn parse_origin(url: String) -> Result<HeaderValue, ConfigError> {
    let origin = url.trim_end_matches('/');
    if !(origin.starts_with("http://") || origin.starts_with("https://")) {
        return Err(ConfigError::InvalidFrontendUrl(url));
    }
    HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidFrontendUrl(url.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = settings(&[]).unwrap();
        assert_eq!(settings.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(settings.frontend_origin, None);
        assert_eq!(settings.notification_email, None);
        assert_eq!(settings.notification_from_email, DEFAULT_FROM_EMAIL);
        assert_eq!(settings.sentry_dsn, None);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let settings = settings(&[("NOTIFICATION_EMAIL", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(settings.notification_email, None);
        assert_eq!(settings.sentry_dsn, None);
    }

    #[test]
    fn reads_configured_values() {
        let settings = settings(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("FRONTEND_URL", "https://process-easy.example/"),
            ("NOTIFICATION_EMAIL", "team@process-easy.example"),
            ("NOTIFICATION_FROM_EMAIL", "site@process-easy.example"),
        ])
        .unwrap();
        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(
            settings.frontend_origin,
            Some(HeaderValue::from_static("https://process-easy.example"))
        );
        assert_eq!(settings.notification_email.as_deref(), Some("team@process-easy.example"));
        assert_eq!(settings.notification_from_email, "site@process-easy.example");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            settings(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
        assert!(matches!(
            settings(&[("FRONTEND_URL", "process-easy.example")]),
            Err(ConfigError::InvalidFrontendUrl(_))
        ));
    }
}
