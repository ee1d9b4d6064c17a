//! Client configuration from the environment.
//!
//! | Variable                    | Default               |
//! |-----------------------------|-----------------------|
//! | `REMA_API_BASE_URL`         | `http://localhost:8080` |
//! | `REMA_TOKEN_PATH`           | `.rema/session.json`  |
//! | `REMA_TOKEN_TTL_DAYS`       | `7`                   |
//! | `REMA_REQUEST_TIMEOUT_SECS` | `10`                  |
//! | `REMA_LANDING_ROUTE`        | `/`                   |
//! | `REMA_LOGIN_ROUTE`          | `/login`              |
//! | `REMA_FALLBACK_ROUTE`       | `/`                   |
//!
//! With `ENVIRONMENT` unset or `development`, a `.env` file is loaded first.

use crate::session::SessionRoutes;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub token_path: PathBuf,
    pub token_ttl: chrono::Duration,
    pub request_timeout: Duration,
    pub routes: SessionRoutes,
    /// Where the route guard sends denied navigations.
    pub fallback_route: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_owned(),
            token_path: PathBuf::from(".rema/session.json"),
            token_ttl: chrono::Duration::days(7),
            request_timeout: Duration::from_secs(10),
            routes: SessionRoutes::default(),
            fallback_route: "/".to_owned(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_owned());
        if environment == "development" {
            dotenv::dotenv().ok();
        }
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(base_url = %config.api_base_url, %environment, "Configuration loaded");
        Ok(config)
    }

    /// Builds the configuration from any key lookup, falling back to the
    /// defaults for missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        let ttl_days: i64 = parse(&lookup, "REMA_TOKEN_TTL_DAYS", 7)?;
        let token_ttl = token_ttl(ttl_days)?;
        let timeout_secs: u64 = parse(&lookup, "REMA_REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            api_base_url: text("REMA_API_BASE_URL", defaults.api_base_url),
            token_path: lookup("REMA_TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_path),
            token_ttl,
            request_timeout: Duration::from_secs(timeout_secs),
            routes: SessionRoutes {
                landing: text("REMA_LANDING_ROUTE", defaults.routes.landing),
                login: text("REMA_LOGIN_ROUTE", defaults.routes.login),
            },
            fallback_route: text("REMA_FALLBACK_ROUTE", defaults.fallback_route),
        })
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// A positive number of days that still yields a representable expiry.
fn token_ttl(days: i64) -> Result<chrono::Duration, ConfigError> {
    chrono::Duration::try_days(days)
        .filter(|ttl| *ttl > chrono::Duration::zero())
        .filter(|ttl| chrono::Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| ConfigError::Invalid {
            key: "REMA_TOKEN_TTL_DAYS",
            value: days.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.routes.login, "/login");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("REMA_API_BASE_URL", "https://api.rema.test"),
            ("REMA_TOKEN_TTL_DAYS", "1"),
            ("REMA_REQUEST_TIMEOUT_SECS", " 30 "),
            ("REMA_LOGIN_ROUTE", "/entrar"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.rema.test");
        assert_eq!(config.token_ttl, chrono::Duration::days(1));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.routes.login, "/entrar");
        assert_eq!(config.routes.landing, "/");
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(&[("REMA_TOKEN_TTL_DAYS", "a week")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "REMA_TOKEN_TTL_DAYS",
                value: "a week".into()
            }
        );
    }

    #[test]
    fn test_token_ttl_out_of_range() {
        for days in ["0", "-3", "1000000000", "200000000000000"] {
            let err = ClientConfig::from_lookup(lookup(&[("REMA_TOKEN_TTL_DAYS", days)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    key: "REMA_TOKEN_TTL_DAYS",
                    value: days.into()
                }
            );
        }
    }
}
