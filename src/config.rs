//! Runtime settings, read from the environment (and a `.env` file if present).

use url::Url;

use crate::error::ConfigError;
use crate::eventbrite::URL;

pub const API_KEY_VAR: &str = "EVENTBRITE_API_KEY";
pub const ORG_ID_VAR: &str = "EVENTBRITE_ORG_ID";
pub const BASE_URL_VAR: &str = "EVENTBRITE_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: Url,
    pub api_key: String,
    pub org_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let base_url = get(BASE_URL_VAR).unwrap_or_else(|| URL.to_string());
        let base_url = Url::parse(&base_url).map_err(|err| ConfigError::InvalidUrl {
            var: BASE_URL_VAR,
            message: err.to_string(),
        })?;

        Ok(Config {
            base_url,
            api_key,
            org_id: get(ORG_ID_VAR),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_base_url() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "secret")])).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url.as_str(), "https://www.eventbriteapi.com/v3");
        assert_eq!(config.org_id, None);
    }

    #[test]
    fn reads_all_vars() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, " secret "),
            (ORG_ID_VAR, "2650046659981"),
            (BASE_URL_VAR, "http://127.0.0.1:8080/v3"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.org_id.as_deref(), Some("2650046659981"));
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/v3");
    }

    #[test]
    fn missing_or_blank_key_is_an_error() {
        assert_eq!(
            Config::from_lookup(lookup(&[])),
            Err(ConfigError::Missing(API_KEY_VAR))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[(API_KEY_VAR, "  ")])),
            Err(ConfigError::Missing(API_KEY_VAR))
        );
    }

    #[test]
    fn bad_base_url_is_an_error() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "k"), (BASE_URL_VAR, "nope")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { var: BASE_URL_VAR, .. }));
    }
}
