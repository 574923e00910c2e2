use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Sampling knobs sent with every generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.8,
            top_p: 0.9,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub generation: GenerationSettings,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source. A missing API key
    /// is an error; every other value has a default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|key| lookup(*key))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let api_base = lookup("GEMINI_API_BASE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let defaults = GenerationSettings::default();
        let generation = GenerationSettings {
            model: lookup("GEMINI_MODEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.model),
            temperature: parse_or(&lookup, "GEMINI_TEMPERATURE", defaults.temperature)?,
            top_p: parse_or(&lookup, "GEMINI_TOP_P", defaults.top_p)?,
        };

        Ok(Self {
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            generation,
            port: parse_or(&lookup, "PORT", 8080)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.generation, GenerationSettings::default());
        assert_eq!(config.generation.model, "gemini-2.5-flash");
        assert_eq!(config.generation.temperature, 0.8);
        assert_eq!(config.generation.top_p, 0.9);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn api_key_falls_back_to_legacy_name() {
        let config = Config::from_lookup(lookup_from(&[("API_KEY", "legacy")])).unwrap();
        assert_eq!(config.api_key, "legacy");
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_API_BASE", "http://127.0.0.1:9000/"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_TEMPERATURE", "0.3"),
            ("PORT", "3000"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:9000");
        assert_eq!(config.generation.model, "gemini-2.0-flash");
        assert_eq!(config.generation.temperature, 0.3);
        assert_eq!(config.generation.top_p, 0.9);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn malformed_number_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "k"), ("PORT", "http")]))
            .unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, "PORT");
                assert_eq!(value, "http");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
