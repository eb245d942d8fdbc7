//! Runtime configuration, resolved once at startup from the process
//! environment. Every numeric setting must parse; a process never starts
//! serving with an unvalidated configuration.

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be a base-10 port number, got '{value}'")]
    InvalidPort { field: &'static str, value: String },
    #[error("{field} must be a non-negative integer number of seconds, got '{value}'")]
    InvalidTtl { field: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub redis_host: String,
    pub redis_port: u16,
    /// Opaque credential passed to the store on connect. Empty means no AUTH.
    pub redis_password: String,
    pub default_ttl_secs: u64,
    pub http_port: u16,
}

impl RuntimeConfig {
    const DEFAULT_REDIS_HOST: &'static str = "redis";
    const DEFAULT_REDIS_PORT: u16 = 6379;
    const DEFAULT_TTL_SECS: u64 = 300;
    const DEFAULT_HTTP_PORT: u16 = 8080;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    /// Unset or empty variables fall back to the built-in defaults.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let redis_port = match get(&lookup, "REDIS_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                field: "REDIS_PORT",
                value: raw,
            })?,
            None => Self::DEFAULT_REDIS_PORT,
        };

        let http_port = match get(&lookup, "HTTP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                field: "HTTP_PORT",
                value: raw,
            })?,
            None => Self::DEFAULT_HTTP_PORT,
        };

        let default_ttl_secs = match get(&lookup, "CACHE_TTL") {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidTtl {
                field: "CACHE_TTL",
                value: raw,
            })?,
            None => Self::DEFAULT_TTL_SECS,
        };

        Ok(Self {
            redis_host: get(&lookup, "REDIS_HOST")
                .unwrap_or_else(|| Self::DEFAULT_REDIS_HOST.to_string()),
            redis_port,
            redis_password: get(&lookup, "REDIS_PASSWORD").unwrap_or_default(),
            default_ttl_secs,
            http_port,
        })
    }
}

fn get(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve_with(vars: &[(&str, &str)]) -> Result<RuntimeConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::resolve(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = resolve_with(&[]).unwrap();

        assert_eq!(config.redis_host, "redis");
        assert_eq!(config.redis_port, 6379);
        assert_eq!(config.redis_password, "");
        assert_eq!(config.default_ttl_secs, 300);
        assert_eq!(config.http_port, 8080);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = resolve_with(&[
            ("REDIS_HOST", "cache.internal"),
            ("REDIS_PORT", "6380"),
            ("REDIS_PASSWORD", "s3cret"),
            ("CACHE_TTL", "60"),
            ("HTTP_PORT", "9090"),
        ])
        .unwrap();

        assert_eq!(config.redis_host, "cache.internal");
        assert_eq!(config.redis_port, 6380);
        assert_eq!(config.redis_password, "s3cret");
        assert_eq!(config.default_ttl_secs, 60);
        assert_eq!(config.http_port, 9090);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = resolve_with(&[("REDIS_HOST", ""), ("CACHE_TTL", "")]).unwrap();

        assert_eq!(config.redis_host, "redis");
        assert_eq!(config.default_ttl_secs, 300);
    }

    #[test]
    fn invalid_port_is_rejected_naming_the_field() {
        let err = resolve_with(&[("REDIS_PORT", "not-a-port")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPort {
                field: "REDIS_PORT",
                value: "not-a-port".to_string(),
            }
        );

        let err = resolve_with(&[("HTTP_PORT", "70000")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { field: "HTTP_PORT", .. }));
    }

    #[test]
    fn invalid_ttl_is_rejected() {
        let err = resolve_with(&[("CACHE_TTL", "five minutes")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidTtl {
                field: "CACHE_TTL",
                value: "five minutes".to_string(),
            }
        );

        let err = resolve_with(&[("CACHE_TTL", "-1")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTtl { field: "CACHE_TTL", .. }));
    }
}
