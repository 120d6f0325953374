use lazy_static::lazy_static;
use std::env;
use std::time::Duration;
use thiserror::Error;

lazy_static! {
    pub static ref IS_DEV: bool = {
        env::var("RUST_ENV").unwrap_or("development".into()) == "development"
    };
}

const DEFAULT_SAVE_COOLDOWN_MS: u64 = 1100;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("unknown STORAGE_BACKEND {0:?} (expected \"mongodb\" or \"memory\")")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    MongoDb(MongoConfig),
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub save_cooldown: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let port_raw = var_or("PORT", "8080");
        let port = port_raw.parse().map_err(|_| ConfigError::InvalidNumber {
            name: "PORT",
            value: port_raw.clone(),
        })?;

        let cooldown_raw = var_or("SAVE_COOLDOWN_MS", &DEFAULT_SAVE_COOLDOWN_MS.to_string());
        let cooldown_ms: u64 = cooldown_raw.parse().map_err(|_| ConfigError::InvalidNumber {
            name: "SAVE_COOLDOWN_MS",
            value: cooldown_raw.clone(),
        })?;

        let storage = match var_or("STORAGE_BACKEND", "mongodb").to_lowercase().as_str() {
            "mongodb" | "mongo" => StorageBackend::MongoDb(MongoConfig {
                uri: var_or("MONGODB_URI", "mongodb://localhost:27017"),
                database: var_or("MONGODB_DATABASE", "insights_blog"),
            }),
            "memory" => StorageBackend::Memory,
            other => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self {
            host: var_or("HOST", "127.0.0.1"),
            port,
            storage,
            save_cooldown: Duration::from_millis(cooldown_ms),
        })
    }
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
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.save_cooldown, Duration::from_millis(1100));
        assert_eq!(
            config.storage,
            StorageBackend::MongoDb(MongoConfig {
                uri: "mongodb://localhost:27017".into(),
                database: "insights_blog".into(),
            })
        );
    }

    #[test]
    fn test_memory_backend() {
        let config = AppConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "Memory")])).unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { name: "PORT", .. }));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "sqlite")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBackend(_)));
    }
}
