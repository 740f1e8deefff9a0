use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Mongo,
}

/// Service configuration, read from `MFLIX_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: String,
    pub store: StoreKind,
    pub mongodb_uri: String,
    pub database: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidStore(String),
    Empty(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidStore(s) => {
                write!(f, "MFLIX_STORE must be 'memory' or 'mongodb', got {s:?}")
            }
            ConfigError::Empty(var) => write!(f, "{var} must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &'static str, default: &str| -> Result<String, ConfigError> {
            match lookup(key) {
                Some(v) if v.trim().is_empty() => Err(ConfigError::Empty(key)),
                Some(v) => Ok(v),
                None => Ok(default.to_string()),
            }
        };

        let store = match var("MFLIX_STORE", "memory")?.to_ascii_lowercase().as_str() {
            "memory" => StoreKind::Memory,
            "mongodb" | "mongo" => StoreKind::Mongo,
            other => return Err(ConfigError::InvalidStore(other.to_string())),
        };

        Ok(Self {
            addr: var("MFLIX_API_ADDR", "0.0.0.0:3000")?,
            store,
            mongodb_uri: var("MFLIX_MONGODB_URI", "mongodb://127.0.0.1:27017")?,
            database: var("MFLIX_DATABASE", "sample_mflix")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.addr, "0.0.0.0:3000");
        assert_eq!(c.store, StoreKind::Memory);
        assert_eq!(c.mongodb_uri, "mongodb://127.0.0.1:27017");
        assert_eq!(c.database, "sample_mflix");
    }

    #[test]
    fn overrides() {
        let c = config(&[
            ("MFLIX_STORE", "MongoDB"),
            ("MFLIX_DATABASE", "mflix_test"),
            ("MFLIX_API_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();
        assert_eq!(c.store, StoreKind::Mongo);
        assert_eq!(c.database, "mflix_test");
        assert_eq!(c.addr, "127.0.0.1:8080");
    }

    #[test]
    fn rejects_unknown_store() {
        assert_eq!(
            config(&[("MFLIX_STORE", "redis")]).unwrap_err(),
            ConfigError::InvalidStore("redis".into())
        );
    }

    #[test]
    fn rejects_empty_values() {
        assert_eq!(
            config(&[("MFLIX_DATABASE", " ")]).unwrap_err(),
            ConfigError::Empty("MFLIX_DATABASE")
        );
    }
}
