use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Hospital Records";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DB_PATH_ENV: &str = "HOSPITAL_DB_PATH";
pub const BIND_ADDR_ENV: &str = "HOSPITAL_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {var} value {value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup. Unset or
    /// blank variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let database_path = get(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let bind_raw = get(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                var: BIND_ADDR_ENV,
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            database_path,
            bind_addr,
        })
    }
}

/// Get the application data directory.
/// ~/HospitalRecords/, or ./HospitalRecords when no home directory is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("HospitalRecords")
}

pub fn default_database_path() -> PathBuf {
    app_data_dir().join("hospital.db")
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "hospital_records_lib=info,hospital_records=info,tower_http=warn"
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
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.database_path, default_database_path());
    }

    #[test]
    fn overrides_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "/tmp/ward.db"),
            (BIND_ADDR_ENV, "0.0.0.0:8080"),
        ]))
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/ward.db"));
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[(BIND_ADDR_ENV, "  ")])).unwrap();
        assert_eq!(config.bind_addr.port(), 5000);
    }

    #[test]
    fn invalid_bind_addr_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[(BIND_ADDR_ENV, "not-an-addr")])).unwrap_err();
        assert!(err.to_string().contains(BIND_ADDR_ENV));
    }

    #[test]
    fn database_lives_under_app_data() {
        let path = default_database_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with("hospital.db"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
