//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::User;

use super::types::{EngineConfig, OvertimeConfig, PayrollConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── overtime.yaml   # Daily overtime cap
/// ├── payroll.yaml    # Pro-rate days and maximum paid time per day
/// └── users.yaml      # Optional seed for the in-memory user directory
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// assert_eq!(loader.config().days_per_month_prorate(), 22);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct UserSeed {
    #[serde(default)]
    users: Vec<User>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails with `ConfigNotFound` when a file is missing, `ConfigParseError`
    /// when a file holds invalid YAML, and `ConfigInvalid` when a value is
    /// not strictly positive.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let overtime = Self::load_yaml::<OvertimeConfig>(&path.join("overtime.yaml"))?;
        let payroll = Self::load_yaml::<PayrollConfig>(&path.join("payroll.yaml"))?;

        let config = EngineConfig::new(overtime, payroll)?;

        let users_path = path.join("users.yaml");
        let users = if users_path.exists() {
            Self::load_yaml::<UserSeed>(&users_path)?.users
        } else {
            Vec::new()
        };

        Ok(Self { config, users })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Users seeded from `users.yaml`, empty when the file is absent.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Consumes the loader, returning the configuration and the user seed.
    pub fn into_parts(self) -> (EngineConfig, Vec<User>) {
        (self.config, self.users)
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "payroll-engine-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let config = loader.config();
        assert_eq!(config.daily_overtime_cap_millis(), 10_800_000);
        assert_eq!(config.days_per_month_prorate(), 22);
        assert_eq!(config.max_working_millis_per_day(), 28_800_000);
    }

    #[test]
    fn test_shipped_configuration_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.into_config(), EngineConfig::default());
    }

    #[test]
    fn test_shipped_user_seed() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let users = loader.users();
        assert!(users.iter().any(|u| u.role == crate::models::Role::Admin));
        assert!(users
            .iter()
            .filter(|u| u.is_employee())
            .all(|u| u.monthly_salary.is_some()));
    }

    #[test]
    fn test_user_seed_is_optional() {
        let dir = scratch_dir("no-users");
        fs::write(dir.join("overtime.yaml"), "max_duration_per_day_millis: 10800000\n").unwrap();
        fs::write(
            dir.join("payroll.yaml"),
            "days_per_month_prorate: 22\nmax_working_millis_per_day: 28800000\n",
        )
        .unwrap();

        let (config, users) = ConfigLoader::load(&dir).unwrap().into_parts();
        assert_eq!(config, EngineConfig::default());
        assert!(users.is_empty());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("./config/does_not_exist");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.ends_with("overtime.yaml"), "path was {}", path);
            }
            other => panic!("expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("bad-yaml");
        fs::write(dir.join("overtime.yaml"), "max_duration_per_day_millis: [oops").unwrap();
        fs::write(
            dir.join("payroll.yaml"),
            "days_per_month_prorate: 22\nmax_working_millis_per_day: 28800000\n",
        )
        .unwrap();

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_load_non_positive_value_returns_invalid() {
        let dir = scratch_dir("zero-cap");
        fs::write(dir.join("overtime.yaml"), "max_duration_per_day_millis: 0\n").unwrap();
        fs::write(
            dir.join("payroll.yaml"),
            "days_per_month_prorate: 22\nmax_working_millis_per_day: 28800000\n",
        )
        .unwrap();

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::ConfigInvalid { .. })));
    }
}
