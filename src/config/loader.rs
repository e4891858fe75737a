//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading break rule
//! and scheduler configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{CaliforniaConfig, EngineConfig, NewYorkConfig, SchedulerConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/breaks/
/// ├── scheduler.yaml   # Clock-in window, break spacing, alert display time
/// ├── california.yaml  # California meal/rest thresholds and durations
/// └── new_york.yaml    # New York meal/rest thresholds and durations
/// ```
///
/// # Example
///
/// ```no_run
/// use break_compliance::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/breaks").unwrap();
/// println!("Shift window: {}h", loader.scheduler().shift_window_hours);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns `ConfigNotFound` if any file is missing and
    /// `ConfigParseError` if a file is not valid YAML or holds a value the
    /// rules cannot work with (a zero rest interval, shift window or break
    /// spacing).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let scheduler_path = path.join("scheduler.yaml");
        let scheduler = Self::load_yaml::<SchedulerConfig>(&scheduler_path)?;
        let california_path = path.join("california.yaml");
        let california = Self::load_yaml::<CaliforniaConfig>(&california_path)?;
        let new_york_path = path.join("new_york.yaml");
        let new_york = Self::load_yaml::<NewYorkConfig>(&new_york_path)?;

        let positive_fields = [
            (&california_path, "rest_break_interval_hours", california.rest_break_interval_hours),
            (&new_york_path, "rest_break_interval_hours", new_york.rest_break_interval_hours),
            (&scheduler_path, "shift_window_hours", scheduler.shift_window_hours),
            (&scheduler_path, "break_spacing_hours", scheduler.break_spacing_hours),
        ];
        for (file, field, value) in positive_fields {
            Self::require_positive(file, field, value)?;
        }

        debug!(path = %path.display(), "Loaded break configuration");

        Ok(Self {
            config: EngineConfig::new(scheduler, california, new_york),
        })
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

    fn require_positive(path: &Path, field: &str, value: u32) -> EngineResult<()> {
        if value == 0 {
            return Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("{} must be greater than zero", field),
            });
        }
        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader and returns the engine configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }

    /// Returns the clock-in scheduler settings.
    pub fn scheduler(&self) -> &SchedulerConfig {
        self.config.scheduler()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/breaks"
    }

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("break-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_shipped_configuration_matches_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.config(), &EngineConfig::default());
    }

    #[test]
    fn test_scheduler_values_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.scheduler().shift_window_hours, 8);
        assert_eq!(loader.scheduler().break_spacing_hours, 2);
        assert_eq!(loader.scheduler().alert_display_seconds, 10);
    }

    #[test]
    fn test_region_values_loaded_correctly() {
        let config = ConfigLoader::load(config_path()).unwrap().into_config();
        assert_eq!(config.california().second_meal_break_threshold_hours, 10);
        assert_eq!(config.california().rest_break_duration_minutes, 10);
        assert_eq!(config.new_york().meal_break_threshold_hours, 6);
        assert_eq!(config.new_york().rest_break_duration_minutes, 15);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("scheduler.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = scratch_dir();
        fs::write(dir.join("scheduler.yaml"), "shift_window_hours: 12\n").unwrap();
        fs::write(dir.join("california.yaml"), "rest_break_duration_minutes: 12\n").unwrap();
        fs::write(dir.join("new_york.yaml"), "{}\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.scheduler().shift_window_hours, 12);
        assert_eq!(loader.scheduler().break_spacing_hours, 2);
        assert_eq!(loader.config().california().rest_break_duration_minutes, 12);
        assert_eq!(loader.config().california().meal_break_threshold_hours, 5);
        assert_eq!(loader.config().new_york(), &NewYorkConfig::default());

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir();
        fs::write(dir.join("scheduler.yaml"), "shift_window_hours: [not, a, number]\n").unwrap();
        fs::write(dir.join("california.yaml"), "{}\n").unwrap();
        fs::write(dir.join("new_york.yaml"), "{}\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("scheduler.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_zero_rest_interval_is_rejected() {
        let dir = scratch_dir();
        fs::write(dir.join("scheduler.yaml"), "{}\n").unwrap();
        fs::write(dir.join("california.yaml"), "{}\n").unwrap();
        fs::write(dir.join("new_york.yaml"), "rest_break_interval_hours: 0\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("new_york.yaml"));
                assert!(message.contains("rest_break_interval_hours"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_zero_break_spacing_is_rejected() {
        let dir = scratch_dir();
        fs::write(dir.join("scheduler.yaml"), "break_spacing_hours: 0\n").unwrap();
        fs::write(dir.join("california.yaml"), "{}\n").unwrap();
        fs::write(dir.join("new_york.yaml"), "{}\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("scheduler.yaml"));
                assert!(message.contains("break_spacing_hours"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_zero_shift_window_is_rejected() {
        let dir = scratch_dir();
        fs::write(dir.join("scheduler.yaml"), "shift_window_hours: 0\n").unwrap();
        fs::write(dir.join("california.yaml"), "{}\n").unwrap();
        fs::write(dir.join("new_york.yaml"), "{}\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { message, .. }) => {
                assert!(message.contains("shift_window_hours"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }
}
