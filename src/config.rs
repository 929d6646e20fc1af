//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::ErrorPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub cities: CitiesConfig,

    #[serde(default)]
    pub errors: ErrorPolicy,

    #[serde(default)]
    pub trend: TrendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Prediction backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// City selector configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CitiesConfig {
    /// City selected after loading, when present in the directory
    #[serde(default = "default_preferred_city")]
    pub preferred: String,

    /// Cities offered when the directory cannot be loaded
    #[serde(default = "default_fallback_cities")]
    pub fallback: Vec<String>,

    /// Text of the leading placeholder option
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_preferred_city() -> String {
    "Ahmedabad".to_string()
}

fn default_fallback_cities() -> Vec<String> {
    [
        "Ahmedabad",
        "Bengaluru",
        "Chennai",
        "Delhi",
        "Hyderabad",
        "Kolkata",
        "Mumbai",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn default_placeholder() -> String {
    "Select a city".to_string()
}

impl Default for CitiesConfig {
    fn default() -> Self {
        Self {
            preferred: default_preferred_city(),
            fallback: default_fallback_cities(),
            placeholder: default_placeholder(),
        }
    }
}

/// Trend chart configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendConfig {
    /// Show `YYYY-MM-DD` labels as `MM/DD`
    #[serde(default)]
    pub short_dates: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Whether logs should be emitted as JSON lines
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let discovery = Self::discover(&Self::default_paths());
        discovery.report();
        discovery.config
    }

    /// Standard config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("aqi-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/aqi-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Search `paths` for the first file that loads
    ///
    /// Files that exist but fail to load are collected instead of logged,
    /// so callers can report them once logging is set up.
    pub fn discover(paths: &[PathBuf]) -> ConfigDiscovery {
        let mut rejected = Vec::new();

        for path in paths {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        return ConfigDiscovery {
                            config,
                            source: Some(path.clone()),
                            rejected,
                        }
                    }
                    Err(e) => rejected.push(e),
                }
            }
        }

        ConfigDiscovery {
            config: Self::from_env(),
            source: None,
            rejected,
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("AQI_DASHBOARD_BASE_URL") {
            self.api.base_url = url;
        }

        if let Ok(level) = std::env::var("AQI_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("AQI_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Result of searching the standard config locations
#[derive(Debug)]
pub struct ConfigDiscovery {
    pub config: Config,
    /// File the config was loaded from; `None` means defaults
    pub source: Option<PathBuf>,
    /// Files that exist but could not be loaded
    pub rejected: Vec<ConfigError>,
}

impl ConfigDiscovery {
    /// Log where the config came from and every file that was skipped
    pub fn report(&self) {
        for error in &self.rejected {
            tracing::warn!("Skipping config: {}", error);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# AQI Dashboard Configuration
#
# Environment variables override these settings:
# - AQI_DASHBOARD_BASE_URL
# - AQI_DASHBOARD_LOG_LEVEL
# - AQI_DASHBOARD_LOG_FORMAT

[api]
# Prediction backend serving /cities, /predict and /history
base_url = "http://127.0.0.1:8000"

[cities]
# Selected after loading when the directory contains it
preferred = "Ahmedabad"

# Offered when the city directory cannot be loaded
fallback = ["Ahmedabad", "Bengaluru", "Chennai", "Delhi", "Hyderabad", "Kolkata", "Mumbai"]

# Leading placeholder option
placeholder = "Select a city"

[errors]
# How each backend failure is surfaced: "alert" (shown to the user) or "log"
cities = "log"
prediction = "alert"
history = "log"

[trend]
# Show YYYY-MM-DD dates as MM/DD on the trend chart
short_dates = false

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::FailureVisibility;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.cities.preferred, "Ahmedabad");
        assert_eq!(config.cities.fallback.len(), 7);
        assert_eq!(config.errors.prediction, FailureVisibility::Alert);
        assert_eq!(config.errors.history, FailureVisibility::LogOnly);
        assert!(!config.trend.short_dates);
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.api.base_url, defaults.api.base_url);
        assert_eq!(config.cities.fallback, defaults.cities.fallback);
        assert_eq!(config.cities.placeholder, defaults.cities.placeholder);
        assert_eq!(config.errors, defaults.errors);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://aqi.internal:9000\"\n\n[errors]\nhistory = \"alert\""
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://aqi.internal:9000");
        assert_eq!(config.errors.history, FailureVisibility::Alert);
        assert_eq!(config.errors.prediction, FailureVisibility::Alert);
        assert_eq!(config.cities.preferred, "Ahmedabad");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[errors]\nhistory = \"shout\"").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/aqi-dashboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_discover_skips_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[errors]\nhistory = \"shout\"\n").unwrap();
        let valid = dir.path().join("config.toml");
        std::fs::write(&valid, "[trend]\nshort_dates = true\n").unwrap();

        let discovery = Config::discover(&[broken.clone(), valid.clone()]);
        assert_eq!(discovery.source, Some(valid));
        assert!(discovery.config.trend.short_dates);
        assert_eq!(discovery.rejected.len(), 1);
        assert!(matches!(
            &discovery.rejected[0],
            ConfigError::Parse { path, .. } if *path == broken
        ));
    }

    #[test]
    fn test_discover_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        std::fs::write(&broken, "[errors]\nhistory = \"shout\"\n").unwrap();
        let missing = dir.path().join("absent.toml");

        let discovery = Config::discover(&[missing, broken]);
        assert_eq!(discovery.source, None);
        assert_eq!(discovery.rejected.len(), 1);
        assert_eq!(discovery.config.errors, ErrorPolicy::default());
    }

    #[test]
    fn test_json_format() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            format: "JSON".to_string(),
        };
        assert!(logging.is_json());
        assert!(!LoggingConfig::default().is_json());
    }
}
