//! Display shell configuration (display.toml)
//!
//! Every field is optional; a missing file means the built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::display::{LogicalSize, DEFAULT_CLIENT_SIZE, FRAME_INTERVAL, WINDOW_TITLE};

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "display.toml";

/// Configuration loaded from display.toml
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window caption
    pub title: String,
    /// Initial client width in logical pixels
    pub client_width: u32,
    /// Initial client height in logical pixels
    pub client_height: u32,
    /// Delay between main loop presentation passes
    pub frame_interval_ms: u64,
    /// Log file name, created next to the executable
    pub log_file: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            client_width: DEFAULT_CLIENT_SIZE.width,
            client_height: DEFAULT_CLIENT_SIZE.height,
            frame_interval_ms: FRAME_INTERVAL.as_millis() as u64,
            log_file: "rtc.log".to_string(),
        }
    }
}

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Where the active configuration came from
#[derive(Debug)]
pub enum ConfigSource {
    /// No file found
    Defaults,
    File(PathBuf),
    /// A file was found but could not be used, so defaults apply
    Rejected(PathBuf, ConfigError),
}

impl DisplayConfig {
    /// Find display.toml in standard locations
    pub fn find_config_path() -> Option<PathBuf> {
        // Check in order: %APPDATA%/rtc, exe dir, cwd
        let candidates = [
            dirs::config_dir().map(|p| p.join("rtc").join(CONFIG_FILE_NAME)),
            std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE_NAME))),
            Some(PathBuf::from(CONFIG_FILE_NAME)),
        ];

        candidates.into_iter().flatten().find(|c| c.exists())
    }

    /// Load configuration, returning defaults if not found or unusable.
    ///
    /// The source is returned so the caller can log it once logging is up.
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(Self::find_config_path())
    }

    /// Load from `path` if there is one, falling back to defaults
    pub fn load_from(path: Option<PathBuf>) -> (Self, ConfigSource) {
        let Some(path) = path else {
            return (Self::default(), ConfigSource::Defaults);
        };
        match Self::load_from_path(&path) {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(e) => (Self::default(), ConfigSource::Rejected(path, e)),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: DisplayConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.client_width == 0 || self.client_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "client size must be non-zero, got {}x{}",
                self.client_width, self.client_height
            )));
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "frame_interval_ms must be non-zero".to_string(),
            ));
        }
        if self.log_file.trim().is_empty() {
            return Err(ConfigError::Invalid("log_file must not be empty".to_string()));
        }
        Ok(())
    }

    /// Initial client area size
    pub fn client_size(&self) -> LogicalSize {
        LogicalSize::new(self.client_width, self.client_height)
    }

    /// Main loop pacing interval
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_fixed_constants() {
        let config = DisplayConfig::default();
        assert_eq!(config.title, "The Ray Tracer Challenge");
        assert_eq!(config.client_size(), LogicalSize::new(800, 600));
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = DisplayConfig::from_toml("client_width = 1024\n").unwrap();
        assert_eq!(config.client_width, 1024);
        assert_eq!(config.client_height, 600);
        assert_eq!(config.title, WINDOW_TITLE);
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = DisplayConfig::from_toml("client_height = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = DisplayConfig::from_toml("frame_interval_ms = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = DisplayConfig::from_toml("client_width = \"wide\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title = \"Scratch\"").unwrap();
        writeln!(file, "frame_interval_ms = 33").unwrap();

        let config = DisplayConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.title, "Scratch");
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
    }

    #[test]
    fn test_load_from_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DisplayConfig::load_from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let (config, source) = DisplayConfig::load_from(None);
        assert_eq!(config, DisplayConfig::default());
        assert!(matches!(source, ConfigSource::Defaults));
    }

    #[test]
    fn test_load_rejected_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "client_width = 0").unwrap();

        let (config, source) = DisplayConfig::load_from(Some(file.path().to_path_buf()));

        assert_eq!(config, DisplayConfig::default());
        match source {
            ConfigSource::Rejected(path, ConfigError::Invalid(_)) => assert_eq!(path, file.path()),
            other => panic!("expected a rejected file, got {:?}", other),
        }
    }

    #[test]
    fn test_load_valid_file_reports_its_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "client_height = 720").unwrap();

        let (config, source) = DisplayConfig::load_from(Some(file.path().to_path_buf()));

        assert_eq!(config.client_size(), LogicalSize::new(800, 720));
        assert!(matches!(source, ConfigSource::File(path) if path == file.path()));
    }

    #[test]
    fn test_shipped_sample_parses_to_defaults() {
        let sample = include_str!("../display.toml");
        assert_eq!(DisplayConfig::from_toml(sample).unwrap(), DisplayConfig::default());
    }
}
