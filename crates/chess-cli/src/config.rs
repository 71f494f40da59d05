//! Configuration file loading.
//!
//! Settings come from a TOML file, `chess.toml` in the working directory by
//! default. Every key is optional and a missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How the board is drawn.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Draw pieces as chess glyphs instead of FEN letters.
    #[serde(default)]
    pub unicode: bool,
    /// Label ranks and files.
    #[serde(default = "default_coordinates")]
    pub coordinates: bool,
    /// Draw the board from Black's side.
    #[serde(default)]
    pub flip: bool,
}

fn default_coordinates() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            unicode: false,
            coordinates: default_coordinates(),
            flip: false,
        }
    }
}

/// Top-level CLI configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// FEN of the position to start from instead of the standard one.
    #[serde(default)]
    pub start_fen: Option<String>,
    /// Maximum level of log events written to stderr.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            start_fen: None,
            log_level: default_log_level(),
            display: DisplayConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration from the given file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// The file read when no `--config` is given.
    pub fn config_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
start_fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1"
log_level = "debug"

[display]
unicode = true
coordinates = false
flip = true
"#;
        let config: CliConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(
            config.start_fen.as_deref(),
            Some("4k3/8/8/8/8/8/8/4K2R w K - 0 1")
        );
        assert_eq!(config.log_level, "debug");
        assert!(config.display.unicode);
        assert!(!config.display.coordinates);
        assert!(config.display.flip);
    }

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: CliConfig = toml::from_str("[display]\nflip = true\n").unwrap();
        assert_eq!(config.start_fen, None);
        assert_eq!(config.log_level, "warn");
        assert!(config.display.flip);
        assert!(config.display.coordinates);
        assert!(!config.display.unicode);

        let empty: CliConfig = toml::from_str("").unwrap();
        assert_eq!(empty, CliConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"trace\"").unwrap();

        let config = CliConfig::load_from(file.path()).unwrap();
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "log_level = [unterminated").unwrap();

        let err = CliConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("failed to parse config"));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(CliConfig::config_path(), PathBuf::from("chess.toml"));
    }
}
