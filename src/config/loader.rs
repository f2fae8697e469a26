//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LogConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
///
/// Fields left out keep their development-preset values.
pub fn parse_config(content: &str) -> Result<LogConfig, ConfigError> {
    let config: LogConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), encoding = %config.encoding, "Log configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LevelEncoder;
    use crate::level::Level;

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
            level = "warn"
            encoding = "json"
            output_paths = ["stdout", "/tmp/app.log"]

            [encoder]
            time_key = ""
            level_encoder = "capital_color"
            "#,
        )
        .unwrap();

        assert_eq!(config.level.level(), Level::Warn);
        assert_eq!(config.encoding, "json");
        assert_eq!(config.output_paths, vec!["stdout", "/tmp/app.log"]);
        assert!(config.encoder.time_key.is_empty());
        assert_eq!(config.encoder.level_encoder, LevelEncoder::CapitalColor);
        // Untouched fields fall back to the development preset.
        assert!(config.development);
        assert!(!config.disable_caller);
    }

    #[test]
    fn test_parse_rejects_unknown_level() {
        let err = parse_config(r#"level = "chatty""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_runs_validation() {
        let err = parse_config(r#"encoding = "logfmt""#).unwrap_err();
        match err {
            ConfigError::Validation(errors) => {
                assert_eq!(errors, vec![ValidationError::UnknownEncoding("logfmt".into())]);
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
