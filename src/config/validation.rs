//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject encodings the logger builder cannot produce
//! - Reject blank sink entries
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LogConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::{LogConfig, KNOWN_ENCODINGS};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown encoding {0:?} (expected one of: console, json)")]
    UnknownEncoding(String),

    #[error("output path #{0} is empty")]
    EmptyOutputPath(usize),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !KNOWN_ENCODINGS.contains(&config.encoding.as_str()) {
        errors.push(ValidationError::UnknownEncoding(config.encoding.clone()));
    }

    for (i, path) in config.output_paths.iter().enumerate() {
        if path.trim().is_empty() {
            errors.push(ValidationError::EmptyOutputPath(i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
