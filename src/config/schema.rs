//! Configuration schema definitions.
//!
//! `LogConfig` describes how a logger is built: encoder choice, sinks,
//! threshold and the caller/stacktrace/timestamp toggles. All types derive
//! Serde traits so a configuration can also come from a file.

use serde::{Deserialize, Serialize};

use crate::level::{AtomicLevel, Level};

/// Encoding that renders human-readable lines.
pub const CONSOLE_ENCODING: &str = "console";

/// Encoding that renders one JSON object per record.
pub const JSON_ENCODING: &str = "json";

/// Encodings the logger builder understands.
pub const KNOWN_ENCODINGS: [&str; 2] = [CONSOLE_ENCODING, JSON_ENCODING];

/// Root logger configuration.
///
/// Cloning shares the level cell, so `level` stays live across copies.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Live minimum severity.
    pub level: AtomicLevel,

    /// Development mode lowers the stacktrace threshold to warn.
    pub development: bool,

    /// Skip file/line annotations.
    pub disable_caller: bool,

    /// Skip backtraces on error-level records.
    pub disable_stacktrace: bool,

    /// Encoder name ("console" or "json").
    pub encoding: String,

    /// Field-level encoder settings.
    pub encoder: EncoderConfig,

    /// Sinks: "stdout", "stderr" or a file path. Order is preserved.
    pub output_paths: Vec<String>,
}

impl LogConfig {
    /// Moderate defaults: info, JSON, stacktraces from error up.
    pub fn production() -> Self {
        Self {
            level: AtomicLevel::new(Level::Info),
            development: false,
            disable_caller: false,
            disable_stacktrace: false,
            encoding: JSON_ENCODING.to_string(),
            encoder: EncoderConfig {
                time_key: "ts".to_string(),
                level_encoder: LevelEncoder::Lowercase,
            },
            output_paths: vec!["stderr".to_string()],
        }
    }

    /// Verbose, human-friendly defaults: debug, console, stacktraces from warn up.
    pub fn development() -> Self {
        Self {
            level: AtomicLevel::new(Level::Debug),
            development: true,
            disable_caller: false,
            disable_stacktrace: false,
            encoding: CONSOLE_ENCODING.to_string(),
            encoder: EncoderConfig {
                time_key: "T".to_string(),
                level_encoder: LevelEncoder::Capital,
            },
            output_paths: vec!["stderr".to_string()],
        }
    }

    /// Lowest level that gets a backtrace attached.
    pub fn stacktrace_level(&self) -> Level {
        if self.development {
            Level::Warn
        } else {
            Level::Error
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::development()
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Key of the timestamp field in JSON records. Console lines carry no
    /// keys, so there only emptiness matters. Empty means no timestamp.
    pub time_key: String,

    /// How severity is rendered.
    pub level_encoder: LevelEncoder,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        LogConfig::development().encoder
    }
}

/// Rendering of the severity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelEncoder {
    /// Lower-case text, e.g. `info`.
    Lowercase,
    /// Lower-case text wrapped in ANSI colour codes.
    LowercaseColor,
    /// Upper-case text, e.g. `INFO`.
    Capital,
    /// Upper-case text wrapped in ANSI colour codes.
    CapitalColor,
}

const ANSI_RESET: &str = "\x1b[0m";

impl LevelEncoder {
    pub fn uses_color(&self) -> bool {
        matches!(self, LevelEncoder::LowercaseColor | LevelEncoder::CapitalColor)
    }

    /// The same casing without colour.
    pub fn plain(&self) -> LevelEncoder {
        match self {
            LevelEncoder::Lowercase | LevelEncoder::LowercaseColor => LevelEncoder::Lowercase,
            LevelEncoder::Capital | LevelEncoder::CapitalColor => LevelEncoder::Capital,
        }
    }

    /// Render `level` as this encoder would write it.
    pub fn encode(&self, level: Level) -> String {
        let text = match self.plain() {
            LevelEncoder::Capital => level.as_str().to_ascii_uppercase(),
            _ => level.as_str().to_string(),
        };
        if self.uses_color() {
            format!("\x1b[{}m{}{}", color_code(level), text, ANSI_RESET)
        } else {
            text
        }
    }
}

fn color_code(level: Level) -> u8 {
    match level {
        Level::Debug => 35,
        Level::Info => 34,
        Level::Warn => 33,
        Level::Error | Level::Fatal => 31,
    }
}
