//! Logger configuration subsystem.
//!
//! # Data Flow
//! ```text
//! environment name
//!     → template.rs (pick preset, apply fixed overrides)
//!     → options.rs (caller's ConfigOptions, left to right)
//!     → LogConfig
//!     → LogConfig::build (logger module)
//!
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LogConfig
//! ```
//!
//! # Design Decisions
//! - Configuration happens once at startup, on one thread
//! - All fields have defaults to allow minimal configs
//! - Only the level cell is shared; everything else is plain data

pub mod loader;
pub mod options;
pub mod schema;
pub mod template;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use options::{
    attach_level_handler, config, disable_caller, disable_stacktrace, disable_timestamp, encoding,
    level, level_encoder, output_paths, ConfigOption,
};
pub use schema::{EncoderConfig, LevelEncoder, LogConfig};
pub use template::template;
pub use validation::{validate_config, ValidationError};
