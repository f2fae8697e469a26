//! Helpers around `tracing-subscriber` logger setup.
//!
//! - functional options over a logger configuration
//! - environment presets ("templates")
//! - an HTTP endpoint for reading and changing the level at runtime
//! - an instance identifier with a generated fallback
//!
//! ```no_run
//! use axum::Router;
//! use logkit::{config, level, must, template, attach_level_handler, Level};
//!
//! let mut router: Router = Router::new();
//! let cfg = config(
//!     template("production"),
//!     vec![level(Level::Warn), attach_level_handler(&mut router, "/log/level")],
//! );
//! let logger = must(cfg.build());
//! must(logger.install());
//!
//! let _guard = logkit::instance_id().span().entered();
//! tracing::warn!("tagged with the instance id");
//! ```

pub mod config;
pub mod identity;
pub mod level;
pub mod lifecycle;
pub mod logger;

pub use config::{
    attach_level_handler, config, disable_caller, disable_stacktrace, disable_timestamp, encoding,
    level, level_encoder, output_paths, template, ConfigOption, LevelEncoder, LogConfig,
};
pub use identity::{instance_id, InstanceId};
pub use level::{AtomicLevel, Level};
pub use lifecycle::must;
pub use logger::{BuildError, Logger};
