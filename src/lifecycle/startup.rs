//! Startup helpers.
//!
//! # Design Decisions
//! - Fail fast: a logger that cannot be built at startup is fatal
//! - Fatal means the whole process, from any thread or task
//! - Only meant for startup call sites, never for request handling

use std::fmt::Display;
use std::panic::Location;

/// Unwrap a construction result or abort the process with the error.
///
/// ```
/// let logger = logkit::must(logkit::template("dev").build());
/// logger.in_scope(|| tracing::info!("ready"));
/// ```
#[track_caller]
pub fn must<T, E: Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            let caller = Location::caller();
            tracing::error!(error = %e, %caller, "Logger construction failed");
            eprintln!("logger construction failed: {e} (at {caller})");
            std::process::abort()
        }
    }
}
