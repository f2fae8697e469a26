//! Functional options over `LogConfig`.
//!
//! Each constructor captures its arguments and returns a `ConfigOption` that
//! applies one change. Options never fail and can be applied any number of
//! times. Setters always assign, so applying the same option twice gives the
//! same result as applying it once.

use std::borrow::Borrow;
use std::cell::RefCell;
use std::fmt;

use axum::Router;

use crate::config::schema::{LevelEncoder, LogConfig};
use crate::level::{level_routes, Level};

/// A single, reusable configuration change.
pub struct ConfigOption<'a> {
    apply: Box<dyn Fn(&mut LogConfig) + 'a>,
}

impl<'a> ConfigOption<'a> {
    /// Wrap a closure as an option.
    pub fn new(apply: impl Fn(&mut LogConfig) + 'a) -> Self {
        Self {
            apply: Box::new(apply),
        }
    }

    pub fn apply(&self, config: &mut LogConfig) {
        (self.apply)(config)
    }
}

impl fmt::Debug for ConfigOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOption").finish_non_exhaustive()
    }
}

/// Set the encoder name, e.g. "json" or "console".
pub fn encoding<'a>(name: impl Into<String>) -> ConfigOption<'a> {
    let name = name.into();
    ConfigOption::new(move |c| c.encoding.clone_from(&name))
}

pub fn disable_stacktrace<'a>() -> ConfigOption<'a> {
    ConfigOption::new(|c| c.disable_stacktrace = true)
}

/// Replace the whole sink list.
pub fn output_paths<'a, I, P>(paths: I) -> ConfigOption<'a>
where
    I: IntoIterator<Item = P>,
    P: Into<String>,
{
    let paths: Vec<String> = paths.into_iter().map(Into::into).collect();
    ConfigOption::new(move |c| c.output_paths.clone_from(&paths))
}

/// Set the threshold through the live cell.
pub fn level<'a>(level: Level) -> ConfigOption<'a> {
    ConfigOption::new(move |c| c.level.set_level(level))
}

pub fn disable_caller<'a>() -> ConfigOption<'a> {
    ConfigOption::new(|c| c.disable_caller = true)
}

/// Drop the timestamp from records by clearing its key.
pub fn disable_timestamp<'a>() -> ConfigOption<'a> {
    ConfigOption::new(|c| c.encoder.time_key.clear())
}

pub fn level_encoder<'a>(encoder: LevelEncoder) -> ConfigOption<'a> {
    ConfigOption::new(move |c| c.encoder.level_encoder = encoder)
}

/// Mount the configuration's level cell on `router` at `path`.
///
/// The route shares the cell with the configuration and every logger built
/// from it. Attaching at two paths gives two views of the same cell.
///
/// # Panics
///
/// Applying this option twice mounts `path` twice, which the router rejects
/// with a panic.
pub fn attach_level_handler<'a, S>(router: &'a mut Router<S>, path: &'a str) -> ConfigOption<'a>
where
    S: Clone + Send + Sync + 'static,
{
    let router = RefCell::new(router);
    ConfigOption::new(move |c| {
        let mut guard = router.borrow_mut();
        let router: &mut Router<S> = &mut guard;
        *router = std::mem::take(router).route(path, level_routes(c.level.clone()));
        tracing::debug!(%path, level = %c.level.level(), "Level handler attached");
    })
}

/// Apply `options` to `base` in order and return the result.
///
/// Accepts owned options or borrowed ones, so a prepared list can be applied
/// to several bases.
pub fn config<'a, I, O>(mut base: LogConfig, options: I) -> LogConfig
where
    I: IntoIterator<Item = O>,
    O: Borrow<ConfigOption<'a>>,
{
    for option in options {
        option.borrow().apply(&mut base);
    }
    base
}
