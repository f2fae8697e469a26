//! Logger construction.
//!
//! # Data Flow
//! ```text
//! LogConfig
//!     → validate_config (every problem reported at once)
//!     → sinks.rs (open stdout/stderr/files)
//!     → format.rs (time key, encoded level, then console or json body)
//!     → stacktrace.rs (backtraces on severe records)
//!     → per-layer level filter reading the shared AtomicLevel
//!     → Logger (tracing Dispatch + level handle)
//! ```
//!
//! # Design Decisions
//! - The filter reads the cell on every event, so level changes apply at once
//! - Spans always pass the filter so span fields survive threshold changes
//! - Construction errors are returned; `must` turns them fatal at startup

pub mod format;
pub mod sinks;
pub mod stacktrace;

use thiserror::Error;
use tracing::{Dispatch, Metadata};
use tracing_subscriber::filter::{dynamic_filter_fn, DynFilterFn};
use tracing_subscriber::fmt::format::JsonFields;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{fmt, Layer, Registry};

use crate::config::loader::join_errors;
use crate::config::schema::{LogConfig, JSON_ENCODING};
use crate::config::validation::{validate_config, ValidationError};
use crate::level::AtomicLevel;

pub use format::EncodedFormat;
pub use sinks::Sinks;
pub use stacktrace::StacktraceLayer;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Errors that can occur while building a logger.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    #[error("cannot open output {path:?}: {source}")]
    OpenSink {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("a global logger is already installed")]
    AlreadyInstalled(#[from] tracing::dispatcher::SetGlobalDefaultError),
}

/// A constructed logger.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    level: AtomicLevel,
}

impl Logger {
    /// The live threshold shared with the configuration it was built from.
    pub fn level(&self) -> &AtomicLevel {
        &self.level
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `f` with this logger as the thread's default.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Make this logger the process-wide default. Works once per process.
    pub fn install(&self) -> Result<(), BuildError> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())?;
        Ok(())
    }
}

impl LogConfig {
    /// Build a logger from this configuration.
    pub fn build(&self) -> Result<Logger, BuildError> {
        validate_config(self).map_err(BuildError::Invalid)?;

        let sinks = Sinks::open(&self.output_paths)?;

        let mut layers: Vec<BoxedLayer> = vec![format_layer(self, sinks.clone())
            .with_filter(level_filter(self.level.clone()))
            .boxed()];

        if !self.disable_stacktrace {
            layers.push(
                StacktraceLayer::new(sinks.clone(), self.stacktrace_level())
                    .with_filter(level_filter(self.level.clone()))
                    .boxed(),
            );
        }

        let subscriber = Registry::default().with(layers);

        tracing::debug!(
            encoding = %self.encoding,
            outputs = sinks.len(),
            level = %self.level.level(),
            "Logger built"
        );

        Ok(Logger {
            dispatch: Dispatch::new(subscriber),
            level: self.level.clone(),
        })
    }
}

fn format_layer(config: &LogConfig, sinks: Sinks) -> BoxedLayer {
    let with_caller = !config.disable_caller;
    let encoder = &config.encoder;
    let layer = fmt::layer()
        .with_writer(sinks)
        .with_ansi(encoder.level_encoder.uses_color());
    let body = fmt::format()
        .without_time()
        .with_level(false)
        .with_target(true)
        .with_file(with_caller)
        .with_line_number(with_caller);

    if config.encoding == JSON_ENCODING {
        layer
            .fmt_fields(JsonFields::new())
            .event_format(EncodedFormat::json(
                body.json(),
                encoder.level_encoder,
                encoder.time_key.as_str(),
            ))
            .boxed()
    } else {
        layer
            .event_format(EncodedFormat::console(
                body,
                encoder.level_encoder,
                encoder.time_key.as_str(),
            ))
            .boxed()
    }
}

/// Event filter backed by the live cell. Spans are always enabled.
///
/// A dynamic filter keeps callsite interest at "sometimes", so the cell is
/// consulted for every event instead of once per callsite.
fn level_filter(
    level: AtomicLevel,
) -> DynFilterFn<Registry, impl Fn(&Metadata<'_>, &Context<'_, Registry>) -> bool> {
    dynamic_filter_fn(move |meta, _cx| meta.is_span() || level.enabled_tracing(meta.level()))
}
