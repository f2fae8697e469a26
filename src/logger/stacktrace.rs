//! Backtraces for severe records.

use std::backtrace::Backtrace;
use std::io::Write;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer};

use crate::level::Level;
use crate::logger::sinks::Sinks;

/// Writes a captured backtrace after every event at or above `threshold`.
///
/// Must be layered after the formatter so the trace follows its record.
pub struct StacktraceLayer {
    sinks: Sinks,
    threshold: Level,
}

impl StacktraceLayer {
    pub fn new(sinks: Sinks, threshold: Level) -> Self {
        Self { sinks, threshold }
    }
}

impl<S: Subscriber> Layer<S> for StacktraceLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if Level::from(event.metadata().level()) < self.threshold {
            return;
        }
        let trace = Backtrace::force_capture();
        let _ = writeln!(self.sinks.make_writer(), "stacktrace:\n{trace}");
    }
}
