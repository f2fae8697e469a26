//! Record layout on top of tracing-subscriber's formatters.
//!
//! The inner formatter renders spans, target, caller and fields with its own
//! timestamp and level turned off. `EncodedFormat` puts those two in front,
//! using the configured time key and level encoder.

use std::fmt::{self, Write as _};

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

use crate::config::schema::LevelEncoder;
use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Console,
    Json,
}

/// Event formatter that owns the timestamp and level of each record.
#[derive(Debug, Clone)]
pub struct EncodedFormat<F> {
    inner: F,
    shape: Shape,
    level_encoder: LevelEncoder,
    time_key: String,
}

impl<F> EncodedFormat<F> {
    /// `ts LEVEL <inner line>`. Only emptiness of `time_key` matters here.
    pub fn console(inner: F, level_encoder: LevelEncoder, time_key: impl Into<String>) -> Self {
        Self {
            inner,
            shape: Shape::Console,
            level_encoder,
            time_key: time_key.into(),
        }
    }

    /// `{"<time_key>":..,"level":..,<inner object>}`. Colour never reaches
    /// JSON; the level text keeps only the encoder's casing.
    pub fn json(inner: F, level_encoder: LevelEncoder, time_key: impl Into<String>) -> Self {
        Self {
            inner,
            shape: Shape::Json,
            level_encoder,
            time_key: time_key.into(),
        }
    }

    fn timestamps(&self) -> bool {
        !self.time_key.is_empty()
    }
}

impl<S, N, F> FormatEvent<S, N> for EncodedFormat<F>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    F: FormatEvent<S, N>,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let level = Level::from(event.metadata().level());

        match self.shape {
            Shape::Console => {
                if self.timestamps() {
                    SystemTime.format_time(&mut writer)?;
                    writer.write_char(' ')?;
                }
                write!(writer, "{} ", self.level_encoder.encode(level))?;
                self.inner.format_event(ctx, writer, event)
            }
            Shape::Json => {
                let mut body = String::new();
                self.inner.format_event(ctx, Writer::new(&mut body), event)?;
                let rest = body.strip_prefix('{').ok_or(fmt::Error)?;

                writer.write_char('{')?;
                if self.timestamps() {
                    let mut ts = String::new();
                    SystemTime.format_time(&mut Writer::new(&mut ts))?;
                    write_entry(&mut writer, &self.time_key, &ts)?;
                    writer.write_char(',')?;
                }
                write_entry(&mut writer, "level", &self.level_encoder.plain().encode(level))?;
                if !rest.starts_with('}') {
                    writer.write_char(',')?;
                }
                writer.write_str(rest)
            }
        }
    }
}

fn write_entry(writer: &mut Writer<'_>, key: &str, value: &str) -> fmt::Result {
    let key = serde_json::to_string(key).map_err(|_| fmt::Error)?;
    let value = serde_json::to_string(value).map_err(|_| fmt::Error)?;
    write!(writer, "{}:{}", key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::format::JsonFields;
    use tracing_subscriber::fmt::{self as tfmt, MakeWriter};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_console_line_starts_with_encoded_level() {
        let buf = Buffer::default();
        let inner = tfmt::format().without_time().with_level(false);
        let layer = tfmt::layer()
            .with_writer(buf.clone())
            .with_ansi(false)
            .event_format(EncodedFormat::console(inner, LevelEncoder::Lowercase, ""));
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || tracing::warn!("careful"));

        let text = buf.text();
        assert!(text.starts_with("warn "), "line: {:?}", text);
        assert!(text.contains("careful"));
        assert!(!text.contains("WARN"));
    }

    #[test]
    fn test_json_uses_time_key_and_plain_level() {
        let buf = Buffer::default();
        let inner = tfmt::format().json().without_time().with_level(false);
        let layer = tfmt::layer()
            .with_writer(buf.clone())
            .fmt_fields(JsonFields::new())
            .event_format(EncodedFormat::json(inner, LevelEncoder::CapitalColor, "when"));
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || tracing::error!(code = 7, "broke"));

        let record: serde_json::Value = serde_json::from_str(buf.text().trim()).unwrap();
        assert_eq!(record["level"], "ERROR");
        assert!(record["when"].is_string());
        assert!(record.get("timestamp").is_none());
        assert_eq!(record["fields"]["code"], 7);
    }
}
