//! Output sinks.
//!
//! Each output path turns into one sink. A record is written to every sink
//! in configuration order.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::BuildError;

#[derive(Debug, Clone)]
enum Sink {
    Stdout,
    Stderr,
    File(Arc<File>),
}

impl Sink {
    fn open(path: &str) -> Result<Self, BuildError> {
        match path {
            "stdout" => Ok(Sink::Stdout),
            "stderr" => Ok(Sink::Stderr),
            _ => OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map(|f| Sink::File(Arc::new(f)))
                .map_err(|source| BuildError::OpenSink {
                    path: path.to_string(),
                    source,
                }),
        }
    }

    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().lock().write_all(buf),
            Sink::Stderr => io::stderr().lock().write_all(buf),
            Sink::File(f) => (&**f).write_all(buf),
        }
    }

    fn flush(&self) -> io::Result<()> {
        match self {
            Sink::Stdout => io::stdout().flush(),
            Sink::Stderr => io::stderr().flush(),
            Sink::File(f) => (&**f).flush(),
        }
    }
}

/// The full set of sinks for one logger. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Sinks {
    sinks: Arc<Vec<Sink>>,
}

impl Sinks {
    /// Open every path. Fails on the first path that cannot be opened.
    pub fn open<P: AsRef<str>>(paths: &[P]) -> Result<Self, BuildError> {
        let sinks = paths
            .iter()
            .map(|p| Sink::open(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            sinks: Arc::new(sinks),
        })
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

/// Writer handed out per record.
pub struct SinksWriter<'a> {
    sinks: &'a [Sink],
}

impl Write for SinksWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all(buf)?;
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        // Keep going after a failed sink so one bad target does not starve the rest.
        let mut first_err = None;
        for sink in self.sinks {
            if let Err(e) = sink.write_all(buf) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Sinks {
    type Writer = SinksWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinksWriter {
            sinks: self.sinks.as_slice(),
        }
    }
}
