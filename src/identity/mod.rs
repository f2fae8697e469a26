//! Per-process instance identity.
//!
//! # Responsibilities
//! - Report the machine hostname as the `instance` field
//! - Fall back to a generated label when the hostname is unavailable
//!
//! # Design Decisions
//! - The hostname is looked up on every call; only the fallback generator is cached
//! - Lookup failures are absorbed here and never reach the caller

pub mod fancy;

use std::ffi::OsString;
use std::fmt;
use std::io;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub use fancy::{fancy_id, FancyIdGenerator};

/// Field key used for the identity.
pub const INSTANCE_KEY: &str = "instance";

/// The `instance` field attached to records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceId {
    value: String,
}

impl InstanceId {
    pub fn key(&self) -> &'static str {
        INSTANCE_KEY
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Span that tags every record emitted inside it with `instance=<value>`.
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!("instance", instance = %self.value)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Serialize for InstanceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(INSTANCE_KEY, &self.value)?;
        map.end()
    }
}

/// Identity of the current process: the hostname, or a generated label.
pub fn instance_id() -> InstanceId {
    instance_id_with(hostname::get)
}

/// Like [`instance_id`] with a caller-supplied hostname lookup.
pub fn instance_id_with<F>(lookup: F) -> InstanceId
where
    F: FnOnce() -> io::Result<OsString>,
{
    let value = match lookup() {
        Ok(name) => match name.into_string() {
            Ok(name) => name,
            Err(raw) => {
                tracing::debug!(hostname = ?raw, "Hostname is not valid UTF-8, using generated instance id");
                fancy_id()
            }
        },
        Err(e) => {
            tracing::debug!(error = %e, "Hostname lookup failed, using generated instance id");
            fancy_id()
        }
    };
    InstanceId { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_is_used_verbatim() {
        let id = instance_id_with(|| Ok(OsString::from("web-01.internal")));
        assert_eq!(id.key(), "instance");
        assert_eq!(id.value(), "web-01.internal");
        assert_eq!(id.to_string(), "web-01.internal");
    }

    #[test]
    fn test_lookup_failure_falls_back() {
        let id = instance_id_with(|| Err(io::Error::new(io::ErrorKind::Other, "no hostname")));
        let parts: Vec<&str> = id.value().split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(fancy::ADJECTIVES.contains(&parts[0]));
        assert!(fancy::NOUNS.contains(&parts[1]));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_hostname_falls_back() {
        use std::os::unix::ffi::OsStringExt;
        let id = instance_id_with(|| Ok(OsString::from_vec(vec![0xff, 0xfe])));
        assert_eq!(id.value().split('-').count(), 3);
    }

    #[test]
    fn test_serializes_as_single_field() {
        let id = instance_id_with(|| Ok(OsString::from("box")));
        assert_eq!(serde_json::to_string(&id).unwrap(), r#"{"instance":"box"}"#);
    }
}
