//! Severity levels and the live level cell.
//!
//! # Data Flow
//! ```text
//! LogConfig.level (AtomicLevel)
//!     → logger filter (read on every event)
//!     → handler.rs (GET reads, PUT/POST writes over HTTP)
//!     → config::level option (direct writes)
//! ```
//!
//! # Design Decisions
//! - One cell, many handles: clones of `AtomicLevel` share storage
//! - Level reads are lock-free; writes are visible to the next event

pub mod atomic;
pub mod handler;

pub use atomic::{AtomicLevel, Level, LevelError};
pub use handler::level_routes;
