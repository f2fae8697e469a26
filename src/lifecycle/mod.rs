//! Lifecycle helpers.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     template → options → build → must → install
//! ```

pub mod startup;

pub use startup::must;
