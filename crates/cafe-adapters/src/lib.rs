//! Infrastructure adapters for cafe.
//!
//! This crate implements the ports defined in `cafe_core::application::ports`
//! and owns the process-wide instances. All file I/O lives here.

pub mod clock;
pub mod global;
pub mod log_sink;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use log_sink::{FileLogSink, MemoryLogSink};
