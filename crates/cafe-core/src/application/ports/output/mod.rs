//! Driven (output) ports - implemented by infrastructure.
//!
//! The `cafe-adapters` crate provides implementations.

use chrono::NaiveDateTime;

use crate::error::CafeResult;

/// Port for activity log storage.
///
/// Implemented by:
/// - `cafe_adapters::log_sink::FileLogSink` (production, one text file)
/// - `cafe_adapters::log_sink::MemoryLogSink` (testing)
///
/// ## Design Notes
///
/// - Lines arrive fully formatted and without a trailing newline
/// - The sink is always called under the activity log's lock, so
///   implementations need not synchronize themselves
#[cfg_attr(test, mockall::automock)]
pub trait LogSink: Send {
    /// Append one line.
    fn append(&mut self, line: &str) -> CafeResult<()>;

    /// Everything appended so far, or `None` if the sink was never written.
    fn read_all(&mut self) -> CafeResult<Option<String>>;
}

/// Port for the current local time.
///
/// Implemented by `cafe_adapters::clock::SystemClock`; tests pin it.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
