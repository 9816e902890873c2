//! Activity Log - append-only, timestamped record of community activity.
//!
//! One line per entry, `DD/MM/YYYY HH:MM:SS - LEVEL - message`. Writes and
//! reads go through one mutex so concurrent writers never interleave partial
//! lines. A failing sink is reported through `tracing` and otherwise ignored:
//! logging never fails a business operation.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{error, warn};

use crate::application::ports::{Clock, LogSink};
use crate::domain::{LogEntry, Severity};

/// Text shown for a log that has no records.
pub const EMPTY_LOG_SENTINEL: &str = "No records yet.";

/// Result of [`ActivityLog::read_log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSnapshot {
    /// The sink was never written (or could not be read).
    Empty,
    /// The full accumulated text, one entry per line.
    Records(String),
}

impl LogSnapshot {
    fn from_text(text: Option<String>) -> Self {
        match text {
            Some(text) if !text.trim().is_empty() => Self::Records(text),
            _ => Self::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Raw text, `None` for an empty log.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Records(text) => Some(text),
        }
    }

    /// Lines parsed back into entries; malformed lines are skipped.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.text()
            .map(|text| text.lines().filter_map(LogEntry::parse).collect())
            .unwrap_or_default()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }
}

impl fmt::Display for LogSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str(EMPTY_LOG_SENTINEL),
            Self::Records(text) => f.write_str(text.trim_end()),
        }
    }
}

/// The activity log service.
///
/// Explicitly constructible for injection; the process-wide instance lives in
/// `cafe_adapters::global`.
pub struct ActivityLog {
    sink: Mutex<Box<dyn LogSink>>,
    clock: Box<dyn Clock>,
}

impl ActivityLog {
    pub fn new(sink: Box<dyn LogSink>, clock: Box<dyn Clock>) -> Self {
        Self {
            sink: Mutex::new(sink),
            clock,
        }
    }

    pub fn log_success(&self, text: impl AsRef<str>) {
        self.record(Severity::Success, text.as_ref());
    }

    pub fn log_error(&self, text: impl AsRef<str>) {
        self.record(Severity::Error, text.as_ref());
    }

    pub fn log_warning(&self, text: impl AsRef<str>) {
        self.record(Severity::Warning, text.as_ref());
    }

    /// Append one entry with the given severity.
    pub fn record(&self, severity: Severity, text: &str) {
        let mut sink = self.lock_sink();
        let entry = LogEntry::new(self.clock.now(), severity, text);
        if let Err(e) = sink.append(&entry.to_string()) {
            error!(error = %e, severity = %severity, "Failed to write activity log entry");
        }
    }

    /// Everything recorded so far.
    pub fn read_log(&self) -> LogSnapshot {
        let mut sink = self.lock_sink();
        match sink.read_all() {
            Ok(text) => LogSnapshot::from_text(text),
            Err(e) => {
                error!(error = %e, "Failed to read activity log");
                LogSnapshot::Empty
            }
        }
    }

    fn lock_sink(&self) -> MutexGuard<'_, Box<dyn LogSink>> {
        self.sink.lock().unwrap_or_else(|poisoned| {
            warn!("Activity log lock was poisoned; continuing");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl fmt::Debug for ActivityLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityLog").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::{MockClock, MockLogSink};
    use crate::error::CafeResult;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 30, 5)
            .unwrap()
    }

    fn pinned_clock() -> Box<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_now().returning(noon);
        Box::new(clock)
    }

    #[derive(Clone, Default)]
    struct Lines(Arc<Mutex<Vec<String>>>);

    impl LogSink for Lines {
        fn append(&mut self, line: &str) -> CafeResult<()> {
            self.0.lock().unwrap().push(line.to_owned());
            Ok(())
        }

        fn read_all(&mut self) -> CafeResult<Option<String>> {
            let lines = self.0.lock().unwrap();
            if lines.is_empty() {
                return Ok(None);
            }
            Ok(Some(lines.iter().map(|l| format!("{l}\n")).collect()))
        }
    }

    #[test]
    fn lines_carry_timestamp_and_level() {
        let lines = Lines::default();
        let log = ActivityLog::new(Box::new(lines.clone()), pinned_clock());

        log.log_success("Member @alice registered");
        log.log_warning("Member @alice is already registered");
        log.log_error("Member @ghost not found");

        assert_eq!(
            *lines.0.lock().unwrap(),
            [
                "01/06/2025 12:30:05 - SUCCESS - Member @alice registered",
                "01/06/2025 12:30:05 - WARNING - Member @alice is already registered",
                "01/06/2025 12:30:05 - ERROR - Member @ghost not found",
            ]
        );
    }

    #[test]
    fn unwritten_log_reads_as_sentinel() {
        let log = ActivityLog::new(Box::new(Lines::default()), pinned_clock());
        let snapshot = log.read_log();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.to_string(), "No records yet.");
        assert!(snapshot.entries().is_empty());
    }

    #[test]
    fn snapshot_counts_by_severity() {
        let log = ActivityLog::new(Box::new(Lines::default()), pinned_clock());
        log.log_success("a");
        log.log_success("b");
        log.log_error("c");

        let snapshot = log.read_log();
        assert_eq!(snapshot.count(Severity::Success), 2);
        assert_eq!(snapshot.count(Severity::Error), 1);
        assert_eq!(snapshot.count(Severity::Warning), 0);
        assert_eq!(snapshot.entries()[2].message, "c");
    }

    #[test]
    fn sink_failures_are_swallowed() {
        let mut sink = MockLogSink::new();
        sink.expect_append().times(2).returning(|_| {
            Err(ApplicationError::LogSink {
                operation: "append",
                reason: "disk full".into(),
            }
            .into())
        });
        sink.expect_read_all().times(1).returning(|| {
            Err(ApplicationError::LogSink {
                operation: "read",
                reason: "gone".into(),
            }
            .into())
        });

        let log = ActivityLog::new(Box::new(sink), pinned_clock());
        log.log_success("still fine");
        log.log_error("also fine");
        assert_eq!(log.read_log(), LogSnapshot::Empty);
    }

    #[test]
    fn whitespace_only_text_is_empty() {
        assert_eq!(
            LogSnapshot::from_text(Some("\n".into())),
            LogSnapshot::Empty
        );
    }
}
