//! A single line of the activity log.
//!
//! Wire format, one entry per line:
//!
//! ```text
//! 18/10/2026 09:15:02 - SUCCESS - Member @alice registered
//! ```

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::value_objects::Severity;

/// `DD/MM/YYYY HH:MM:SS`
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const SEPARATOR: &str = " - ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    pub severity: Severity,
    pub message: String,
}

impl LogEntry {
    /// Line breaks in `message` are escaped so the entry stays on one line.
    pub fn new(timestamp: NaiveDateTime, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            severity,
            message: single_line(message.into()),
        }
    }

    /// Parse one log line. Returns `None` for lines that are not entries.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, SEPARATOR);
        let timestamp = NaiveDateTime::parse_from_str(parts.next()?, TIMESTAMP_FORMAT).ok()?;
        let severity = parts.next()?.parse().ok()?;
        let message = parts.next()?.to_owned();
        Some(Self {
            timestamp,
            severity,
            message,
        })
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.severity,
            self.message
        )
    }
}

fn single_line(message: String) -> String {
    if !message.contains(['\r', '\n']) {
        return message;
    }
    message
        .replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn renders_day_first() {
        let e = LogEntry::new(at(9, 5, 2), Severity::Warning, "Member @alice is already registered");
        assert_eq!(
            e.to_string(),
            "18/10/2026 09:05:02 - WARNING - Member @alice is already registered"
        );
    }

    #[test]
    fn parse_keeps_separator_inside_message() {
        let e = LogEntry::parse("18/10/2026 09:05:02 - ERROR - a - b").unwrap();
        assert_eq!(e.severity, Severity::Error);
        assert_eq!(e.message, "a - b");
        assert_eq!(e.timestamp, at(9, 5, 2));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(LogEntry::parse("").is_none());
        assert!(LogEntry::parse("yesterday - SUCCESS - x").is_none());
        assert!(LogEntry::parse("18/10/2026 09:05:02 - LOUD - x").is_none());
    }

    #[test]
    fn line_breaks_are_escaped() {
        let e = LogEntry::new(
            at(9, 5, 2),
            Severity::Success,
            "one\r\n18/10/2026 09:05:02 - ERROR - two\rthree",
        );
        let line = e.to_string();
        assert_eq!(line.lines().count(), 1);
        assert_eq!(
            e.message,
            "one\\n18/10/2026 09:05:02 - ERROR - two\\nthree"
        );
        assert_eq!(LogEntry::parse(&line).unwrap().severity, Severity::Success);
    }
}
