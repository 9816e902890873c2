//! The activity log over a real file.

use std::fs;
use std::sync::Arc;

use cafe_adapters::{FileLogSink, FixedClock};
use cafe_core::application::{ActivityLog, CommunityRegistry, LogSnapshot};
use cafe_core::domain::{Credential, LogEntry, Member, Severity};
use chrono::NaiveDate;

#[test]
fn registry_outcomes_land_in_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("community_log.txt");
    let at = NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(7, 5, 9)
        .unwrap();
    let log = Arc::new(ActivityLog::new(
        Box::new(FileLogSink::new(&path)),
        Box::new(FixedClock(at)),
    ));
    let registry = CommunityRegistry::new(Arc::clone(&log));

    assert_eq!(registry.read_log(), LogSnapshot::Empty);

    registry
        .add_member(Member::new("bruno", "Bruno Lima", Credential::new("456")))
        .unwrap();
    registry
        .add_member(Member::new("bruno", "Bruno Lima", Credential::new("456")))
        .unwrap_err();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "01/06/2025 07:05:09 - SUCCESS - Member @bruno registered\n\
         01/06/2025 07:05:09 - WARNING - Member @bruno is already registered\n"
    );

    let entries: Vec<LogEntry> = text.lines().filter_map(LogEntry::parse).collect();
    assert_eq!(entries[1].severity, Severity::Warning);
    assert_eq!(log.read_log().entries(), entries);
}
