//! The process-wide instances. Kept in their own test binary (one process)
//! and in a single test, since the globals can only be set up once.

use std::sync::Arc;
use std::thread;

use cafe_adapters::global::{activity_log, community, install_activity_log};
use cafe_adapters::{FixedClock, MemoryLogSink};
use cafe_core::application::{ActivityLog, ApplicationError};
use cafe_core::domain::{Credential, Member, NewDiscussion, Severity};
use cafe_core::error::CafeError;
use chrono::NaiveDate;

#[test]
fn globals_are_single_shared_instances() {
    let sink = MemoryLogSink::new();
    let at = NaiveDate::from_ymd_opt(2026, 10, 18)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap();
    let installed = install_activity_log(ActivityLog::new(
        Box::new(sink.clone()),
        Box::new(FixedClock(at)),
    ))
    .unwrap();
    assert!(Arc::ptr_eq(installed, activity_log()));

    // racing first access still yields one registry
    let addresses: Vec<usize> = (0..8)
        .map(|_| thread::spawn(|| community() as *const _ as usize))
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));

    let registry = community();
    assert!(Arc::ptr_eq(registry.activity_log(), activity_log()));

    registry
        .add_member(Member::new("alice", "Alice", Credential::new("1")))
        .unwrap();
    registry
        .start_discussion(NewDiscussion::new("X", "alice"))
        .unwrap();
    assert!(registry.post_message("X", "ghost", "boo").is_err());

    assert_eq!(
        sink.lines(),
        [
            "18/10/2026 08:00:00 - SUCCESS - Member @alice registered",
            "18/10/2026 08:00:00 - SUCCESS - Discussion 'X' started by @alice",
            "18/10/2026 08:00:00 - ERROR - Member @ghost not found",
        ]
    );
    assert_eq!(activity_log().read_log().count(Severity::Success), 2);

    let again = install_activity_log(ActivityLog::new(
        Box::new(MemoryLogSink::new()),
        Box::new(FixedClock(at)),
    ));
    assert!(matches!(
        again,
        Err(CafeError::Application(
            ApplicationError::GlobalAlreadyInitialized { .. }
        ))
    ));
}
