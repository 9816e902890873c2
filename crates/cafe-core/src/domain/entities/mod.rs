//! Community records: members, discussions, topics and log lines.

pub mod discussion;
pub mod log_entry;
pub mod member;
pub mod topic;

pub use discussion::{Discussion, Message, NewDiscussion, Reply};
pub use log_entry::{LogEntry, TIMESTAMP_FORMAT};
pub use member::Member;
pub use topic::{Topic, TopicReport, TopicStatus};
