//! Application services - orchestrate use cases.
//!
//! Each service owns the lock around its state and records outcomes in the
//! activity log or through `tracing`.

pub mod activity_log;
pub mod community;
pub mod topic_board;

pub use activity_log::{ActivityLog, LogSnapshot};
pub use community::{CommunityRegistry, Receipt};
pub use topic_board::TopicBoard;
