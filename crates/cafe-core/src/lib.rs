//! Cafe Core - domain and application layers of the coffee community.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             cafe-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │ (ActivityLog, CommunityRegistry,        │
//! │  TopicBoard)                            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │          (LogSink, Clock)               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     cafe-adapters (Infrastructure)      │
//! │ (FileLogSink, SystemClock, globals)     │
//! └─────────────────────────────────────────┘
//!
//!     Domain Layer (Pure Logic): members, discussions, topics and
//!     moderators, roles, ranking, content, listings, establishments
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cafe_core::prelude::*;
//!
//! # fn run(sink: Box<dyn LogSink>, clock: Box<dyn Clock>) -> Result<(), DomainError> {
//! let log = Arc::new(ActivityLog::new(sink, clock));
//! let registry = CommunityRegistry::new(log);
//!
//! registry.add_member(Member::new("alice", "Alice Souza", Credential::new("123")))?;
//! registry.start_discussion(NewDiscussion::new("Best Coffee Down South", "alice"))?;
//! registry.post_message("Best Coffee Down South", "alice", "Try Cafe Cultura!")?;
//! println!("{}", registry.read_log());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        ActivityLog, CommunityRegistry, LogSnapshot, Receipt, TopicBoard,
        ports::{Clock, LogSink},
    };
    pub use crate::domain::{
        Credential, DomainError, Handle, Member, Moderator, NewDiscussion, PermissionLevel,
        Severity, Topic, TopicObserver,
    };
    pub use crate::error::{CafeError, CafeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
