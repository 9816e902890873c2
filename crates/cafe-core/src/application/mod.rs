//! Application layer for the coffee community.
//!
//! This layer contains:
//! - **Services**: the activity log, the community registry and the topic
//!   board, each owning its lock and its logging
//! - **Ports**: traits for the log sink and the clock
//! - **Errors**: orchestration failures
//!
//! Business rules live in `crate::domain`; services only sequence them,
//! serialize access and record outcomes.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ActivityLog, CommunityRegistry, LogSnapshot, Receipt, TopicBoard};

pub use ports::{Clock, LogSink};

pub use error::ApplicationError;
