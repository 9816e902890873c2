//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `cafe-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `LogSink`: append-only storage for activity log lines
//!   - `Clock`: wall-clock time for log timestamps
//!
//! - **Driving (Input) Ports**: the services themselves, called by the CLI

pub mod output;

pub use output::{Clock, LogSink};

#[cfg(test)]
pub use output::{MockClock, MockLogSink};
