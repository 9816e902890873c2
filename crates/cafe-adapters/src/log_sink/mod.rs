//! Log sink adapters.

mod file;
mod memory;

pub use file::FileLogSink;
pub use memory::MemoryLogSink;
