//! In-memory log sink for testing.

use std::sync::{Arc, PoisonError, RwLock};

use cafe_core::application::{ApplicationError, ports::LogSink};
use cafe_core::error::CafeResult;

/// In-memory sink. Clones share the same lines, so a test can keep one clone
/// and hand the other to an `ActivityLog`.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSink {
    lines: Arc<RwLock<Vec<String>>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every line appended so far (testing helper).
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogSink for MemoryLogSink {
    fn append(&mut self, line: &str) -> CafeResult<()> {
        let mut lines = self
            .lines
            .write()
            .map_err(|_| poisoned("append"))?;
        lines.push(line.to_owned());
        Ok(())
    }

    fn read_all(&mut self) -> CafeResult<Option<String>> {
        let lines = self.lines.read().map_err(|_| poisoned("read"))?;
        if lines.is_empty() {
            return Ok(None);
        }
        Ok(Some(lines.iter().map(|l| format!("{l}\n")).collect()))
    }
}

fn poisoned(operation: &'static str) -> ApplicationError {
    ApplicationError::LogSink {
        operation,
        reason: "memory sink lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_lines() {
        let observer = MemoryLogSink::new();
        let mut writer = observer.clone();

        assert_eq!(writer.read_all().unwrap(), None);
        writer.append("a").unwrap();
        writer.append("b").unwrap();

        assert_eq!(observer.lines(), ["a", "b"]);
        assert_eq!(writer.read_all().unwrap().as_deref(), Some("a\nb\n"));

        observer.clear();
        assert!(writer.is_empty());
    }
}
