//! Append-only text file sink using std::fs.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cafe_core::application::{ApplicationError, ports::LogSink};
use cafe_core::error::{CafeError, CafeResult};
use tracing::trace;

/// Production sink: one line per entry in a single text file.
///
/// The file and its parent directories are created on first append. Reading
/// a file that does not exist yet is not an error.
#[derive(Debug, Clone)]
pub struct FileLogSink {
    path: PathBuf,
}

impl FileLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLogSink {
    fn append(&mut self, line: &str) -> CafeResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| map_io_error(parent, e, "append"))?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| map_io_error(&self.path, e, "append"))?;

        // one write per line so concurrent processes do not split entries
        file.write_all(format!("{line}\n").as_bytes())
            .map_err(|e| map_io_error(&self.path, e, "append"))?;
        trace!(path = %self.path.display(), "Appended log line");
        Ok(())
    }

    fn read_all(&mut self) -> CafeResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(&self.path, e, "read")),
        }
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &'static str) -> CafeError {
    ApplicationError::LogSink {
        operation,
        reason: format!("{}: {}", path.display(), e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileLogSink::new(dir.path().join("community_log.txt"));
        assert_eq!(sink.read_all().unwrap(), None);
    }

    #[test]
    fn appends_lines_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("nested").join("community_log.txt");
        let mut sink = FileLogSink::new(&path);

        sink.append("first").unwrap();
        sink.append("second").unwrap();

        assert_eq!(sink.read_all().unwrap().as_deref(), Some("first\nsecond\n"));
        assert_eq!(fs::read_to_string(path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn existing_content_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("community_log.txt");
        fs::write(&path, "older\n").unwrap();

        FileLogSink::new(&path).append("newer").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "older\nnewer\n");
    }

    #[test]
    fn directory_in_the_way_is_a_sink_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileLogSink::new(dir.path());

        let err = sink.append("line").unwrap_err();
        assert!(matches!(
            err,
            CafeError::Application(ApplicationError::LogSink {
                operation: "append",
                ..
            })
        ));
    }
}
