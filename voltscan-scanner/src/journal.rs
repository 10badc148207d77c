//! Append-only signal journal.
//!
//! One timestamped line per lifecycle event, written best-effort: an
//! unwritable journal warns once per append and never interrupts scanning.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct Journal {
    path: PathBuf,
}

impl Journal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, prefixed with a local timestamp.
    pub fn append(&self, line: &str) {
        let stamped = format!("[{}] {line}\n", Local::now().format("%Y-%m-%d %H:%M:%S"));
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| f.write_all(stamped.as_bytes()));

        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "journal append failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::new(dir.path().join("history.log"));
        journal.append("SIGNAL FIRED | R_75 | BUY 102.00");
        journal.append("EXPIRED | R_75");

        let content = std::fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("SIGNAL FIRED | R_75 | BUY 102.00"));
        assert!(lines[1].contains("EXPIRED"));
    }

    #[test]
    fn unwritable_path_is_swallowed() {
        let journal = Journal::new("/nonexistent-dir/history.log");
        // Must not panic.
        journal.append("line");
    }
}
