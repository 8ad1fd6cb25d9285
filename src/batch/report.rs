//! Run summary
//!
//! Collected while a folder is processed and optionally written out as JSON
//! with `--report`.

use crate::core::errors::OutlineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Normalized and written back
    Written,
    /// Normalized during a dry run, file untouched
    Checked,
    Failed,
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub contours: usize,
    pub points: usize,
    /// Contours whose direction was flipped
    pub reversed: usize,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn failed(path: PathBuf, error: &OutlineError) -> Self {
        Self {
            path,
            contours: 0,
            points: 0,
            reversed: 0,
            status: FileStatus::Failed,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub directory: PathBuf,
    pub files: Vec<FileOutcome>,
    pub written: usize,
    pub checked: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn new(directory: &Path) -> Self {
        Self {
            started_at: Utc::now(),
            directory: directory.to_path_buf(),
            files: Vec::new(),
            written: 0,
            checked: 0,
            failed: 0,
        }
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        match outcome.status {
            FileStatus::Written => self.written += 1,
            FileStatus::Checked => self.checked += 1,
            FileStatus::Failed => self.failed += 1,
        }
        self.files.push(outcome);
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Write the report as pretty-printed JSON
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn written(name: &str) -> FileOutcome {
        FileOutcome {
            path: PathBuf::from(name),
            contours: 2,
            points: 8,
            reversed: 1,
            status: FileStatus::Written,
            error: None,
        }
    }

    #[test]
    fn test_counts_follow_status() {
        let mut report = BatchReport::new(Path::new("icons"));
        report.push(written("a.svg"));
        report.push(FileOutcome::failed(
            PathBuf::from("b.svg"),
            &OutlineError::GlyphName {
                name: String::new(),
            },
        ));
        assert_eq!(report.written, 1);
        assert_eq!(report.failed, 1);
        assert!(report.has_failures());
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.json");
        let mut report = BatchReport::new(Path::new("icons"));
        report.push(written("a.svg"));
        report.write_to(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["written"], 1);
        assert_eq!(json["files"][0]["status"], "written");
        assert!(json["files"][0].get("error").is_none());
    }
}
