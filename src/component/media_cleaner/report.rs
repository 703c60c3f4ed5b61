use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Written with metadata removed
    Cleaned,
    /// Written, but metadata could not be stripped
    Unscrubbed,
    /// Dry run: destination computed, nothing written
    Planned,
    /// Nothing written
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    pub status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EntryReport {
    #[must_use]
    pub fn failed(source: PathBuf, message: String) -> Self {
        Self {
            source,
            destination: None,
            status: EntryStatus::Failed,
            message: Some(message),
        }
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub processed: usize,
    pub scrubbed: usize,
    pub failed: usize,
    pub entries: Vec<EntryReport>,
}

impl RunResult {
    #[must_use]
    pub const fn new(output_dir: PathBuf, dry_run: bool) -> Self {
        Self {
            output_dir,
            dry_run,
            processed: 0,
            scrubbed: 0,
            failed: 0,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, report: EntryReport) {
        match report.status {
            EntryStatus::Cleaned => {
                self.processed += 1;
                self.scrubbed += 1;
            }
            EntryStatus::Unscrubbed | EntryStatus::Planned => self.processed += 1,
            EntryStatus::Failed => self.failed += 1,
        }
        self.entries.push(report);
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries
            .iter()
            .filter(|e| e.status == EntryStatus::Failed)
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
