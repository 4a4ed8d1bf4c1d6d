use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Occurrence count for one rule within one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleHit {
    pub rule_id: String,
    pub occurrences: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// At least one substitution matched and the new content was (or, on a
    /// dry run, would have been) written back.
    Fixed,
    /// No substitution matched; the file was not touched on disk.
    Clean,
    /// Reading, decoding, or writing the file failed. The run continues.
    Failed,
}

/// The outcome of processing a single discovered file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: Utf8PathBuf,
    pub status: FileStatus,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hits: Vec<RuleHit>,

    /// Total replaced occurrences across all rules.
    pub replacements: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,

    /// Geresh markers (U+05F3) still present after the pass. Nonzero means
    /// mojibake the table does not know about.
    pub residual_markers: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileOutcome {
    pub fn clean(path: Utf8PathBuf, residual_markers: u64) -> Self {
        Self {
            path,
            status: FileStatus::Clean,
            hits: vec![],
            replacements: 0,
            sha256_before: None,
            sha256_after: None,
            residual_markers,
            message: None,
        }
    }

    pub fn failed(path: Utf8PathBuf, message: String) -> Self {
        Self {
            path,
            status: FileStatus::Failed,
            hits: vec![],
            replacements: 0,
            sha256_before: None,
            sha256_after: None,
            residual_markers: 0,
            message: Some(message),
        }
    }
}

/// Counters accumulated across one fix pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_scanned: u64,
    pub files_fixed: u64,
    pub files_clean: u64,
    pub files_failed: u64,
    pub replacements: u64,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        self.files_scanned += 1;
        self.replacements += outcome.replacements;
        match outcome.status {
            FileStatus::Fixed => self.files_fixed += 1,
            FileStatus::Clean => self.files_clean += 1,
            FileStatus::Failed => self.files_failed += 1,
        }
    }
}
