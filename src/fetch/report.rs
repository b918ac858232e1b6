//! Fetch outcomes, tallies, and the missing-sprites artifact.

use std::fmt;
use std::ops::AddAssign;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PogoError, Result};

/// Which sprite of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Regular,
    Shiny,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Regular, Variant::Shiny];

    /// Subdirectory name for this variant.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Variant::Regular => "regular",
            Variant::Shiny => "shiny",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// A sprite the remote confirmed does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingAssetRecord {
    pub class_name: String,
    pub variant: Variant,
    pub file: String,
}

/// Why a download failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Non-success, non-404 HTTP status.
    Status(u16),
    /// Connection or filesystem error.
    Transport(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Status(code) => write!(f, "HTTP {code}"),
            FailureReason::Transport(message) => write!(f, "{message}"),
        }
    }
}

/// A download that should be retried later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub label: String,
    pub file: String,
    pub reason: FailureReason,
}

/// Result of one download task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Downloaded,
    Missing(MissingAssetRecord),
    Failed(TaskFailure),
}

/// Counts for a fetch run or a single batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchTally {
    /// Tasks planned, including ones already on disk.
    pub attempted: usize,
    pub downloaded: usize,
    /// Already present before the run.
    pub skipped: usize,
    pub missing: usize,
    pub failed: usize,
}

impl FetchTally {
    /// Tasks that ended with a file on disk.
    pub fn satisfied(&self) -> usize {
        self.downloaded + self.skipped
    }
}

impl AddAssign for FetchTally {
    fn add_assign(&mut self, other: Self) {
        self.attempted += other.attempted;
        self.downloaded += other.downloaded;
        self.skipped += other.skipped;
        self.missing += other.missing;
        self.failed += other.failed;
    }
}

/// Accumulated outcomes for a batch or a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub tally: FetchTally,
    pub missing: Vec<MissingAssetRecord>,
    pub failures: Vec<TaskFailure>,
}

impl FetchReport {
    /// Fold task outcomes into a report.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = TaskOutcome>) -> Self {
        let mut report = FetchReport::default();

        for outcome in outcomes {
            report.tally.attempted += 1;
            match outcome {
                TaskOutcome::Downloaded => report.tally.downloaded += 1,
                TaskOutcome::Missing(record) => {
                    report.tally.missing += 1;
                    report.missing.push(record);
                }
                TaskOutcome::Failed(failure) => {
                    report.tally.failed += 1;
                    report.failures.push(failure);
                }
            }
        }

        report
    }

    pub fn merge(&mut self, other: FetchReport) {
        self.tally += other.tally;
        self.missing.extend(other.missing);
        self.failures.extend(other.failures);
    }
}

/// Write the missing-sprites artifact as pretty JSON.
pub fn write_missing(path: &Path, missing: &[MissingAssetRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(missing).map_err(|e| PogoError::Build {
        message: format!("Failed to serialize missing sprites: {}", e),
        help: None,
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PogoError::io(parent, "create directory", e))?;
    }

    std::fs::write(path, json).map_err(|e| PogoError::io(path, "write missing sprites", e))
}
