use std::path::PathBuf;
use tubeprep_common::VideoId;

use super::ItemState;

/// Errors recorded against a single item.
///
/// Only [`ConversionError::ToolMissing`] ever aborts a whole batch; every
/// other variant is caught per item.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("item has no media file")]
    MissingMedia,

    #[error("item has no metadata sidecar")]
    MissingMetadata,

    #[error("media file not found: {0:?}")]
    SourceMissing(PathBuf),

    #[error("probe failed: {0}")]
    Probe(#[source] tubeprep_av::Error),

    #[error("extraction failed: {0}")]
    Extraction(#[source] tubeprep_av::Error),

    #[error("transcode failed: {0}")]
    Transcode(#[source] tubeprep_av::Error),

    #[error("failed to rename {from:?} to {to:?}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("required tool missing: {0}")]
    ToolMissing(#[source] tubeprep_av::Error),
}

/// Why an item was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingMedia,
    AlreadyNormalized,
    DryRun,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingMedia => write!(f, "no media file"),
            SkipReason::AlreadyNormalized => write!(f, "already normalized"),
            SkipReason::DryRun => write!(f, "dry run"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    Skipped(SkipReason),
    Failed,
}

/// Outcome of converting one item.
#[derive(Debug)]
pub struct ConversionResult {
    pub id: VideoId,
    pub status: ConversionStatus,
    /// Last step entered before the item finished or failed.
    pub stage: ItemState,
    pub error: Option<ConversionError>,
    /// Files produced or renamed into place, or planned on a dry run.
    pub outputs: Vec<PathBuf>,
    /// Soft failures that did not stop the item.
    pub warnings: Vec<String>,
}

impl ConversionResult {
    pub fn is_success(&self) -> bool {
        self.status == ConversionStatus::Success
    }

    pub fn is_failed(&self) -> bool {
        self.status == ConversionStatus::Failed
    }
}

/// Success/skip/failure counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[ConversionResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            match r.status {
                ConversionStatus::Success => acc.success += 1,
                ConversionStatus::Skipped(_) => acc.skipped += 1,
                ConversionStatus::Failed => acc.failed += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} succeeded, {} skipped, {} failed",
            self.success, self.skipped, self.failed
        )
    }
}

/// Every per-item result of a batch plus its summary.
#[derive(Debug)]
pub struct BatchReport {
    pub results: Vec<ConversionResult>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn new(results: Vec<ConversionResult>) -> Self {
        let summary = BatchSummary::from_results(&results);
        Self { results, summary }
    }

    pub fn failures(&self) -> impl Iterator<Item = &ConversionResult> {
        self.results.iter().filter(|r| r.is_failed())
    }

    pub fn get(&self, id: &str) -> Option<&ConversionResult> {
        self.results.iter().find(|r| r.id.as_str() == id)
    }
}
