//! Batch processing across documents
//!
//! Documents are independent, so the fan-out is a plain parallel map: one
//! segmenter shared read-only, one freshly built element sequence per file.
//! A file that fails to read or parse is reported and the rest of the batch
//! continues.

use crate::analysis::RawElement;
use crate::api::segmenter::{SegmentPlan, Segmenter};
use crate::error::Result;
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of processing one file
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,

    /// The plan, when the file was processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<SegmentPlan>,

    /// Descriptive error, when it was not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Wall-clock processing time for this file
    pub elapsed_secs: f64,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.plan.is_some()
    }
}

/// Summary of one batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileOutcome>,
    pub succeeded: usize,
    pub failed: usize,
    pub total_splits: usize,
}

/// Read a document's element sequence from a JSON file
pub fn read_elements<P: AsRef<Path>>(path: P) -> Result<Vec<RawElement>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&content)?)
}

/// Segment every file in parallel, one document per worker.
///
/// Input order is preserved in the report regardless of completion order.
pub fn segment_files(segmenter: &Segmenter, paths: &[PathBuf]) -> BatchReport {
    let progress = ProgressBar::new(paths.len() as u64);

    let files: Vec<FileOutcome> = paths
        .par_iter()
        .map(|path| {
            let outcome = segment_file(segmenter, path);
            progress.inc(1);
            outcome
        })
        .collect();

    progress.finish_and_clear();

    let succeeded = files.iter().filter(|f| f.is_success()).count();
    let total_splits = files
        .iter()
        .filter_map(|f| f.plan.as_ref())
        .map(|p| p.splits.len())
        .sum();

    BatchReport {
        failed: files.len() - succeeded,
        succeeded,
        total_splits,
        files,
    }
}

fn segment_file(segmenter: &Segmenter, path: &Path) -> FileOutcome {
    let started = Instant::now();
    match read_elements(path) {
        Ok(raw) => {
            let plan = segmenter.segment(&raw);
            log::info!(
                "{}: {} splits, {} chunks",
                path.display(),
                plan.splits.len(),
                plan.stats.chunk_count
            );
            FileOutcome {
                path: path.to_path_buf(),
                plan: Some(plan),
                error: None,
                elapsed_secs: started.elapsed().as_secs_f64(),
            }
        }
        Err(e) => {
            log::error!("failed to process {}: {}", path.display(), e);
            FileOutcome {
                path: path.to_path_buf(),
                plan: None,
                error: Some(e.to_string()),
                elapsed_secs: started.elapsed().as_secs_f64(),
            }
        }
    }
}
