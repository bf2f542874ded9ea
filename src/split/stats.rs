//! Split result aggregation
//!
//! Pure summary of a selection pass: chunk counts, segment length
//! distribution, and the flagged length-bound and sentence-integrity
//! violations. Read-only over its inputs.

use crate::analysis::DocumentElement;
use crate::config::Config;
use crate::split::selector::SplitOutcome;
use serde::{Deserialize, Serialize};

/// Summary statistics for one document's split plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitStats {
    /// Number of input elements
    pub element_count: usize,

    /// Number of committed splits (markers to insert)
    pub split_count: usize,

    /// Number of chunks the splits produce (`split_count + 1` for a
    /// non-empty document)
    pub chunk_count: usize,

    /// Total weighted length of the document
    pub total_length: usize,

    /// Shortest chunk, by weighted character count
    pub min_chunk_length: usize,

    /// Longest chunk, by weighted character count
    pub max_chunk_length: usize,

    /// Mean chunk length
    pub mean_chunk_length: f64,

    /// Chunks above `max_length` (an unsplittable oversized element, or a
    /// forced tail)
    pub oversized_chunks: usize,

    /// Chunks below `min_length`, not counting the final tail chunk
    pub undersized_chunks: usize,

    /// Splits left mid-sentence because no sentence boundary fell inside
    /// the search window
    pub mid_sentence_splits: usize,
}

/// Weighted lengths of the chunks delimited by `splits`, in order
pub fn chunk_lengths(elements: &[DocumentElement], splits: &[usize]) -> Vec<usize> {
    if elements.is_empty() {
        return Vec::new();
    }

    let mut lengths = Vec::with_capacity(splits.len() + 1);
    let mut start = 0;
    for &split in splits {
        lengths.push(span_length(elements, start, split));
        start = split + 1;
    }
    lengths.push(span_length(elements, start, elements.len() - 1));
    lengths
}

fn span_length(elements: &[DocumentElement], start: usize, end: usize) -> usize {
    elements[start..=end].iter().map(|e| e.length).sum()
}

/// Summarize one selection pass. An empty document yields zeroed stats.
pub fn aggregate(
    elements: &[DocumentElement],
    outcome: &SplitOutcome,
    config: &Config,
) -> SplitStats {
    if elements.is_empty() {
        return SplitStats::default();
    }

    let lengths = chunk_lengths(elements, &outcome.splits);
    let total_length: usize = lengths.iter().sum();
    let seg = &config.segmentation;

    let oversized = lengths.iter().filter(|&&l| l > seg.max_length).count();
    // The tail chunk is legitimately allowed to run short
    let undersized = lengths[..lengths.len() - 1]
        .iter()
        .filter(|&&l| l < seg.min_length)
        .count();

    SplitStats {
        element_count: elements.len(),
        split_count: outcome.splits.len(),
        chunk_count: lengths.len(),
        total_length,
        min_chunk_length: lengths.iter().copied().min().unwrap_or(0),
        max_chunk_length: lengths.iter().copied().max().unwrap_or(0),
        mean_chunk_length: total_length as f64 / lengths.len() as f64,
        oversized_chunks: oversized,
        undersized_chunks: undersized,
        mid_sentence_splits: outcome.mid_sentence_splits.len(),
    }
}
