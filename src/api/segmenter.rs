//! Segmenter - main planning API
//!
//! The high-level interface: hand it a validated configuration once, then
//! feed it documents as ordered element sequences and get back split
//! positions plus statistics. The marker itself is written by the document
//! writer collaborator; [`render_marked_text`] covers the plain-text case.

use crate::analysis::{FeatureExtractor, RawElement, SentenceDetector};
use crate::config::Config;
use crate::error::Result;
use crate::split::{SplitSelector, SplitStats, aggregate};
use serde::{Deserialize, Serialize};

/// Marker token the document writer inserts at each split position
pub const SPLIT_MARKER: &str = "<!--split-->";

/// Planned split positions and summary statistics for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentPlan {
    /// Element positions after which a marker is inserted; strictly
    /// increasing
    pub splits: Vec<usize>,

    /// Splits that remained mid-sentence (no boundary in the search
    /// window)
    pub mid_sentence_splits: Vec<usize>,

    pub stats: SplitStats,
}

/// Plans segmentation markers for documents
pub struct Segmenter {
    config: Config,
    extractor: FeatureExtractor,
}

impl Segmenter {
    /// Create a segmenter, validating the configuration and compiling the
    /// heading patterns once.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let extractor = FeatureExtractor::new(&config)?;
        Ok(Self { config, extractor })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Plan split positions for one document.
    ///
    /// Total over well-formed input: an empty element sequence yields an
    /// empty plan with zeroed stats. Each call owns its element sequence
    /// and detector, so independent documents may be segmented from
    /// separate threads with one shared `Segmenter`.
    pub fn segment(&self, raw: &[RawElement]) -> SegmentPlan {
        let mut detector = SentenceDetector::new(self.config.analysis.cache_size);
        let elements = self.extractor.extract(raw, &mut detector);

        let outcome = SplitSelector::new(&self.config).select(&elements);
        let stats = aggregate(&elements, &outcome, &self.config);

        log::info!(
            "planned {} splits over {} elements ({} chunks)",
            stats.split_count,
            stats.element_count,
            stats.chunk_count
        );
        if stats.oversized_chunks > 0 {
            log::warn!(
                "{} chunks exceed max_length ({}); largest is {} characters",
                stats.oversized_chunks,
                self.config.segmentation.max_length,
                stats.max_chunk_length
            );
        }
        if stats.mid_sentence_splits > 0 {
            log::warn!("{} splits remain mid-sentence", stats.mid_sentence_splits);
        }

        SegmentPlan {
            splits: outcome.splits,
            mid_sentence_splits: outcome.mid_sentence_splits,
            stats,
        }
    }
}

/// Assemble the text of each chunk delimited by `splits`, joining element
/// texts with blank lines and skipping textless elements.
pub fn chunk_texts(raw: &[RawElement], splits: &[usize]) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::with_capacity(splits.len() + 1);
    let mut current = Vec::new();
    let mut split_iter = splits.iter().copied().peekable();

    for (i, element) in raw.iter().enumerate() {
        let text = element.render_text().trim();
        if !text.is_empty() {
            current.push(text);
        }
        if split_iter.peek() == Some(&i) {
            split_iter.next();
            chunks.push(current.join("\n\n"));
            current.clear();
        }
    }
    chunks.push(current.join("\n\n"));
    chunks
}

/// Render the whole document as plain text with a [`SPLIT_MARKER`] line
/// between chunks.
pub fn render_marked_text(raw: &[RawElement], splits: &[usize]) -> String {
    chunk_texts(raw, splits).join(&format!("\n\n{}\n\n", SPLIT_MARKER))
}
