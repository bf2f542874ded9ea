//! High-level API for splitmark
//!
//! This module provides the document-facing surface: the [`Segmenter`]
//! planning API, chunk rendering, and parallel batch processing.

pub mod batch;
pub mod segmenter;

// Re-export main types and functions
pub use batch::{BatchReport, FileOutcome, read_elements, segment_files};
pub use segmenter::{SPLIT_MARKER, SegmentPlan, Segmenter, chunk_texts, render_marked_text};
