//! # splitmark
//!
//! Plans segmentation-marker positions for word-processor documents,
//! producing text chunks suitable for retrieval-augmented knowledge bases
//! and fine-tuning corpora. The engine scores every legal gap between
//! adjacent document elements (paragraphs, headings, tables, images),
//! corrects accepted splits onto sentence boundaries, and keeps chunk
//! lengths inside configured bounds while never cutting a table apart or
//! detaching a heading from its section.
//!
//! ## Quick Start
//!
//! ```rust
//! use splitmark::{Config, RawElement, Segmenter};
//!
//! fn main() -> splitmark::Result<()> {
//!     let segmenter = Segmenter::new(Config::default())?;
//!
//!     // Element sequences come from a document parser; JSON is the
//!     // interchange form.
//!     let elements: Vec<RawElement> = serde_json::from_str(
//!         r#"[
//!             {"kind": "heading", "text": "Overview", "level": 1},
//!             {"kind": "paragraph", "text": "Segmentation keeps sentences whole."}
//!         ]"#,
//!     )?;
//!
//!     let plan = segmenter.segment(&elements);
//!     println!(
//!         "{} markers over {} chunks",
//!         plan.splits.len(),
//!         plan.stats.chunk_count
//!     );
//!     Ok(())
//! }
//! ```

// Core modules
pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod split;

// Re-export main API types
pub use api::{
    BatchReport, FileOutcome, SPLIT_MARKER, SegmentPlan, Segmenter, chunk_texts, read_elements,
    render_marked_text, segment_files,
};
pub use config::Config;
pub use error::{Result, SplitmarkError};

// Re-export commonly used types
pub use analysis::{DocumentElement, ElementKind, RawElement};
pub use split::SplitStats;
