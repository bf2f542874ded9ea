//! Text analysis for the split engine
//!
//! This module provides rule-based sentence boundary detection and the
//! extraction of scoring features from raw document elements.

pub mod features;
pub mod sentence;

// Re-export main types and functions
pub use features::{
    DocumentElement, ElementKind, FeatureExtractor, RawElement, is_boundary_candidate,
};
pub use sentence::SentenceDetector;
