//! Configuration for splitmark
//!
//! All knobs of the split engine live here, grouped by concern. The config
//! is deserialized once (typically from a JSON file by the calling layer),
//! validated once with [`Config::validate`], and passed by immutable
//! reference into the engine; it is never mutated mid-run.

use crate::error::{Result, SplitmarkError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Chunk geometry and element weighting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Upper bound on chunk length in characters
    pub max_length: usize,

    /// Lower bound on chunk length in characters
    pub min_length: usize,

    /// Multiplier rewarding boundaries that coincide with sentence ends
    pub sentence_integrity_weight: f64,

    /// Synthetic length weight applied to a table's cell text
    pub table_length_factor: f64,

    /// Flat synthetic length assigned to an image element
    pub image_length_factor: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_length: 1000,
            min_length: 300,
            sentence_integrity_weight: 8.0,
            table_length_factor: 1.2,
            image_length_factor: 100,
        }
    }
}

/// Boundary scoring and acceptance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Minimum score a boundary must reach to be accepted
    pub min_split_score: f64,

    /// Bonus for splitting right before a heading
    pub heading_score_bonus: f64,

    /// Penalty for splitting right after a heading
    pub heading_after_penalty: f64,

    /// Flat bonus when the open chunk ends at a sentence terminator
    pub sentence_end_score_bonus: f64,

    /// Scale applied to the length-proximity term
    pub length_score_factor: f64,

    /// Accept a boundary before any heading regardless of score, once the
    /// open chunk has reached `min_length`
    pub force_split_before_heading: bool,

    /// Number of non-empty elements after a forced heading split that only
    /// accumulate length and are not scored
    pub heading_cooldown_elements: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_split_score: 7.0,
            heading_score_bonus: 10.0,
            heading_after_penalty: 12.0,
            sentence_end_score_bonus: 6.0,
            length_score_factor: 4.0,
            force_split_before_heading: true,
            heading_cooldown_elements: 2,
        }
    }
}

/// Text analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum element distance scanned when correcting a split to the
    /// nearest sentence boundary
    pub search_window: usize,

    /// Capacity of the per-run sentence-boundary memo table (entries)
    pub cache_size: usize,

    /// Extra heading-detection regexes, applied after the built-in set
    pub custom_heading_patterns: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            search_window: 5,
            cache_size: 1024,
            custom_heading_patterns: Vec::new(),
        }
    }
}

/// Complete splitmark configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub segmentation: SegmentationConfig,
    pub scoring: ScoringConfig,
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration once, before any document is processed.
    ///
    /// The split engine assumes a validated configuration and does not
    /// re-check these invariants per call.
    pub fn validate(&self) -> Result<()> {
        let seg = &self.segmentation;

        if seg.max_length == 0 {
            return Err(SplitmarkError::Config(
                "max_length must be greater than zero".to_string(),
            ));
        }
        if seg.min_length > seg.max_length {
            return Err(SplitmarkError::Config(format!(
                "min_length ({}) exceeds max_length ({})",
                seg.min_length, seg.max_length
            )));
        }
        if seg.sentence_integrity_weight < 0.0 {
            return Err(SplitmarkError::Config(
                "sentence_integrity_weight must not be negative".to_string(),
            ));
        }
        if seg.table_length_factor < 0.0 {
            return Err(SplitmarkError::Config(
                "table_length_factor must not be negative".to_string(),
            ));
        }

        let sc = &self.scoring;
        if sc.heading_score_bonus < 0.0
            || sc.heading_after_penalty < 0.0
            || sc.sentence_end_score_bonus < 0.0
            || sc.length_score_factor < 0.0
        {
            return Err(SplitmarkError::Config(
                "scoring weights must not be negative".to_string(),
            ));
        }

        if self.analysis.search_window == 0 {
            return Err(SplitmarkError::Config(
                "search_window must be greater than zero".to_string(),
            ));
        }
        if self.analysis.cache_size == 0 {
            return Err(SplitmarkError::Config(
                "cache_size must be greater than zero".to_string(),
            ));
        }

        // Custom patterns must compile; the built-in set is covered by tests.
        for pattern in &self.analysis.custom_heading_patterns {
            regex::Regex::new(pattern)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.segmentation.max_length, 1000);
        assert_eq!(config.segmentation.min_length, 300);
        assert_eq!(config.analysis.search_window, 5);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut config = Config::default();
        config.segmentation.min_length = 2000;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_length"));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = Config::default();
        config.scoring.heading_score_bonus = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_search_window_rejected() {
        let mut config = Config::default();
        config.analysis.search_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_custom_pattern_rejected() {
        let mut config = Config::default();
        config.analysis.custom_heading_patterns = vec!["([unclosed".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"segmentation": {"max_length": 500}}"#).unwrap();
        assert_eq!(config.segmentation.max_length, 500);
        assert_eq!(config.segmentation.min_length, 300);
        assert_eq!(config.scoring.min_split_score, 7.0);
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.segmentation.max_length, config.segmentation.max_length);
        assert_eq!(parsed.scoring.min_split_score, config.scoring.min_split_score);
    }
}
