//! Element feature extraction
//!
//! Converts the parser collaborator's raw element records into the feature
//! records the split engine scores. This module never touches document
//! markup itself: headings arrive as explicit levels or style names (with a
//! regex fallback over common numbered-heading shapes), tables arrive as
//! already-flattened cell text.

use crate::analysis::sentence::SentenceDetector;
use crate::config::Config;
use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Built-in heading shapes: 第一章 / 一、 / 1.2 标题 / （三） / (2)
const DEFAULT_HEADING_PATTERNS: [&str; 5] = [
    r"^第[一二三四五六七八九十百千]+[章节]",
    r"^[一二三四五六七八九十]+[、.]",
    r"^\d+(\.\d+)*\s*[\u{4e00}-\u{9fff}]{0,30}$",
    r"^[(（][一二三四五六七八九十]+[)）]",
    r"^[(（]?\d+[)）]",
];

/// Text longer than this is treated as body copy, never a heading
const MAX_HEADING_CHARS: usize = 50;

/// Raw document element as handed over by the parsing collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawElement {
    /// Body paragraph, optionally carrying its style name
    Paragraph {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<String>,
    },
    /// Heading with an explicit outline level
    Heading {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u8>,
    },
    /// Table segment; segments of one table share a `table_id`
    Table {
        #[serde(default)]
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_id: Option<u32>,
    },
    /// Inline or floating image
    Image {
        #[serde(default)]
        description: String,
    },
}

impl RawElement {
    /// Textual content used for chunk rendering
    pub fn render_text(&self) -> &str {
        match self {
            RawElement::Paragraph { text, .. } => text,
            RawElement::Heading { text, .. } => text,
            RawElement::Table { text, .. } => text,
            RawElement::Image { description } => description,
        }
    }
}

/// Structural classification of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Paragraph,
    Heading(u8),
    Table,
    Image,
}

impl ElementKind {
    pub fn is_heading(&self) -> bool {
        matches!(self, ElementKind::Heading(_))
    }
}

/// Feature record for one structural unit, in source order.
///
/// Created once per document run by [`FeatureExtractor::extract`] and
/// read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentElement {
    /// Position in the original ordered sequence
    pub index: usize,
    pub kind: ElementKind,
    /// Normalized textual content; empty for tables and images
    pub text: String,
    /// Character count, or the configured synthetic weight for non-text
    /// elements
    pub length: usize,
    pub ends_with_terminator: bool,
    pub is_list_item: bool,
    /// Shared id of the table run this element belongs to, if any
    pub table_id: Option<u32>,
}

impl DocumentElement {
    pub fn is_heading(&self) -> bool {
        self.kind.is_heading()
    }
}

/// True when the gap after `prev` is a legal split position. Gaps strictly
/// inside a table run are never candidates.
pub fn is_boundary_candidate(prev: &DocumentElement, next: &DocumentElement) -> bool {
    !(prev.table_id.is_some() && prev.table_id == next.table_id)
}

/// Converts raw elements into scored-feature records
pub struct FeatureExtractor {
    heading_patterns: Vec<Regex>,
    table_length_factor: f64,
    image_length_factor: usize,
}

impl FeatureExtractor {
    /// Build an extractor from a validated configuration, compiling the
    /// built-in heading patterns plus any user-supplied ones.
    pub fn new(config: &Config) -> Result<Self> {
        let mut heading_patterns = Vec::new();
        for pattern in DEFAULT_HEADING_PATTERNS
            .iter()
            .copied()
            .chain(config.analysis.custom_heading_patterns.iter().map(String::as_str))
        {
            heading_patterns.push(Regex::new(pattern)?);
        }

        Ok(Self {
            heading_patterns,
            table_length_factor: config.segmentation.table_length_factor,
            image_length_factor: config.segmentation.image_length_factor,
        })
    }

    /// Extract feature records for every raw element, in order.
    ///
    /// Pure over its inputs apart from the detector's memo table; performs
    /// no I/O and never fails on well-formed input.
    pub fn extract(
        &self,
        raw: &[RawElement],
        detector: &mut SentenceDetector,
    ) -> Vec<DocumentElement> {
        raw.iter()
            .enumerate()
            .map(|(index, element)| self.extract_one(index, element, detector))
            .collect()
    }

    fn extract_one(
        &self,
        index: usize,
        raw: &RawElement,
        detector: &mut SentenceDetector,
    ) -> DocumentElement {
        match raw {
            RawElement::Paragraph { text, style } => {
                let text = normalize(text);
                let level = style.as_deref().and_then(heading_level_from_style);
                let kind = match level {
                    Some(level) => ElementKind::Heading(level),
                    None if self.looks_like_heading(&text) => ElementKind::Heading(1),
                    None => ElementKind::Paragraph,
                };
                DocumentElement {
                    index,
                    kind,
                    length: text.chars().count(),
                    ends_with_terminator: detector.ends_with_terminator(&text),
                    is_list_item: is_list_item(&text),
                    table_id: None,
                    text,
                }
            }
            RawElement::Heading { text, level } => {
                let text = normalize(text);
                DocumentElement {
                    index,
                    kind: ElementKind::Heading(level.unwrap_or(1)),
                    length: text.chars().count(),
                    ends_with_terminator: detector.ends_with_terminator(&text),
                    is_list_item: false,
                    table_id: None,
                    text,
                }
            }
            RawElement::Table { text, table_id } => {
                let cell_chars = normalize(text).chars().count();
                DocumentElement {
                    index,
                    kind: ElementKind::Table,
                    text: String::new(),
                    length: (cell_chars as f64 * self.table_length_factor).round() as usize,
                    // A table reads as a complete unit; the gap after it is
                    // a clean cut.
                    ends_with_terminator: true,
                    is_list_item: false,
                    table_id: *table_id,
                }
            }
            RawElement::Image { .. } => DocumentElement {
                index,
                kind: ElementKind::Image,
                text: String::new(),
                length: self.image_length_factor,
                ends_with_terminator: false,
                is_list_item: false,
                table_id: None,
            },
        }
    }

    /// Content-based heading fallback for styleless paragraphs
    pub fn looks_like_heading(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        // Overlong text, or text that closes a sentence, is body copy
        if text.chars().count() > MAX_HEADING_CHARS || ends_with_terminator_char(text) {
            return false;
        }
        let stripped = text.trim();
        self.heading_patterns.iter().any(|p| p.is_match(stripped))
    }
}

/// Trim and apply Unicode NFC so character counts are stable across
/// composed/decomposed inputs
fn normalize(text: &str) -> String {
    text.trim().nfc().collect()
}

/// Plain terminator-character check, without the detector's abbreviation
/// guards; used only for heading rejection
fn ends_with_terminator_char(text: &str) -> bool {
    matches!(
        text.trim_end().chars().last(),
        Some('。' | '！' | '？' | '；' | '.' | '!' | '?' | ';')
    )
}

fn heading_level_from_style(style: &str) -> Option<u8> {
    let rest = style
        .strip_prefix("Heading")
        .or_else(|| style.strip_prefix("标题"))?;
    let digits: String = rest.chars().filter(|c| c.is_ascii_digit()).collect();
    Some(digits.parse().unwrap_or(1))
}

fn is_list_item(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some('•' | '-' | '*'), _) => true,
        (Some(first), Some(second)) if first.is_ascii_digit() => {
            matches!(second, '.' | '、' | ')')
        }
        _ => false,
    }
}
