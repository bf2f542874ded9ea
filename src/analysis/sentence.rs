//! Rule-based sentence boundary detection
//!
//! Decides whether a character position ends a sentence, handling both
//! full-width CJK punctuation and Latin punctuation with abbreviation,
//! initial, and decimal-point guards. Deterministic and rule-based; no
//! learned model is involved.

use lru::LruCache;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::num::NonZeroUsize;

/// Full-width sentence terminators used in CJK text
const CJK_TERMINATORS: [char; 4] = ['。', '！', '？', '；'];

/// Latin-script sentence terminators
const LATIN_TERMINATORS: [char; 4] = ['.', '!', '?', ';'];

/// Closing quotes/brackets that may trail a terminator without breaking it
const CLOSING_QUOTES: [char; 8] = ['"', '\'', '”', '’', '»', '」', '』', '）'];

/// Abbreviations whose trailing period does not end a sentence
const ABBREVIATIONS: [&str; 18] = [
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "approx", "dept", "fig",
    "no", "inc", "ltd", "co", "al",
];

fn is_terminator(c: char) -> bool {
    CJK_TERMINATORS.contains(&c) || LATIN_TERMINATORS.contains(&c)
}

/// Sentence boundary detector with a per-run memoization table.
///
/// One detector is constructed per document run and discarded with it; the
/// memo table is never shared across documents, so concurrent runs need no
/// locking.
pub struct SentenceDetector {
    cache: LruCache<u64, bool>,
}

impl SentenceDetector {
    /// Create a detector whose memo table holds up to `cache_size` entries
    pub fn new(cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Return true when `position` (a character offset in `[0, chars]`,
    /// clamped if beyond) falls immediately after the end of a sentence.
    pub fn is_sentence_end(&mut self, text: &str, position: usize) -> bool {
        let key = fingerprint(text, position);
        if let Some(&cached) = self.cache.get(&key) {
            return cached;
        }
        let result = sentence_end_uncached(text, position);
        self.cache.put(key, result);
        result
    }

    /// Return true when the trailing (trimmed) character run of `text` ends
    /// a sentence.
    pub fn ends_with_terminator(&mut self, text: &str) -> bool {
        let trimmed = text.trim_end();
        self.is_sentence_end(trimmed, trimmed.chars().count())
    }
}

/// Structural fingerprint of a `(text, position)` query
fn fingerprint(text: &str, position: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    position.hash(&mut hasher);
    hasher.finish()
}

fn sentence_end_uncached(text: &str, position: usize) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let p = position.min(chars.len());
    if p == 0 {
        return false;
    }

    let c = chars[p - 1];

    // A closing quote/bracket ends a sentence only when it directly follows
    // a terminator: 他说“好。” / He said "go."
    if CLOSING_QUOTES.contains(&c) {
        return p >= 2 && is_terminator(chars[p - 2]);
    }

    if CJK_TERMINATORS.contains(&c) {
        return true;
    }

    if LATIN_TERMINATORS.contains(&c) {
        if c == '.' && !period_ends_sentence(&chars, p) {
            return false;
        }
        return true;
    }

    false
}

/// Guards for the ambiguous Latin period at char index `p - 1`
fn period_ends_sentence(chars: &[char], p: usize) -> bool {
    // Decimal point: digits on both sides (3.14)
    if p >= 2
        && chars[p - 2].is_ascii_digit()
        && p < chars.len()
        && chars[p].is_ascii_digit()
    {
        return false;
    }

    // Single-letter initial: "J. Smith", "D.C.", also "e.g." / "i.e."
    // where the letter itself follows a period
    if p >= 2 && chars[p - 2].is_alphabetic() && (p == 2 || !chars[p - 3].is_alphabetic()) {
        let single = chars[p - 2];
        if single.is_uppercase() || (p >= 3 && chars[p - 3] == '.') {
            return false;
        }
    }

    // Known abbreviation word right before the period
    let word: String = chars[..p - 1]
        .iter()
        .rev()
        .take_while(|c| c.is_alphabetic())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if !word.is_empty() && ABBREVIATIONS.contains(&word.to_lowercase().as_str()) {
        return false;
    }

    true
}
