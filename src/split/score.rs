//! Boundary scoring
//!
//! The desirability of splitting between two adjacent elements is the sum
//! of a small set of independent terms, each testable in isolation: length
//! proximity, sentence integrity, heading placement, and local structure.
//! Scoring is a pure function: identical arguments always produce the
//! identical float.

use crate::analysis::{DocumentElement, ElementKind, is_boundary_candidate};
use crate::config::Config;

/// Sentinel score for boundaries that must never be selected, such as gaps
/// strictly inside a table run
pub const UNSPLITTABLE: f64 = f64::NEG_INFINITY;

/// Ratio of `sentence_integrity_weight` charged for cutting mid-sentence
const MID_SENTENCE_PENALTY_RATIO: f64 = 1.25;

/// Flat bonus when the open chunk ends at a table
const TABLE_BOUNDARY_BONUS: f64 = 2.0;

/// Flat penalty when the open chunk ends at a list item
const LIST_ITEM_PENALTY: f64 = 2.0;

/// Slope of the penalty ramp past `max_length`, in proximity units per
/// half-range of overshoot
const OVERLENGTH_SLOPE: f64 = 3.0;

/// Score the boundary between `prev` and `next` given the length of the
/// open chunk ending at `prev`. Higher is more desirable.
pub fn score_boundary(
    prev: &DocumentElement,
    next: &DocumentElement,
    accumulated: usize,
    config: &Config,
) -> f64 {
    if !is_boundary_candidate(prev, next) {
        return UNSPLITTABLE;
    }

    length_term(accumulated, config)
        + sentence_term(prev, config)
        + heading_term(prev, next, config)
        + structure_term(prev)
}

/// Length-proximity term: peaks when the open chunk sits at the midpoint of
/// `[min_length, max_length]`, dips mildly below the minimum, and falls
/// steeply past the maximum so the selector backs off to an earlier
/// boundary.
pub(crate) fn length_term(accumulated: usize, config: &Config) -> f64 {
    config.scoring.length_score_factor
        * length_proximity(
            accumulated,
            config.segmentation.min_length,
            config.segmentation.max_length,
        )
}

fn length_proximity(len: usize, min: usize, max: usize) -> f64 {
    let (len, min_f, max_f) = (len as f64, min as f64, max as f64);
    let mid = (min_f + max_f) / 2.0;
    let half = ((max_f - min_f) / 2.0).max(1.0);

    if len < min_f {
        // In (-1, 0): discouraged, not forbidden
        (len - min_f) / min_f.max(1.0)
    } else if len > max_f {
        -OVERLENGTH_SLOPE * (len - max_f) / half
    } else {
        // In [0, 1], peak at the midpoint
        1.0 - (len - mid).abs() / half
    }
}

/// Sentence-integrity term: rewards chunks that close at a sentence
/// terminator, charges a weight-proportional penalty for cutting
/// mid-sentence.
pub(crate) fn sentence_term(prev: &DocumentElement, config: &Config) -> f64 {
    let weight = config.segmentation.sentence_integrity_weight;
    if prev.ends_with_terminator {
        weight * config.scoring.sentence_end_score_bonus
    } else {
        -MID_SENTENCE_PENALTY_RATIO * weight
    }
}

/// Heading term: splitting right before a heading keeps the heading with
/// its section; splitting right after one orphans it.
pub(crate) fn heading_term(
    prev: &DocumentElement,
    next: &DocumentElement,
    config: &Config,
) -> f64 {
    let mut term = 0.0;
    if next.is_heading() {
        term += config.scoring.heading_score_bonus;
    }
    if prev.is_heading() {
        term -= config.scoring.heading_after_penalty;
    }
    term
}

/// Local structure term: the gap after a table is a clean cut; the gap
/// after a list item usually is not.
pub(crate) fn structure_term(prev: &DocumentElement) -> f64 {
    let mut term = 0.0;
    if prev.kind == ElementKind::Table {
        term += TABLE_BOUNDARY_BONUS;
    }
    if prev.is_list_item {
        term -= LIST_ITEM_PENALTY;
    }
    term
}
