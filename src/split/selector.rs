//! Split-point selection and boundary correction
//!
//! A single forward pass over the document's boundaries: the open chunk
//! accumulates element lengths (`Scanning`), boundaries past the scan floor
//! are scored (`Evaluating`), and an accepted boundary commits a split and
//! resets the accumulator (`Committed`). Document end forces the final
//! implicit boundary. Each decision depends on all prior decisions, so the
//! pass is strictly sequential.

use crate::analysis::{DocumentElement, is_boundary_candidate};
use crate::config::Config;
use crate::split::score::score_boundary;

/// Fraction of `min_length` the open chunk must reach before boundaries are
/// scored at all; keeps degenerate inputs from being over-split.
const SCAN_FLOOR_RATIO: f64 = 0.5;

/// Committed result of one selection pass
#[derive(Debug, Clone, Default)]
pub struct SplitOutcome {
    /// Element positions after which a marker is inserted; strictly
    /// increasing
    pub splits: Vec<usize>,
    /// Subset of `splits` that could not be corrected onto a sentence
    /// boundary within the search window
    pub mid_sentence_splits: Vec<usize>,
}

/// Walks a document once and commits split positions
pub struct SplitSelector<'a> {
    config: &'a Config,
    scan_floor: usize,
}

/// Mutable scan state between commits
struct PassState {
    accumulated: usize,
    last_commit: Option<usize>,
    /// Earliest highest-scoring boundary since the last commit, kept for
    /// the overflow fallback
    best: Option<(usize, f64)>,
    cooldown: usize,
    splits: Vec<usize>,
    mid_sentence: Vec<usize>,
}

impl<'a> SplitSelector<'a> {
    /// The configuration must already be validated (see
    /// [`Config::validate`]); the selector does not re-check it.
    pub fn new(config: &'a Config) -> Self {
        let scan_floor = (config.segmentation.min_length as f64 * SCAN_FLOOR_RATIO) as usize;
        Self { config, scan_floor }
    }

    /// Select split positions for `elements`, in document order.
    ///
    /// Returns strictly-increasing positions in `[0, len - 2]`; the tail
    /// after the last split forms the final implicit chunk.
    pub fn select(&self, elements: &[DocumentElement]) -> SplitOutcome {
        let n = elements.len();
        if n == 0 {
            return SplitOutcome::default();
        }

        let seg = &self.config.segmentation;
        let scoring = &self.config.scoring;

        let mut state = PassState {
            accumulated: 0,
            last_commit: None,
            best: None,
            cooldown: 0,
            splits: Vec::new(),
            mid_sentence: Vec::new(),
        };

        for i in 0..n {
            // Elements consumed by a rightward-corrected commit
            if state.last_commit.is_some_and(|c| i <= c) {
                continue;
            }

            state.accumulated += elements[i].length;
            if i + 1 == n {
                break;
            }

            let prev = &elements[i];
            let next = &elements[i + 1];

            if !is_boundary_candidate(prev, next) {
                continue;
            }

            // A heading forces a split in front of itself once the open
            // chunk is long enough, regardless of score. The gap may sit
            // after an empty spacer element.
            if scoring.force_split_before_heading
                && next.is_heading()
                && state.accumulated >= seg.min_length
            {
                log::debug!(
                    "boundary {}: forced split before heading (accumulated {})",
                    i,
                    state.accumulated
                );
                self.commit(elements, i, true, i, &mut state);
                state.cooldown = scoring.heading_cooldown_elements;
                continue;
            }

            // Empty elements accumulate nothing and never host a candidate
            if prev.length == 0 {
                continue;
            }

            // Fresh section after a forced heading split: accumulate only
            if state.cooldown > 0 {
                state.cooldown -= 1;
                continue;
            }

            if state.accumulated < self.scan_floor {
                continue;
            }

            let score = score_boundary(prev, next, state.accumulated, self.config);
            log::debug!(
                "boundary {}: score {:.2} (accumulated {})",
                i,
                score,
                state.accumulated
            );

            // Earliest-wins tracking for the overflow fallback
            match state.best {
                Some((_, best_score)) if best_score >= score => {}
                _ => state.best = Some((i, score)),
            }

            if state.accumulated >= seg.min_length && score >= scoring.min_split_score {
                self.commit(elements, i, false, i, &mut state);
            } else if state.accumulated > seg.max_length {
                // No acceptable boundary before the cap: retroactively take
                // the best one scanned since the last commit.
                if let Some((fallback, fallback_score)) = state.best {
                    log::debug!(
                        "boundary {}: over max_length, falling back to {} (score {:.2})",
                        i,
                        fallback,
                        fallback_score
                    );
                    self.commit(elements, fallback, false, i, &mut state);
                }
            }
        }

        finish(elements, state)
    }

    /// Commit a split at `raw` (corrected unless the split is a forced
    /// heading split), then reset the accumulator relative to `scan_pos`.
    fn commit(
        &self,
        elements: &[DocumentElement],
        raw: usize,
        forced: bool,
        scan_pos: usize,
        state: &mut PassState,
    ) {
        let (position, mid_sentence) = if forced {
            (raw, false)
        } else {
            self.correct_boundary(elements, raw, state.last_commit)
        };

        if mid_sentence {
            log::debug!("split {}: no sentence boundary within window, keeping raw cut", raw);
            state.mid_sentence.push(position);
        } else if position != raw {
            log::debug!("split {}: corrected to sentence boundary at {}", raw, position);
        }

        state.splits.push(position);
        state.last_commit = Some(position);
        state.best = None;
        state.accumulated = if position < scan_pos {
            elements[position + 1..=scan_pos].iter().map(|e| e.length).sum()
        } else {
            0
        };
    }

    /// Move a raw split to the nearest legal sentence boundary within the
    /// search window. Nearest by element distance; ties prefer the earlier
    /// position. Splits already on a sentence boundary, or directly in
    /// front of a heading, stay put. Returns the position and whether the
    /// cut remains mid-sentence.
    fn correct_boundary(
        &self,
        elements: &[DocumentElement],
        raw: usize,
        last_commit: Option<usize>,
    ) -> (usize, bool) {
        if elements[raw].ends_with_terminator || elements[raw + 1].is_heading() {
            return (raw, false);
        }

        let floor = last_commit.map_or(0, |c| c + 1);
        let n = elements.len();

        for distance in 1..=self.config.analysis.search_window {
            if let Some(j) = raw.checked_sub(distance) {
                if j >= floor && valid_correction(elements, j) {
                    return (j, false);
                }
            }
            let j = raw + distance;
            if j + 1 < n && valid_correction(elements, j) {
                return (j, false);
            }
        }

        (raw, true)
    }
}

/// A correction target must close a sentence, sit on a legal gap, and not
/// orphan a heading.
fn valid_correction(elements: &[DocumentElement], j: usize) -> bool {
    let el = &elements[j];
    el.length > 0
        && el.ends_with_terminator
        && !el.is_heading()
        && is_boundary_candidate(el, &elements[j + 1])
}

/// Final pass: drop splits that would leave a heading at the end of a
/// chunk, detached from its section.
fn finish(elements: &[DocumentElement], state: PassState) -> SplitOutcome {
    let splits: Vec<usize> = state
        .splits
        .into_iter()
        .filter(|&s| {
            let keep = !elements[s].is_heading();
            if !keep {
                log::debug!("split {}: dropped, would orphan a heading", s);
            }
            keep
        })
        .collect();

    let mid_sentence_splits = state
        .mid_sentence
        .into_iter()
        .filter(|s| splits.binary_search(s).is_ok())
        .collect();

    SplitOutcome {
        splits,
        mid_sentence_splits,
    }
}
