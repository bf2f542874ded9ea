//! End-to-end segmentation tests
//!
//! Exercises the public planning API against the engine's guaranteed
//! properties: split monotonicity, table integrity, soft length bounds,
//! and sentence preference.

use splitmark::{Config, RawElement, Segmenter, SplitStats};

fn paragraph(text: &str) -> RawElement {
    RawElement::Paragraph {
        text: text.to_string(),
        style: None,
    }
}

fn heading(text: &str, level: u8) -> RawElement {
    RawElement::Heading {
        text: text.to_string(),
        level: Some(level),
    }
}

fn table_segment(text: &str, id: u32) -> RawElement {
    RawElement::Table {
        text: text.to_string(),
        table_id: Some(id),
    }
}

/// A paragraph of roughly `chars` characters built from full sentences
fn prose(chars: usize) -> String {
    let sentence = "The quick brown fox jumps over the lazy dog. ";
    sentence.repeat(chars / sentence.len() + 1)[..chars].trim_end().to_string() + "."
}

#[test]
fn test_heading_scenario_single_split_before_heading() {
    let mut config = Config::default();
    config.segmentation.min_length = 300;
    config.segmentation.max_length = 1000;
    config.segmentation.sentence_integrity_weight = 8.0;
    config.scoring.min_split_score = 7.0;
    config.scoring.heading_score_bonus = 10.0;
    // Exercise the scored path rather than the forced-heading rule
    config.scoring.force_split_before_heading = false;

    let elements = vec![
        paragraph(&prose(600)),
        heading("Results", 1),
        paragraph(&prose(500)),
    ];

    let segmenter = Segmenter::new(config).unwrap();
    let plan = segmenter.segment(&elements);

    // Heading bonus plus sentence-end bonus clears the threshold between
    // A and H; H and B stay together under max_length.
    assert_eq!(plan.splits, vec![0]);
    assert_eq!(plan.stats.chunk_count, 2);
}

#[test]
fn test_oversized_single_paragraph_is_reported_not_split() {
    let mut config = Config::default();
    config.segmentation.max_length = 1000;

    let elements = vec![paragraph(&"An unbroken stream of words ".repeat(180))];
    let segmenter = Segmenter::new(config).unwrap();
    let plan = segmenter.segment(&elements);

    assert!(plan.splits.is_empty());
    assert_eq!(plan.stats.chunk_count, 1);
    assert_eq!(plan.stats.oversized_chunks, 1);
    assert!(plan.stats.max_chunk_length > 1000);
}

#[test]
fn test_empty_document() {
    let segmenter = Segmenter::new(Config::default()).unwrap();
    let plan = segmenter.segment(&[]);

    assert!(plan.splits.is_empty());
    assert!(plan.mid_sentence_splits.is_empty());
    assert_eq!(plan.stats, SplitStats::default());
}

#[test]
fn test_no_split_inside_table_spanning_elements_4_to_9() {
    let mut elements: Vec<RawElement> = (0..4).map(|_| paragraph(&prose(350))).collect();
    elements.extend((0..6).map(|row| table_segment(&format!("row {} cells", row), 1)));
    elements.push(paragraph(&prose(400)));

    let segmenter = Segmenter::new(Config::default()).unwrap();
    let plan = segmenter.segment(&elements);

    assert!(!plan.splits.is_empty());
    for split in &plan.splits {
        assert!(
            !(4..=8).contains(split),
            "split {} falls inside the table run",
            split
        );
    }
}

#[test]
fn test_splits_are_strictly_increasing_and_in_range() {
    let elements: Vec<RawElement> = (0..40).map(|_| paragraph(&prose(380))).collect();

    let segmenter = Segmenter::new(Config::default()).unwrap();
    let plan = segmenter.segment(&elements);

    assert!(!plan.splits.is_empty());
    assert!(plan.splits.windows(2).all(|w| w[0] < w[1]));
    assert!(plan.splits.iter().all(|&s| s < elements.len() - 1));
}

#[test]
fn test_soft_length_bounds_hold_for_all_but_the_tail() {
    let config = Config::default();
    let min = config.segmentation.min_length;
    let max = config.segmentation.max_length;

    let elements: Vec<RawElement> = (0..30).map(|_| paragraph(&prose(420))).collect();
    let segmenter = Segmenter::new(config).unwrap();
    let plan = segmenter.segment(&elements);

    assert_eq!(plan.stats.oversized_chunks, 0);
    assert_eq!(plan.stats.undersized_chunks, 0);
    // Here even the tail lands inside the configured bounds
    assert!(plan.stats.max_chunk_length <= max);
    assert!(plan.stats.min_chunk_length >= min);
}

#[test]
fn test_sentence_preference_no_mid_sentence_cuts() {
    // Every element closes a sentence, so every chosen position is
    // already a sentence boundary.
    let elements: Vec<RawElement> = (0..25).map(|_| paragraph(&prose(400))).collect();

    let segmenter = Segmenter::new(Config::default()).unwrap();
    let plan = segmenter.segment(&elements);

    assert!(!plan.splits.is_empty());
    assert_eq!(plan.stats.mid_sentence_splits, 0);
    assert!(plan.mid_sentence_splits.is_empty());
}

#[test]
fn test_chinese_document_splits_on_sentence_ends() {
    let elements = vec![
        paragraph(&"北国风光，千里冰封，万里雪飘。".repeat(25)),
        paragraph(&"望长城内外，惟余莽莽。".repeat(30)),
        paragraph(&"大河上下，顿失滔滔。".repeat(30)),
    ];

    let segmenter = Segmenter::new(Config::default()).unwrap();
    let plan = segmenter.segment(&elements);

    assert!(!plan.splits.is_empty());
    assert_eq!(plan.stats.mid_sentence_splits, 0);
}

#[test]
fn test_forced_heading_split_keeps_heading_with_section() {
    let elements = vec![
        paragraph(&prose(500)),
        heading("第二章 方法", 1),
        paragraph(&prose(200)),
        paragraph(&prose(200)),
    ];

    let segmenter = Segmenter::new(Config::default()).unwrap();
    let plan = segmenter.segment(&elements);

    // The marker lands directly in front of the heading, nowhere inside
    // the fresh section.
    assert_eq!(plan.splits, vec![0]);
}

#[test]
fn test_plans_are_deterministic() {
    let elements: Vec<RawElement> = (0..20)
        .map(|i| {
            if i % 7 == 3 {
                heading("Section", 2)
            } else {
                paragraph(&prose(350))
            }
        })
        .collect();

    let segmenter = Segmenter::new(Config::default()).unwrap();
    let first = segmenter.segment(&elements);
    let second = segmenter.segment(&elements);

    assert_eq!(first.splits, second.splits);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_degenerate_whitespace_document() {
    let elements: Vec<RawElement> = (0..5).map(|_| paragraph("   ")).collect();

    let segmenter = Segmenter::new(Config::default()).unwrap();
    let plan = segmenter.segment(&elements);

    assert!(plan.splits.is_empty());
    assert_eq!(plan.stats.total_length, 0);
}
