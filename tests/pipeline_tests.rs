//! Pipeline tests: JSON elements in, rendered output and reports out
//!
//! Covers the interchange surface the front ends sit on: reading element
//! files, rendering chunks and markers, and the parallel batch path.

use splitmark::{
    Config, RawElement, SPLIT_MARKER, Segmenter, chunk_texts, read_elements, render_marked_text,
    segment_files,
};
use std::path::PathBuf;

fn write_document(dir: &std::path::Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path
}

fn sectioned_document_json() -> String {
    let body = "春眠不觉晓，处处闻啼鸟。".repeat(30);
    format!(
        r#"[
            {{"kind": "heading", "text": "第一章", "level": 1}},
            {{"kind": "paragraph", "text": "{body}"}},
            {{"kind": "heading", "text": "第二章", "level": 1}},
            {{"kind": "paragraph", "text": "{body}"}},
            {{"kind": "table", "text": "名称 数值 单位", "table_id": 0}}
        ]"#
    )
}

#[test]
fn test_read_segment_render_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path(), "doc.json", &sectioned_document_json());

    let raw = read_elements(&path).unwrap();
    assert_eq!(raw.len(), 5);

    let segmenter = Segmenter::new(Config::default()).unwrap();
    let plan = segmenter.segment(&raw);

    // One forced split in front of the second chapter heading
    assert_eq!(plan.splits, vec![1]);

    let chunks = chunk_texts(&raw, &plan.splits);
    assert_eq!(chunks.len(), plan.stats.chunk_count);
    assert!(chunks[0].starts_with("第一章"));
    assert!(chunks[1].starts_with("第二章"));

    let text = render_marked_text(&raw, &plan.splits);
    assert_eq!(text.matches(SPLIT_MARKER).count(), plan.splits.len());
}

#[test]
fn test_marker_count_matches_plan_for_plain_documents() {
    let paragraphs: Vec<String> = (0..12)
        .map(|i| format!(r#"{{"kind": "paragraph", "text": "Paragraph number {} ends cleanly. {}"}}"#,
            i, "More of the same sentence here. ".repeat(12).trim_end()))
        .collect();
    let json = format!("[{}]", paragraphs.join(","));

    let raw: Vec<RawElement> = serde_json::from_str(&json).unwrap();
    let segmenter = Segmenter::new(Config::default()).unwrap();
    let plan = segmenter.segment(&raw);

    assert!(!plan.splits.is_empty());
    let text = render_marked_text(&raw, &plan.splits);
    assert_eq!(text.matches(SPLIT_MARKER).count(), plan.splits.len());
}

#[test]
fn test_batch_over_mixed_files() {
    let dir = tempfile::tempdir().unwrap();
    let good_a = write_document(dir.path(), "a.json", &sectioned_document_json());
    let good_b = write_document(
        dir.path(),
        "b.json",
        r#"[{"kind": "paragraph", "text": "One small document."}]"#,
    );
    let broken = write_document(dir.path(), "broken.json", "not json at all");

    let segmenter = Segmenter::new(Config::default()).unwrap();
    let report = segment_files(&segmenter, &[good_a, good_b, broken.clone()]);

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert!(report.total_splits >= 1);

    let failure = report
        .files
        .iter()
        .find(|f| f.path == broken)
        .unwrap();
    assert!(!failure.is_success());
    assert!(failure.error.as_deref().unwrap().contains("JSON"));

    // The report serializes for the front end
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"succeeded\":2"));
}
