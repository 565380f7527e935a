//! Integration tests for glossary loading and context annotation.
//!
//! These tests exercise the full path from a glossary document on disk to
//! the business-context block, including the degradation behavior when the
//! document is missing or malformed.

use sql_agent_mcp_server::glossary::{ContextAnnotator, GlossaryStore};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

const GLOSSARY_JSON: &str = r#"{
    "concepts": [
        {
            "key": "sales",
            "label": "Sales",
            "synonyms": ["invoice", "ventas"],
            "description": "Invoices represent complete sales transactions. Totals are in USD."
        },
        {
            "key": "music",
            "label": "Music",
            "synonyms": ["track"],
            "description": "Tracks are individual songs with a unit price each."
        },
        {
            "key": "artists",
            "label": "Artists",
            "synonyms": ["artist"],
            "description": "Performing artists and their albums.",
            "hierarchy": "Artist > Album > Track"
        }
    ],
    "calculations": {
        "total_revenue": "Metric: total revenue calculation (SUM of Invoice.Total).",
        "frequency": "Count: frequency/volume analysis of the data.",
        "average": "Average: mean values for comparative analysis."
    }
}"#;

fn store_from(json: &str) -> Arc<GlossaryStore> {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write glossary");
    Arc::new(GlossaryStore::load(file.path()))
}

/// Test that a revenue query yields both the sales concept line and the
/// revenue calculation line.
#[test]
fn test_revenue_query_annotation() {
    let annotator = ContextAnnotator::new(store_from(GLOSSARY_JSON));
    let context = annotator.annotate("SELECT SUM(Total) AS total FROM Invoice");

    assert!(context.contains("Sales:"));
    assert!(context.contains("Metric: total revenue"));
}

/// Test that a trivial query produces no context at all.
#[test]
fn test_trivial_query_is_unannotated() {
    let annotator = ContextAnnotator::new(store_from(GLOSSARY_JSON));
    assert_eq!(annotator.annotate("SELECT 1"), "");
}

/// Test that a Spanish synonym triggers the same concept.
#[test]
fn test_spanish_synonym_matches() {
    let annotator = ContextAnnotator::new(store_from(GLOSSARY_JSON));
    let context = annotator.annotate("SELECT * FROM ventas_2024");
    assert!(context.contains("Sales:"));
}

/// Test that concept lines come first (in document order) and calculation
/// lines last.
#[test]
fn test_line_ordering() {
    let annotator = ContextAnnotator::new(store_from(GLOSSARY_JSON));
    let context =
        annotator.annotate("SELECT Artist.Name, COUNT(Track.TrackId) FROM Artist, Track");
    let lines: Vec<&str> = context.lines().collect();

    // "music" precedes "artists" in the document, count line is last.
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Music:"));
    assert!(lines[1].starts_with("Artists:"));
    assert!(lines[2].starts_with("Count:"));
}

/// Test that the hierarchy text is rendered for hierarchical concepts.
#[test]
fn test_hierarchy_rendered() {
    let annotator = ContextAnnotator::new(store_from(GLOSSARY_JSON));
    let context = annotator.annotate("SELECT Name FROM Artist");
    assert!(context.contains("Artist > Album > Track"));
}

/// Test that a missing document degrades to empty context, not a failure.
#[test]
fn test_missing_document_degrades() {
    let store = Arc::new(GlossaryStore::load(Path::new("/no/such/file.json")));
    assert!(!store.is_loaded());

    let annotator = ContextAnnotator::new(store);
    assert_eq!(annotator.annotate("SELECT SUM(Total) AS total FROM Invoice"), "");
}

/// Test that a malformed document degrades the same way.
#[test]
fn test_malformed_document_degrades() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"{ not json").expect("write glossary");

    let store = GlossaryStore::load(file.path());
    assert!(!store.is_loaded());
}

/// Test that aggregate detection works without any concept match.
#[test]
fn test_aggregate_only_annotation() {
    let annotator = ContextAnnotator::new(store_from(GLOSSARY_JSON));
    let context = annotator.annotate("SELECT AVG(Score) FROM Review");
    assert_eq!(context, "Average: mean values for comparative analysis.");
}
