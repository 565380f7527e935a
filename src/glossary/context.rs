//! Business-context annotation of query text.
//!
//! The annotator scans the original query text for known domain concepts
//! and aggregate-function patterns and produces a newline-joined block of
//! one-line summaries. It never fails: with no glossary loaded, or nothing
//! matched, the output is simply empty.

use crate::glossary::store::{BusinessConcept, GlossaryStore};
use std::sync::Arc;

/// Fallback lines when the document carries no calculation descriptions.
const FALLBACK_REVENUE: &str = "Metric: total revenue calculation (SUM over invoice totals).";
const FALLBACK_FREQUENCY: &str = "Count: frequency/volume analysis of the matched rows.";
const FALLBACK_AVERAGE: &str = "Average: mean value calculation for comparative analysis.";

pub struct ContextAnnotator {
    store: Arc<GlossaryStore>,
}

impl ContextAnnotator {
    pub fn new(store: Arc<GlossaryStore>) -> Self {
        Self { store }
    }

    /// Produce the business-context block for a query, possibly empty.
    ///
    /// Concept lines come first, in the store's concept order, one line per
    /// matched concept. Calculation lines follow in fixed order: revenue
    /// (`SUM(` together with `total`), count, average.
    pub fn annotate(&self, query: &str) -> String {
        let folded = query.to_lowercase();
        let mut lines: Vec<String> = Vec::new();

        for concept in self.store.concepts() {
            if concept_matches(concept, &folded) {
                lines.push(concept_line(concept));
            }
        }

        if folded.contains("sum(") && folded.contains("total") {
            lines.push(self.calculation_line("total_revenue", FALLBACK_REVENUE));
        }
        if folded.contains("count(") {
            lines.push(self.calculation_line("frequency", FALLBACK_FREQUENCY));
        }
        if folded.contains("avg(") {
            lines.push(self.calculation_line("average", FALLBACK_AVERAGE));
        }

        lines.join("\n")
    }

    fn calculation_line(&self, key: &str, fallback: &str) -> String {
        self.store
            .calculation(key)
            .unwrap_or(fallback)
            .to_string()
    }
}

/// A concept matches when its key or any synonym occurs as a substring of
/// the folded query text. First match wins; one line per concept.
fn concept_matches(concept: &BusinessConcept, folded_query: &str) -> bool {
    std::iter::once(concept.key.as_str())
        .chain(concept.synonyms.iter().map(String::as_str))
        .any(|term| !term.is_empty() && folded_query.contains(&term.to_lowercase()))
}

fn concept_line(concept: &BusinessConcept) -> String {
    match &concept.hierarchy {
        Some(hierarchy) => format!(
            "{}: {} Hierarchy: {}.",
            concept.label, concept.description, hierarchy
        ),
        None => format!("{}: {}", concept.label, concept.description),
    }
}
