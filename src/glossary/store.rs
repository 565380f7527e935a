//! Glossary document loading and lookups.
//!
//! The backing document is optional by design: a missing or malformed file
//! degrades the store to "no context available" and the cause goes to the
//! diagnostic channel. Callers never see a glossary fault.

use crate::error::{GatewayError, GatewayResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// One domain concept with its detection synonyms and display text.
///
/// Concepts are kept in document order; the annotator emits matches in
/// this order.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessConcept {
    /// Canonical concept name, matched against query text like a synonym.
    pub key: String,
    /// Display label, may carry an icon glyph.
    pub label: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    pub description: String,
    /// Present for hierarchical concepts (e.g. artists > albums > tracks).
    #[serde(default)]
    pub hierarchy: Option<String>,
}

/// The parsed glossary document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlossaryDocument {
    #[serde(default)]
    pub concepts: Vec<BusinessConcept>,
    /// Calculation descriptions keyed `total_revenue`, `frequency`, `average`.
    #[serde(default)]
    pub calculations: HashMap<String, String>,
}

/// One-time loaded, read-only glossary store.
pub struct GlossaryStore {
    document: Option<GlossaryDocument>,
}

impl GlossaryStore {
    /// Load the glossary from disk, degrading to an empty store on failure.
    pub fn load(path: &Path) -> Self {
        match read_document(path) {
            Ok(document) => {
                info!(
                    path = %path.display(),
                    concepts = document.concepts.len(),
                    "Glossary loaded"
                );
                Self {
                    document: Some(document),
                }
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Glossary unavailable, serving without business context"
                );
                Self::empty()
            }
        }
    }

    /// A store with no backing document.
    pub fn empty() -> Self {
        Self { document: None }
    }

    /// Build a store from an in-memory document.
    pub fn from_document(document: GlossaryDocument) -> Self {
        Self {
            document: Some(document),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Concepts in document order; empty when no document is loaded.
    pub fn concepts(&self) -> &[BusinessConcept] {
        self.document
            .as_ref()
            .map(|d| d.concepts.as_slice())
            .unwrap_or(&[])
    }

    /// Look up a calculation description by key.
    pub fn calculation(&self, key: &str) -> Option<&str> {
        self.document
            .as_ref()
            .and_then(|d| d.calculations.get(key))
            .map(String::as_str)
    }
}

fn read_document(path: &Path) -> GatewayResult<GlossaryDocument> {
    let text = fs::read_to_string(path).map_err(|e| GatewayError::glossary(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| GatewayError::glossary(e.to_string()))
}
