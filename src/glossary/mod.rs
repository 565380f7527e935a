//! Business glossary support.
//!
//! The glossary is a static document mapping domain concepts to synonyms
//! and descriptions. It is loaded once at startup and shared read-only:
//! - `store`: document loading and lookups
//! - `context`: query-text scanning that produces the business-context block

pub mod context;
pub mod store;

pub use context::ContextAnnotator;
pub use store::{BusinessConcept, GlossaryDocument, GlossaryStore};
