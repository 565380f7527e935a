//! Read-only guard for submitted query text.
//!
//! This module decides whether free-form SQL text is safe to hand to the
//! database: the statement must lead with `SELECT` and must not mention any
//! mutating keyword. Matching is deliberately keyword-based rather than a
//! full SQL parse: deny words are compared against whole tokens (split on
//! non-identifier characters), so a word embedded in a longer identifier
//! (`updated_at`, `delete_flag`) passes while the same word anywhere else,
//! including inside a string literal, rejects. Over-strictness is the
//! accepted trade-off.
//!
//! The deny-list mirrors the seven statement forms the gateway was asked to
//! block. Vendor-specific forms (MERGE, EXEC, BULK INSERT) already fail the
//! leading-SELECT rule; widening the list is pending sign-off from the
//! security owner.

/// Mutating keywords, in reporting order.
const FORBIDDEN_KEYWORDS: [&str; 7] = [
    "DROP", "DELETE", "UPDATE", "INSERT", "ALTER", "CREATE", "TRUNCATE",
];

/// The read-query keyword every accepted statement must lead with.
const READ_KEYWORD: &str = "SELECT";

/// Outcome of validating submitted query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Text is safe to execute.
    Accepted,
    /// Text was rejected; `reason` is surfaced verbatim to the caller.
    Rejected { reason: String },
}

impl ValidationOutcome {
    fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Check whether the outcome is an acceptance.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Validate query text for read-only execution.
///
/// Pure and deterministic: trims and upper-cases a working copy for
/// comparison only; the caller executes the original text.
///
/// # Examples
///
/// ```
/// use sql_agent_mcp_server::tools::sql_guard::{validate, ValidationOutcome};
///
/// assert!(validate("SELECT * FROM Track").is_accepted());
/// assert!(matches!(
///     validate("DELETE FROM Track"),
///     ValidationOutcome::Rejected { .. }
/// ));
/// ```
pub fn validate(query: &str) -> ValidationOutcome {
    let normalized = query.trim().to_uppercase();
    let mut tokens = normalized
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty());

    if tokens.next() != Some(READ_KEYWORD) {
        return ValidationOutcome::rejected("only read queries are permitted");
    }

    let tokens: Vec<&str> = tokens.collect();
    for word in FORBIDDEN_KEYWORDS {
        if tokens.iter().any(|t| *t == word) {
            return ValidationOutcome::rejected(format!("forbidden keyword: {}", word));
        }
    }

    ValidationOutcome::Accepted
}
