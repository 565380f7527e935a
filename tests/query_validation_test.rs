//! Integration tests for query validation.
//!
//! These tests verify that the read-only guard rejects anything that is
//! not a leading-SELECT statement and anything mentioning a mutating
//! keyword, while leaving legitimate read queries alone.

use sql_agent_mcp_server::tools::sql_guard::{ValidationOutcome, validate};

fn reason(query: &str) -> String {
    match validate(query) {
        ValidationOutcome::Rejected { reason } => reason,
        ValidationOutcome::Accepted => panic!("expected rejection for: {}", query),
    }
}

/// Test that a plain SELECT is accepted.
#[test]
fn test_select_accepted() {
    assert!(validate("SELECT * FROM Track WHERE TrackId = 1").is_accepted());
}

/// Test that leading whitespace and arbitrary casing are ignored.
#[test]
fn test_select_accepted_case_insensitive() {
    assert!(validate("   sElEcT Name FROM Artist").is_accepted());
    assert!(validate("\n\nselect 1").is_accepted());
}

/// Test that INSERT is rejected by the leading-keyword rule.
#[test]
fn test_insert_rejected() {
    assert_eq!(
        reason("INSERT INTO Track (Name) VALUES ('x')"),
        "only read queries are permitted"
    );
}

/// Test that UPDATE is rejected by the leading-keyword rule.
#[test]
fn test_update_rejected() {
    assert_eq!(
        reason("UPDATE Track SET Name = 'x' WHERE TrackId = 1"),
        "only read queries are permitted"
    );
}

/// Test that DELETE is rejected by the leading-keyword rule.
#[test]
fn test_delete_rejected() {
    assert_eq!(
        reason("DELETE FROM Track WHERE TrackId = 1"),
        "only read queries are permitted"
    );
}

/// Test that stored procedure execution is rejected.
#[test]
fn test_exec_rejected() {
    assert_eq!(reason("EXEC sp_helpdb"), "only read queries are permitted");
}

/// Test that empty and whitespace-only input is rejected.
#[test]
fn test_empty_input_rejected() {
    assert_eq!(reason(""), "only read queries are permitted");
    assert_eq!(reason("   \n\t  "), "only read queries are permitted");
}

/// Test that a SELECT smuggling a mutating statement is rejected with the
/// forbidden-keyword reason.
#[test]
fn test_stacked_mutation_rejected() {
    assert_eq!(
        reason("SELECT 1; DROP TABLE Track"),
        "forbidden keyword: DROP"
    );
    assert_eq!(
        reason("SELECT 1; TRUNCATE TABLE Track"),
        "forbidden keyword: TRUNCATE"
    );
}

/// Test that forbidden words are matched case-insensitively.
#[test]
fn test_forbidden_keyword_case_insensitive() {
    assert_eq!(
        reason("SELECT 1; dRoP tAbLe Track"),
        "forbidden keyword: DROP"
    );
}

/// Test that a forbidden word inside a string literal still rejects.
/// Over-strict on purpose: literals are not parsed.
#[test]
fn test_forbidden_word_in_literal_rejected() {
    assert_eq!(
        reason("SELECT * FROM Log WHERE Message = 'DROP it like it''s hot'"),
        "forbidden keyword: DROP"
    );
}

/// Test that deny words embedded in longer identifiers do not reject.
#[test]
fn test_identifier_containing_deny_word_accepted() {
    assert!(validate("SELECT updated_at, created_at FROM Audit").is_accepted());
    assert!(validate("SELECT delete_flag FROM Customer").is_accepted());
    assert!(validate("SELECT * FROM AlterationLog").is_accepted());
}

/// Test that the first deny-list word (in list order) is the one reported.
#[test]
fn test_report_order_follows_deny_list() {
    // INSERT appears before DELETE in the text, DELETE before INSERT in
    // the deny-list.
    assert_eq!(
        reason("SELECT 1; INSERT INTO t VALUES (1); DELETE FROM t"),
        "forbidden keyword: DELETE"
    );
}

/// Test that CTE-leading text is rejected: only statements leading with
/// SELECT are permitted.
#[test]
fn test_cte_rejected() {
    assert_eq!(
        reason("WITH t AS (SELECT 1 AS n) SELECT n FROM t"),
        "only read queries are permitted"
    );
}
