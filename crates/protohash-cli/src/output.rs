//! Output formatting utilities.

use protohash::{Digest, PrimitiveKind};
use serde::Serialize;

/// Result of `protohash hash --json`.
#[derive(Debug, Serialize)]
pub struct HashReport {
    pub message: String,
    pub primitive: PrimitiveKind,
    pub digest: Digest,
}

/// Result of `protohash verify --json`.
#[derive(Debug, Serialize)]
pub struct VerifyReport {
    pub message: String,
    pub primitive: PrimitiveKind,
    pub expected: Digest,
    pub computed: Digest,
    pub matches: bool,
}

/// One row of `protohash messages`.
#[derive(Debug, Serialize)]
pub struct MessageSummary {
    pub name: String,
    pub fields: usize,
    pub file: String,
}

/// Formats a report as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a message summary as a simple table row.
pub fn format_table_row(summary: &MessageSummary) -> String {
    format!(
        "{:<48} {:>6} {}",
        truncate(&summary.name, 48),
        summary.fields,
        summary.file
    )
}

/// Prints table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<48} {:>6} {}", "MESSAGE", "FIELDS", "FILE");
    println!("{}", "-".repeat(80));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
