//! Line-level diff of expression text.
//!
//! Produces only the inserted and deleted lines of a unified diff: no hunk
//! headers, no context. Within each contiguous change block, deletions are
//! emitted before insertions.

use similar::{ChangeTag, TextDiff};

use crate::config::DiffConfig;
use crate::diff::ExpressionLine;
use crate::model::Expression;

/// Lines of an optional expression, with the placeholder standing in for a missing one.
pub fn expression_lines<'a>(expr: Option<&'a Expression>, placeholder: &'a str) -> Vec<&'a str> {
    match expr {
        Some(expr) => expr.lines().iter().map(String::as_str).collect(),
        None => vec![placeholder],
    }
}

/// Diff two line sequences. Empty when they are identical.
pub fn diff_expression_lines(
    old: &[&str],
    new: &[&str],
    config: &DiffConfig,
) -> Vec<ExpressionLine> {
    if old == new {
        return Vec::new();
    }

    let diff = TextDiff::configure()
        .algorithm(config.line_diff_algorithm.into())
        .diff_slices(old, new);

    let mut out = Vec::new();
    let mut deleted: Vec<ExpressionLine> = Vec::new();
    let mut inserted: Vec<ExpressionLine> = Vec::new();

    for change in diff.iter_all_changes() {
        let text: &str = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                flush_block(&mut out, &mut deleted, &mut inserted);
            }
            ChangeTag::Delete => {
                if keep_line(text, config) {
                    deleted.push(ExpressionLine::Deleted(text.to_string()));
                }
            }
            ChangeTag::Insert => {
                if keep_line(text, config) {
                    inserted.push(ExpressionLine::Inserted(text.to_string()));
                }
            }
        }
    }
    flush_block(&mut out, &mut deleted, &mut inserted);

    out
}

fn keep_line(text: &str, config: &DiffConfig) -> bool {
    !(config.ignore_blank_lines && text.trim().is_empty())
}

fn flush_block(
    out: &mut Vec<ExpressionLine>,
    deleted: &mut Vec<ExpressionLine>,
    inserted: &mut Vec<ExpressionLine>,
) {
    out.append(deleted);
    out.append(inserted);
}
