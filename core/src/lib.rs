//! Model Diff: structural comparison of tabular model definitions.
//!
//! This crate provides functionality for:
//! - Loading model documents (UTF-16 or UTF-8 JSON) into a [`Model`]
//! - Diffing tables, regular and calculated columns, measures, and relationships
//! - Line-level diffs of calculated-column and measure expressions
//! - Rendering the result as report lines or JSON
//!
//! # Quick Start
//!
//! ```ignore
//! use model_diff::{DiffConfig, diff_files};
//!
//! let report = diff_files("before.json", "after.json", &DiffConfig::default())?;
//! for line in report.lines() {
//!     println!("{}", line);
//! }
//! ```

mod config;
mod diff;
mod document;
mod entity_diff;
mod error_codes;
mod line_diff;
mod model;
mod model_diff;
mod output;
mod tabular_schema;

pub use config::{
    ConfigError, DEFAULT_MISSING_EXPRESSION_PLACEHOLDER, DiffConfig, DiffConfigBuilder,
    LineDiffAlgorithm, NameOrder,
};
pub use diff::{
    ExpressionChange, ExpressionLine, ModelDiffError, ModelDiffReport, NamedExpressionDiff,
    RegularColumnDiff, RelationshipChange, RelationshipDiff, Side, TableChange, TableDiff,
    TableSection,
};
pub use document::{LoadError, decode_text, load_document, parse_document_bytes};
pub use entity_diff::{NamedExpression, diff_named_expressions};
pub use line_diff::{diff_expression_lines, expression_lines};
pub use model::{
    CALCULATED_COLUMN_TYPE, Expression, Measure, Model, ModelColumn, ModelRelationship, ModelTable,
    RelationshipKey,
};
pub use model_diff::{
    diff_calculated_columns, diff_documents, diff_files, diff_measures, diff_models,
    diff_regular_columns, diff_relationships, diff_table, index_tables,
};
pub use output::json::{serialize_report, write_report_json};
pub use tabular_schema::{ParsedModel, parse_model_document};

/// Single entry point: compare two parsed documents.
///
/// Fails as a whole (no partial report) when either document lacks a
/// top-level `model` object.
pub fn compare(
    old: &serde_json::Value,
    new: &serde_json::Value,
    config: &DiffConfig,
) -> Result<ModelDiffReport, ModelDiffError> {
    diff_documents(old, new, config)
}
