//! Diff results and errors for model comparison.
//!
//! This module defines the types used to represent differences between two models:
//! - [`ModelDiffReport`]: ordered per-table sections plus one relationship section
//! - [`ExpressionLine`]: a single inserted or deleted expression line
//! - [`ModelDiffError`]: precondition failures that abort a comparison

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::document::LoadError;
use crate::error_codes;
use crate::model::RelationshipKey;

/// Which of the two compared documents an error or warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Old,
    New,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Old => "old",
            Side::New => "new",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced by the comparison entry points. Any error means no report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelDiffError {
    #[error(
        "[MDIFF_DOC_001] 'model' key is missing in the {side} document. \
         Suggestion: compare full model definitions with a top-level \"model\" object."
    )]
    MissingModelKey { side: Side },

    #[error("[MDIFF_DOC_002] the {side} document is not a JSON object.")]
    NotAnObject { side: Side },

    #[error("[MDIFF_DOC_003] 'model' in the {side} document is not a JSON object.")]
    ModelNotAnObject { side: Side },

    #[error("failed to load the {side} document: {source}")]
    Load {
        side: Side,
        #[source]
        source: LoadError,
    },
}

impl ModelDiffError {
    pub fn code(&self) -> &'static str {
        match self {
            ModelDiffError::MissingModelKey { .. } => error_codes::DOC_MISSING_MODEL,
            ModelDiffError::NotAnObject { .. } => error_codes::DOC_NOT_OBJECT,
            ModelDiffError::ModelNotAnObject { .. } => error_codes::DOC_MODEL_NOT_OBJECT,
            ModelDiffError::Load { source, .. } => source.code(),
        }
    }

    pub fn side(&self) -> Side {
        match self {
            ModelDiffError::MissingModelKey { side }
            | ModelDiffError::NotAnObject { side }
            | ModelDiffError::ModelNotAnObject { side }
            | ModelDiffError::Load { side, .. } => *side,
        }
    }
}

/// One line of an expression diff, in diff order (deletions before insertions
/// inside each contiguous change block).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ExpressionLine {
    Deleted(String),
    Inserted(String),
}

impl ExpressionLine {
    pub fn marker(&self) -> char {
        match self {
            ExpressionLine::Deleted(_) => '-',
            ExpressionLine::Inserted(_) => '+',
        }
    }

    pub fn text(&self) -> &str {
        match self {
            ExpressionLine::Deleted(text) | ExpressionLine::Inserted(text) => text,
        }
    }

    pub fn is_deletion(&self) -> bool {
        matches!(self, ExpressionLine::Deleted(_))
    }

    pub fn is_insertion(&self) -> bool {
        matches!(self, ExpressionLine::Inserted(_))
    }
}

impl fmt::Display for ExpressionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.marker(), self.text())
    }
}

/// A calculated column or measure whose expression has a visible textual diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpressionChange {
    pub name: String,
    pub lines: Vec<ExpressionLine>,
}

/// Diff of one kind of named, expression-bearing entity within a table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NamedExpressionDiff {
    pub added: Vec<String>,
    pub deleted: Vec<String>,
    /// Only entries with a non-empty expression diff.
    pub changed: Vec<ExpressionChange>,
}

impl NamedExpressionDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.changed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RegularColumnDiff {
    pub added: Vec<String>,
    pub deleted: Vec<String>,
}

impl RegularColumnDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

/// Column and measure changes of a table present in both models.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableDiff {
    pub regular_columns: RegularColumnDiff,
    pub calculated_columns: NamedExpressionDiff,
    pub measures: NamedExpressionDiff,
}

impl TableDiff {
    pub fn is_empty(&self) -> bool {
        self.regular_columns.is_empty()
            && self.calculated_columns.is_empty()
            && self.measures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableChange {
    /// Present only in the old model.
    Removed,
    /// Present only in the new model.
    Added,
    Modified(TableDiff),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSection {
    pub name: String,
    pub change: TableChange,
}

/// A relationship present in both models whose record differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipChange {
    pub key: RelationshipKey,
    /// `Some(new_state)` when the resolved `isActive` flag flipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_transition: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RelationshipDiff {
    pub added: Vec<RelationshipKey>,
    pub deleted: Vec<RelationshipKey>,
    pub changed: Vec<RelationshipChange>,
}

impl RelationshipDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.changed.is_empty()
    }
}

/// Full result of comparing two models.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ModelDiffReport {
    /// Removals and modifications in old-model order, then additions in
    /// new-model order.
    pub tables: Vec<TableSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<RelationshipDiff>,
    /// Tolerated anomalies found while reading the documents.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ModelDiffReport {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.relationships.is_none()
    }

    /// Canonical human-readable rendering, one entry per output line.
    pub fn lines(&self) -> Vec<String> {
        crate::output::text::report_lines(self)
    }

    pub fn table(&self, name: &str) -> Option<&TableSection> {
        self.tables.iter().find(|section| section.name == name)
    }
}
