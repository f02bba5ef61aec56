use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Column `type` value that marks a column as calculated; every other value
/// (including an absent type) makes the column "regular".
pub const CALCULATED_COLUMN_TYPE: &str = "calculated";

/// Tabular model read from one document. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model {
    pub tables: Vec<ModelTable>,
    pub relationships: Vec<ModelRelationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelTable {
    pub name: String,
    pub columns: Vec<ModelColumn>,
    pub measures: Vec<Measure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelColumn {
    pub name: String,
    pub column_type: Option<String>,
    pub expression: Option<Expression>,
}

impl ModelColumn {
    pub fn is_calculated(&self) -> bool {
        self.column_type.as_deref() == Some(CALCULATED_COLUMN_TYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measure {
    pub name: String,
    pub expression: Option<Expression>,
}

/// Expression text normalized to a sequence of lines.
///
/// Documents store expressions either as one string or as a list of strings.
/// A single string stays a single line even when it contains newlines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expression {
    lines: Vec<String>,
}

impl Expression {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Normalize a raw `expression` value. `null` counts as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::from_lines([s.as_str()])),
            Value::Array(items) => Some(Self::from_lines(items.iter().map(json_line))),
            other => Some(Self::from_lines([other.to_string()])),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

fn json_line(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Identity of a relationship: its four endpoint names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RelationshipKey {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}

impl fmt::Display for RelationshipKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) -> {}({})",
            self.from_table, self.from_column, self.to_table, self.to_column
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRelationship {
    pub key: RelationshipKey,
    pub is_active: Option<bool>,
    /// The complete source record; two relationships with the same key are
    /// "changed" when these differ in any field.
    pub record: Map<String, Value>,
}

impl ModelRelationship {
    /// `isActive` with the documented default applied.
    pub fn resolved_is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}
