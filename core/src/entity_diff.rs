//! Shared differ for named entities that carry an expression (calculated
//! columns and measures).

use indexmap::IndexMap;

use crate::config::{DiffConfig, NameOrder};
use crate::diff::{ExpressionChange, NamedExpressionDiff};
use crate::line_diff::{diff_expression_lines, expression_lines};
use crate::model::{Expression, Measure, ModelColumn};

pub trait NamedExpression {
    fn name(&self) -> &str;
    fn expression(&self) -> Option<&Expression>;
}

impl NamedExpression for ModelColumn {
    fn name(&self) -> &str {
        &self.name
    }

    fn expression(&self) -> Option<&Expression> {
        self.expression.as_ref()
    }
}

impl NamedExpression for Measure {
    fn name(&self) -> &str {
        &self.name
    }

    fn expression(&self) -> Option<&Expression> {
        self.expression.as_ref()
    }
}

/// Name-keyed index in first-appearance order; a repeated name keeps its
/// position and takes the later entity.
pub(crate) fn index_by_name<'a, T, I>(items: I) -> IndexMap<&'a str, &'a T>
where
    T: NamedExpression + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut out = IndexMap::new();
    for item in items {
        out.insert(item.name(), item);
    }
    out
}

/// Diff two collections of the same entity kind.
///
/// An entity present on both sides is a candidate change when its expression
/// differs or is missing on either side; it is reported only if the line diff
/// of the two expressions is non-empty.
pub fn diff_named_expressions<'a, 'b, T, I1, I2>(
    old: I1,
    new: I2,
    config: &DiffConfig,
) -> NamedExpressionDiff
where
    T: NamedExpression + 'a + 'b,
    I1: IntoIterator<Item = &'a T>,
    I2: IntoIterator<Item = &'b T>,
{
    let old = index_by_name(old);
    let new = index_by_name(new);
    let placeholder = config.missing_expression_placeholder.as_str();

    let mut out = NamedExpressionDiff {
        added: new
            .keys()
            .filter(|name| !old.contains_key(*name))
            .map(|name| name.to_string())
            .collect(),
        deleted: old
            .keys()
            .filter(|name| !new.contains_key(*name))
            .map(|name| name.to_string())
            .collect(),
        changed: Vec::new(),
    };

    for (name, old_item) in &old {
        let Some(new_item) = new.get(*name) else {
            continue;
        };
        let (old_expr, new_expr) = (old_item.expression(), new_item.expression());
        let candidate = old_expr.is_none() || new_expr.is_none() || old_expr != new_expr;
        if !candidate {
            continue;
        }

        let lines = diff_expression_lines(
            &expression_lines(old_expr, placeholder),
            &expression_lines(new_expr, placeholder),
            config,
        );
        if lines.is_empty() {
            continue;
        }
        out.changed.push(ExpressionChange {
            name: name.to_string(),
            lines,
        });
    }

    if config.name_order == NameOrder::Sorted {
        out.added.sort();
        out.deleted.sort();
        out.changed.sort_by(|a, b| a.name.cmp(&b.name));
    }

    out
}
