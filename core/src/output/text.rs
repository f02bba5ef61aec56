use crate::diff::{
    ExpressionChange, ModelDiffReport, NamedExpressionDiff, RelationshipDiff, TableChange,
    TableDiff,
};

const INDENT: &str = "  ";

pub(crate) fn report_lines(report: &ModelDiffReport) -> Vec<String> {
    let mut out = Vec::new();

    for section in &report.tables {
        match &section.change {
            TableChange::Modified(diff) => {
                out.push(format!("Table: {}", section.name));
                push_table_diff(&mut out, diff);
            }
            TableChange::Removed => {
                let name = &section.name;
                out.push(format!("Table: {name} - Removed in the second file."));
            }
            TableChange::Added => {
                let name = &section.name;
                out.push(format!("Table: {name} - Added in the second file."));
            }
        }
    }

    if let Some(relationships) = &report.relationships {
        push_relationships(&mut out, relationships);
    }

    out
}

fn push_table_diff(out: &mut Vec<String>, diff: &TableDiff) {
    let regular = &diff.regular_columns;
    push_name_list(out, "Added Regular Columns", &regular.added);
    push_name_list(out, "Deleted Regular Columns", &regular.deleted);
    push_named_expressions(out, "Calculated Columns", &diff.calculated_columns);
    push_named_expressions(out, "Measures", &diff.measures);
}

fn push_named_expressions(out: &mut Vec<String>, label: &str, diff: &NamedExpressionDiff) {
    push_name_list(out, &format!("Added {label}"), &diff.added);
    push_name_list(out, &format!("Deleted {label}"), &diff.deleted);
    if diff.changed.is_empty() {
        return;
    }
    out.push(format!("{INDENT}Changed {label}:"));
    for change in &diff.changed {
        push_expression_change(out, change);
    }
}

fn push_expression_change(out: &mut Vec<String>, change: &ExpressionChange) {
    out.push(format!("{INDENT}{INDENT}{}:", change.name));
    out.push(format!("{INDENT}{INDENT}{INDENT}Changes:"));
    for line in &change.lines {
        out.push(format!("{INDENT}{INDENT}{INDENT}{INDENT}{line}"));
    }
}

fn push_name_list(out: &mut Vec<String>, label: &str, names: &[String]) {
    if names.is_empty() {
        return;
    }
    out.push(format!("{INDENT}{label}: {}", names.join(", ")));
}

fn push_relationships(out: &mut Vec<String>, diff: &RelationshipDiff) {
    if diff.is_empty() {
        return;
    }
    out.push("Relationships:".to_string());

    if !diff.added.is_empty() {
        out.push(format!("{INDENT}Added Relationships:"));
        for key in &diff.added {
            out.push(format!("{INDENT}{INDENT}{key}"));
        }
    }

    if !diff.deleted.is_empty() {
        out.push(format!("{INDENT}Deleted Relationships:"));
        for key in &diff.deleted {
            out.push(format!("{INDENT}{INDENT}{key}"));
        }
    }

    if !diff.changed.is_empty() {
        out.push(format!("{INDENT}Changed Relationships:"));
        for change in &diff.changed {
            out.push(format!("{INDENT}{INDENT}{}", change.key));
            if let Some(active) = change.active_transition {
                let state = if active { "Active" } else { "Inactive" };
                let indent = INDENT.repeat(3);
                out.push(format!("{indent}Relationship is now {state}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{ExpressionLine, RegularColumnDiff, RelationshipChange, TableSection};
    use crate::model::RelationshipKey;

    fn key(from: &str, to: &str) -> RelationshipKey {
        RelationshipKey {
            from_table: from.into(),
            from_column: "Id".into(),
            to_table: to.into(),
            to_column: "Id".into(),
        }
    }

    #[test]
    fn renders_full_report_in_fixed_order() {
        let report = ModelDiffReport {
            tables: vec![
                TableSection {
                    name: "Sales".into(),
                    change: TableChange::Modified(TableDiff {
                        regular_columns: RegularColumnDiff {
                            added: vec!["Qty".into(), "Price".into()],
                            deleted: vec!["Old".into()],
                        },
                        calculated_columns: NamedExpressionDiff {
                            changed: vec![ExpressionChange {
                                name: "Margin".into(),
                                lines: vec![
                                    ExpressionLine::Deleted("[A] - [B]".into()),
                                    ExpressionLine::Inserted("[A] - [C]".into()),
                                ],
                            }],
                            ..Default::default()
                        },
                        measures: NamedExpressionDiff {
                            added: vec!["Total".into()],
                            ..Default::default()
                        },
                    }),
                },
                TableSection {
                    name: "Legacy".into(),
                    change: TableChange::Removed,
                },
                TableSection {
                    name: "Budget".into(),
                    change: TableChange::Added,
                },
            ],
            relationships: Some(RelationshipDiff {
                added: vec![key("Sales", "Budget")],
                deleted: vec![key("Sales", "Legacy")],
                changed: vec![
                    RelationshipChange {
                        key: key("Sales", "Customers"),
                        active_transition: Some(false),
                    },
                    RelationshipChange {
                        key: key("Sales", "Dates"),
                        active_transition: None,
                    },
                ],
            }),
            warnings: Vec::new(),
        };

        let expected = vec![
            "Table: Sales",
            "  Added Regular Columns: Qty, Price",
            "  Deleted Regular Columns: Old",
            "  Changed Calculated Columns:",
            "    Margin:",
            "      Changes:",
            "        -[A] - [B]",
            "        +[A] - [C]",
            "  Added Measures: Total",
            "Table: Legacy - Removed in the second file.",
            "Table: Budget - Added in the second file.",
            "Relationships:",
            "  Added Relationships:",
            "    Sales(Id) -> Budget(Id)",
            "  Deleted Relationships:",
            "    Sales(Id) -> Legacy(Id)",
            "  Changed Relationships:",
            "    Sales(Id) -> Customers(Id)",
            "      Relationship is now Inactive",
            "    Sales(Id) -> Dates(Id)",
        ];
        assert_eq!(report_lines(&report), expected);
    }

    #[test]
    fn activation_turned_on_reads_active() {
        let report = ModelDiffReport {
            relationships: Some(RelationshipDiff {
                changed: vec![RelationshipChange {
                    key: key("A", "B"),
                    active_transition: Some(true),
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            report_lines(&report),
            vec![
                "Relationships:",
                "  Changed Relationships:",
                "    A(Id) -> B(Id)",
                "      Relationship is now Active",
            ]
        );
    }
}
