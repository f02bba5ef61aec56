use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::config::{DiffConfig, NameOrder};
use crate::diff::{
    ModelDiffError, ModelDiffReport, NamedExpressionDiff, RegularColumnDiff, RelationshipChange,
    RelationshipDiff, Side, TableChange, TableDiff, TableSection,
};
use crate::document::load_document;
use crate::entity_diff::diff_named_expressions;
use crate::model::{Model, ModelRelationship, ModelTable, RelationshipKey};
use crate::tabular_schema::parse_model_document;

/// Diff two tabular models (tables/columns/measures/relationships).
///
/// Tables removed or modified are reported in old-model order, followed by
/// added tables in new-model order; relationships come last.
pub fn diff_models(old: &Model, new: &Model, config: &DiffConfig) -> ModelDiffReport {
    let old_tables = index_tables(&old.tables);
    let new_tables = index_tables(&new.tables);

    let mut report = ModelDiffReport::default();

    for (name, old_table) in &old_tables {
        match new_tables.get(*name) {
            Some(new_table) => {
                log::debug!("diffing table '{}'", name);
                let diff = diff_table(old_table, new_table, config);
                if !diff.is_empty() {
                    report.tables.push(TableSection {
                        name: name.to_string(),
                        change: TableChange::Modified(diff),
                    });
                }
            }
            None => report.tables.push(TableSection {
                name: name.to_string(),
                change: TableChange::Removed,
            }),
        }
    }

    for name in new_tables.keys() {
        if !old_tables.contains_key(*name) {
            report.tables.push(TableSection {
                name: name.to_string(),
                change: TableChange::Added,
            });
        }
    }

    let relationships = diff_relationships(&old.relationships, &new.relationships, config);
    if !relationships.is_empty() {
        report.relationships = Some(relationships);
    }

    report
}

/// Compare two parsed documents. Both must carry a top-level `model` object;
/// otherwise the comparison fails as a whole and no report is produced.
pub fn diff_documents(
    old: &Value,
    new: &Value,
    config: &DiffConfig,
) -> Result<ModelDiffReport, ModelDiffError> {
    let old = parse_model_document(old, Side::Old)?;
    let new = parse_model_document(new, Side::New)?;

    let mut report = diff_models(&old.model, &new.model, config);
    report.warnings.extend(old.warnings);
    report.warnings.extend(new.warnings);
    Ok(report)
}

/// Load both documents, then compare them. Either load failing aborts the run.
pub fn diff_files(
    old_path: impl AsRef<std::path::Path>,
    new_path: impl AsRef<std::path::Path>,
    config: &DiffConfig,
) -> Result<ModelDiffReport, ModelDiffError> {
    let old = load_document(old_path).map_err(|source| ModelDiffError::Load {
        side: Side::Old,
        source,
    })?;
    let new = load_document(new_path).map_err(|source| ModelDiffError::Load {
        side: Side::New,
        source,
    })?;
    diff_documents(&old, &new, config)
}

/// Name-keyed table index in document order; a repeated name keeps its first
/// position and takes the last definition.
pub fn index_tables(tables: &[ModelTable]) -> IndexMap<&str, &ModelTable> {
    let mut out = IndexMap::with_capacity(tables.len());
    for table in tables {
        out.insert(table.name.as_str(), table);
    }
    out
}

pub fn diff_table(
    old_table: &ModelTable,
    new_table: &ModelTable,
    config: &DiffConfig,
) -> TableDiff {
    TableDiff {
        regular_columns: diff_regular_columns(old_table, new_table, config),
        calculated_columns: diff_calculated_columns(old_table, new_table, config),
        measures: diff_measures(old_table, new_table, config),
    }
}

/// Added/deleted names among non-calculated columns. A column whose type moves
/// between regular and calculated shows up on both the regular and the
/// calculated side.
pub fn diff_regular_columns(
    old_table: &ModelTable,
    new_table: &ModelTable,
    config: &DiffConfig,
) -> RegularColumnDiff {
    let regular_names = |table: &ModelTable| -> IndexSet<String> {
        table
            .columns
            .iter()
            .filter(|col| !col.is_calculated())
            .map(|col| col.name.clone())
            .collect()
    };
    let old_names = regular_names(old_table);
    let new_names = regular_names(new_table);

    let mut out = RegularColumnDiff {
        added: new_names.difference(&old_names).cloned().collect(),
        deleted: old_names.difference(&new_names).cloned().collect(),
    };
    if config.name_order == NameOrder::Sorted {
        out.added.sort();
        out.deleted.sort();
    }
    out
}

pub fn diff_calculated_columns(
    old_table: &ModelTable,
    new_table: &ModelTable,
    config: &DiffConfig,
) -> NamedExpressionDiff {
    diff_named_expressions(
        old_table.columns.iter().filter(|col| col.is_calculated()),
        new_table.columns.iter().filter(|col| col.is_calculated()),
        config,
    )
}

pub fn diff_measures(
    old_table: &ModelTable,
    new_table: &ModelTable,
    config: &DiffConfig,
) -> NamedExpressionDiff {
    diff_named_expressions(&old_table.measures, &new_table.measures, config)
}

/// Relationships keyed by their endpoint tuple. A key on both sides whose
/// records differ in any field is "changed"; only an `isActive` flip (absent
/// meaning active) yields a transition.
pub fn diff_relationships(
    old: &[ModelRelationship],
    new: &[ModelRelationship],
    config: &DiffConfig,
) -> RelationshipDiff {
    let old_rels = map_relationships(old);
    let new_rels = map_relationships(new);

    let mut out = RelationshipDiff {
        added: new_rels
            .keys()
            .filter(|key| !old_rels.contains_key(*key))
            .map(|key| (*key).clone())
            .collect(),
        deleted: old_rels
            .keys()
            .filter(|key| !new_rels.contains_key(*key))
            .map(|key| (*key).clone())
            .collect(),
        changed: Vec::new(),
    };

    for (key, old_rel) in &old_rels {
        let Some(new_rel) = new_rels.get(*key) else {
            continue;
        };
        if old_rel.record == new_rel.record {
            continue;
        }
        let old_active = old_rel.resolved_is_active();
        let new_active = new_rel.resolved_is_active();
        out.changed.push(RelationshipChange {
            key: (*key).clone(),
            active_transition: (old_active != new_active).then_some(new_active),
        });
    }

    if config.name_order == NameOrder::Sorted {
        out.added.sort();
        out.deleted.sort();
        out.changed.sort_by(|a, b| a.key.cmp(&b.key));
    }

    out
}

fn map_relationships(
    relationships: &[ModelRelationship],
) -> IndexMap<&RelationshipKey, &ModelRelationship> {
    let mut out = IndexMap::with_capacity(relationships.len());
    for rel in relationships {
        out.insert(&rel.key, rel);
    }
    out
}
