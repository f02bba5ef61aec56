//! Reading the `model` object of a tabular model document into a [`Model`].
//!
//! Only the top-level `model` key is required. Missing or mistyped collections
//! read as empty, and entries without the keys that identify them are skipped
//! with a warning.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::diff::{ModelDiffError, Side};
use crate::model::{
    Expression, Measure, Model, ModelColumn, ModelRelationship, ModelTable, RelationshipKey,
};

/// A model plus the anomalies tolerated while reading it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedModel {
    pub model: Model,
    pub warnings: Vec<String>,
}

/// Read one document. Fails only when the `model` object is absent or not an object.
pub fn parse_model_document(doc: &Value, side: Side) -> Result<ParsedModel, ModelDiffError> {
    let root = doc.as_object().ok_or(ModelDiffError::NotAnObject { side })?;
    let model = root
        .get("model")
        .ok_or(ModelDiffError::MissingModelKey { side })?;
    let model = model
        .as_object()
        .ok_or(ModelDiffError::ModelNotAnObject { side })?;

    let mut reader = SchemaReader {
        side,
        warnings: Vec::new(),
    };
    let model = reader.read_model(model);
    Ok(ParsedModel {
        model,
        warnings: reader.warnings,
    })
}

struct SchemaReader {
    side: Side,
    warnings: Vec<String>,
}

impl SchemaReader {
    fn warn(&mut self, message: String) {
        let message = format!("{} document: {}", self.side, message);
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    fn read_model(&mut self, model: &Map<String, Value>) -> Model {
        let mut out = Model::default();
        let mut seen_tables: HashSet<String> = HashSet::new();

        for (idx, t) in self.array_field(model, "tables", "model").iter().enumerate() {
            let Some(name) = str_field(t, "name") else {
                self.warn(format!("skipped table #{} without a name", idx + 1));
                continue;
            };
            if !seen_tables.insert(name.to_string()) {
                let message = format!("duplicate table '{}'; the last definition wins", name);
                self.warn(message);
            }
            out.tables.push(self.read_table(t, name));
        }

        let mut seen_keys: HashSet<RelationshipKey> = HashSet::new();
        for (idx, rel) in self
            .array_field(model, "relationships", "model")
            .iter()
            .enumerate()
        {
            let Some(rel) = parse_relationship_obj(rel) else {
                self.warn(format!(
                    "skipped relationship #{} without fromTable/fromColumn/toTable/toColumn",
                    idx + 1
                ));
                continue;
            };
            if !seen_keys.insert(rel.key.clone()) {
                self.warn(format!(
                    "duplicate relationship {}; the last definition wins",
                    rel.key
                ));
            }
            out.relationships.push(rel);
        }

        out
    }

    fn read_table(&mut self, t: &Value, table_name: &str) -> ModelTable {
        let mut table = ModelTable {
            name: table_name.to_string(),
            ..Default::default()
        };
        let Some(obj) = t.as_object() else {
            return table;
        };
        let owner = format!("table '{}'", table_name);

        let mut seen: HashSet<&str> = HashSet::new();
        for (idx, c) in self.array_field(obj, "columns", &owner).iter().enumerate() {
            match parse_column_obj(c) {
                Some(col) => {
                    if !seen.insert(str_field(c, "name").unwrap_or_default()) {
                        self.warn(format!(
                            "duplicate column '{}' in {}; the last definition wins",
                            col.name, owner
                        ));
                    }
                    table.columns.push(col);
                }
                None => {
                    let message = format!("skipped column #{} without a name in {owner}", idx + 1);
                    self.warn(message);
                }
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for (idx, m) in self.array_field(obj, "measures", &owner).iter().enumerate() {
            match parse_measure_obj(m) {
                Some(measure) => {
                    if !seen.insert(str_field(m, "name").unwrap_or_default()) {
                        self.warn(format!(
                            "duplicate measure '{}' in {}; the last definition wins",
                            measure.name, owner
                        ));
                    }
                    table.measures.push(measure);
                }
                None => {
                    let message = format!("skipped measure #{} without a name in {owner}", idx + 1);
                    self.warn(message);
                }
            }
        }

        table
    }

    fn array_field<'v>(
        &mut self,
        obj: &'v Map<String, Value>,
        key: &str,
        owner: &str,
    ) -> &'v [Value] {
        match obj.get(key) {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items,
            Some(_) => {
                let message = format!("'{}' of {} is not a list; treated as empty", key, owner);
                self.warn(message);
                &[]
            }
        }
    }
}

fn parse_column_obj(v: &Value) -> Option<ModelColumn> {
    let name = str_field(v, "name")?;
    Some(ModelColumn {
        name: name.to_string(),
        column_type: str_field(v, "type").map(str::to_string),
        expression: v.get("expression").and_then(Expression::from_json),
    })
}

fn parse_measure_obj(v: &Value) -> Option<Measure> {
    let name = str_field(v, "name")?;
    Some(Measure {
        name: name.to_string(),
        expression: v.get("expression").and_then(Expression::from_json),
    })
}

fn parse_relationship_obj(v: &Value) -> Option<ModelRelationship> {
    let record = v.as_object()?;
    let key = RelationshipKey {
        from_table: str_field(v, "fromTable")?.to_string(),
        from_column: str_field(v, "fromColumn")?.to_string(),
        to_table: str_field(v, "toTable")?.to_string(),
        to_column: str_field(v, "toColumn")?.to_string(),
    };

    Some(ModelRelationship {
        key,
        is_active: v.get("isActive").and_then(|x| x.as_bool()),
        record: record.clone(),
    })
}

fn str_field<'v>(v: &'v Value, key: &str) -> Option<&'v str> {
    v.get(key).and_then(|x| x.as_str())
}
