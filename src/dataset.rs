// src/dataset.rs
//
// Loads record collections from JSON files and turns them into the column
// descriptors the view engine consumes. The engine itself never sees JSON;
// everything it touches goes through the accessors built here.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

use crate::config::ColumnRule;
use crate::engine::{CellValue, Column};
use crate::errors::RowscopeError;

/// One record of the source collection: a JSON object.
pub type Record = Map<String, Value>;

/// A resolved column descriptor, before engine wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub id: String,
    pub title: String,
    pub filterable: bool,
    pub sortable: bool,
}

/// Read records from `path`: a JSON array of objects, or JSON Lines.
pub fn load_records(path: &Path) -> Result<Vec<Record>, RowscopeError> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_records(&text).map_err(|message| RowscopeError::Dataset {
        path: path.display().to_string(),
        message,
    })?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse a JSON array of objects, falling back to one object per line.
pub fn parse_records(text: &str) -> Result<Vec<Record>, String> {
    if text.trim_start().starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(text).map_err(|e| e.to_string())?;
        values.into_iter().map(into_object).collect()
    } else {
        let mut records = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let value: Value =
                serde_json::from_str(line).map_err(|e| format!("line {}: {}", lineno + 1, e))?;
            let record = into_object(value).map_err(|e| format!("line {}: {}", lineno + 1, e))?;
            records.push(record);
        }
        Ok(records)
    }
}

fn into_object(value: Value) -> Result<Record, String> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected an object, found {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Infer column descriptors from the data: keys in first-seen order across
/// the first `limit` records, every column filterable and sortable.
pub fn infer_columns(records: &[Record], limit: usize) -> Vec<ColumnSpec> {
    let mut specs: Vec<ColumnSpec> = Vec::new();
    for record in records.iter().take(limit) {
        for key in record.keys() {
            if !specs.iter().any(|spec| spec.id == *key) {
                specs.push(ColumnSpec {
                    id: key.clone(),
                    title: title_for(key),
                    filterable: true,
                    sortable: true,
                });
            }
        }
    }
    specs
}

/// Resolve the descriptor set: configured `[[columns]]` rules fix the set
/// and its order; without rules the set is inferred from the data.
pub fn resolve_columns(
    records: &[Record],
    rules: &[ColumnRule],
    infer_limit: usize,
) -> Vec<ColumnSpec> {
    if rules.is_empty() {
        infer_columns(records, infer_limit)
    } else {
        rules
            .iter()
            .map(|rule| ColumnSpec {
                id: rule.id.clone(),
                title: rule.title.clone().unwrap_or_else(|| title_for(&rule.id)),
                filterable: rule.filterable,
                sortable: rule.sortable,
            })
            .collect()
    }
}

/// Wire descriptors to the engine with accessors over the record map.
pub fn build_columns(specs: &[ColumnSpec]) -> Vec<Column<Record>> {
    specs
        .iter()
        .map(|spec| {
            let mut column = Column::new(spec.id.clone(), spec.title.clone());
            if spec.filterable {
                let id = spec.id.clone();
                column = column.with_filter(move |record: &Record| cell_value(record, &id));
            }
            if spec.sortable {
                let id = spec.id.clone();
                column = column.with_order(move |record: &Record| cell_value(record, &id));
            }
            column
        })
        .collect()
}

/// The engine-facing value of `record[id]`; absent keys are `Missing`.
pub fn cell_value(record: &Record, id: &str) -> CellValue {
    record.get(id).map(json_to_cell).unwrap_or(CellValue::Missing)
}

/// Display text for a cell. Rendering stays out of the engine; the widgets
/// and the headless `page` command both go through this.
pub fn cell_text(record: &Record, id: &str) -> String {
    cell_value(record, id).to_string()
}

fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Int(i),
            None => CellValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => CellValue::Text(s.clone()),
        // Arrays and nested objects filter and sort by their compact JSON
        // form.
        other => CellValue::Text(other.to_string()),
    }
}

fn title_for(id: &str) -> String {
    let spaced = id.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test records must be objects"),
        }
    }

    #[test]
    fn test_parse_json_array() {
        let records = parse_records(r#"[{"a": 1}, {"a": 2}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["a"], json!(2));
    }

    #[test]
    fn test_parse_json_lines_skips_blanks() {
        let text = "{\"a\": 1}\n\n{\"a\": 2}\n";
        let records = parse_records(text).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        let err = parse_records("[1, 2]").unwrap_err();
        assert!(err.contains("expected an object"));

        let err = parse_records("{\"a\": 1}\n42\n").unwrap_err();
        assert!(err.contains("line 2"));
    }

    #[test]
    fn test_infer_columns_first_seen_order() {
        let records = vec![
            record(json!({"name": "a", "size": 1})),
            record(json!({"size": 2, "kind": "x"})),
        ];
        let specs = infer_columns(&records, 100);
        let ids: Vec<&str> = specs.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "size", "kind"]);
        assert!(specs.iter().all(|s| s.filterable && s.sortable));
    }

    #[test]
    fn test_infer_columns_honors_limit() {
        let records = vec![
            record(json!({"a": 1})),
            record(json!({"b": 2})),
        ];
        let specs = infer_columns(&records, 1);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].id, "a");
    }

    #[test]
    fn test_resolve_columns_prefers_rules() {
        let records = vec![record(json!({"a": 1, "b": 2}))];
        let rules = vec![ColumnRule {
            id: "b".into(),
            title: None,
            filterable: false,
            sortable: true,
        }];
        let specs = resolve_columns(&records, &rules, 100);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].id, "b");
        assert_eq!(specs[0].title, "B");
        assert!(!specs[0].filterable);
    }

    #[test]
    fn test_cell_value_mapping() {
        let rec = record(json!({
            "null": null,
            "flag": true,
            "count": 3,
            "ratio": 1.5,
            "name": "x",
            "tags": ["a", "b"]
        }));
        assert_eq!(cell_value(&rec, "null"), CellValue::Missing);
        assert_eq!(cell_value(&rec, "flag"), CellValue::Bool(true));
        assert_eq!(cell_value(&rec, "count"), CellValue::Int(3));
        assert_eq!(cell_value(&rec, "ratio"), CellValue::Float(1.5));
        assert_eq!(cell_value(&rec, "name"), CellValue::Text("x".into()));
        assert_eq!(cell_value(&rec, "tags"), CellValue::Text("[\"a\",\"b\"]".into()));
        assert_eq!(cell_value(&rec, "absent"), CellValue::Missing);
    }

    #[test]
    fn test_titles_from_ids() {
        assert_eq!(title_for("name"), "Name");
        assert_eq!(title_for("created_at"), "Created at");
    }
}
