//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use model_diff::{DiffConfig, ModelDiffReport, compare, load_document};
use serde_json::Value;
use std::path::PathBuf;

pub fn fixture_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../fixtures/models");
    path.push(filename);
    path
}

pub fn load_fixture(name: &str) -> Value {
    let path = fixture_path(name);
    load_document(&path).unwrap_or_else(|e| {
        panic!("failed to load fixture {}: {e}", path.display());
    })
}

pub fn read_fixture_text(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!("failed to read fixture {}: {e}", path.display());
    })
}

pub fn diff_values(old: &Value, new: &Value) -> ModelDiffReport {
    compare(old, new, &DiffConfig::default()).expect("comparison should succeed")
}

/// Wrap table definitions in a minimal document.
pub fn doc_with_tables(tables: Value) -> Value {
    serde_json::json!({ "model": { "tables": tables } })
}

pub fn doc_with_relationships(relationships: Value) -> Value {
    serde_json::json!({ "model": { "relationships": relationships } })
}

pub fn utf16le_bytes(text: &str, with_bom: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2 + 2);
    if with_bom {
        out.extend_from_slice(&[0xFF, 0xFE]);
    }
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}
