mod common;

use common::{fixture_path, read_fixture_text, utf16le_bytes};
use model_diff::{DiffConfig, LoadError, ModelDiffError, Side, diff_files, load_document};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(bytes).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

#[test]
fn utf16le_export_with_bom_loads_like_utf8() {
    let text = read_fixture_text("sales_v1.json");
    let utf16 = write_temp(&utf16le_bytes(&text, true));

    let from_utf16 = load_document(utf16.path()).expect("utf-16 document");
    let from_utf8 = load_document(fixture_path("sales_v1.json")).expect("utf-8 document");
    assert_eq!(from_utf16, from_utf8);
}

#[test]
fn utf16le_without_bom_is_detected() {
    let text = r#"{"model": {"tables": [{"name": "T"}]}}"#;
    let file = write_temp(&utf16le_bytes(text, false));
    let doc = load_document(file.path()).expect("utf-16 document");
    assert_eq!(doc["model"]["tables"][0]["name"], "T");
}

#[test]
fn mixed_encodings_compare_cleanly() {
    let text = read_fixture_text("sales_v1.json");
    let utf16 = write_temp(&utf16le_bytes(&text, true));

    let old = fixture_path("sales_v1.json");
    let report = diff_files(old, utf16.path(), &DiffConfig::default()).expect("diff");
    assert!(report.is_empty());
}

#[test]
fn missing_file_reports_io_error_for_side() {
    let err = diff_files(
        fixture_path("sales_v1.json"),
        fixture_path("does_not_exist.json"),
        &DiffConfig::default(),
    )
    .expect_err("missing file");

    match err {
        ModelDiffError::Load { side, source } => {
            assert_eq!(side, Side::New);
            assert!(matches!(source, LoadError::Io { .. }));
            assert_eq!(source.code(), "MDIFF_LOAD_001");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_load_error() {
    let err = diff_files(
        fixture_path("not_json.json"),
        fixture_path("sales_v2.json"),
        &DiffConfig::default(),
    )
    .expect_err("bad json");
    assert_eq!(err.side(), Side::Old);
    assert_eq!(err.code(), "MDIFF_LOAD_003");
}

#[test]
fn document_without_model_key_aborts_file_diff() {
    let err = diff_files(
        fixture_path("sales_v1.json"),
        fixture_path("no_model_key.json"),
        &DiffConfig::default(),
    )
    .expect_err("no model key");
    assert_eq!(err.code(), "MDIFF_DOC_001");
}
