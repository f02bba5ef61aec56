use anyhow::{Context, Result};
use model_diff::{Side, load_document, parse_model_document};
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

pub fn run(path: &str) -> Result<ExitCode> {
    let doc = load_document(path).with_context(|| format!("Failed to load model file: {path}"))?;
    let parsed = parse_model_document(&doc, Side::Old)
        .with_context(|| format!("Failed to read model definition: {path}"))?;

    for warning in &parsed.warnings {
        eprintln!("Warning: {}", warning);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let filename = Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| path.into());

    let model = &parsed.model;
    writeln!(handle, "Model: {}", filename)?;
    writeln!(handle, "Tables: {}", model.tables.len())?;

    for table in &model.tables {
        let calculated = table.columns.iter().filter(|c| c.is_calculated()).count();
        writeln!(
            handle,
            "  - \"{}\": {} regular columns, {} calculated columns, {} measures",
            table.name,
            table.columns.len() - calculated,
            calculated,
            table.measures.len()
        )?;
    }

    let inactive = model
        .relationships
        .iter()
        .filter(|r| !r.resolved_is_active())
        .count();
    writeln!(
        handle,
        "Relationships: {} ({} inactive)",
        model.relationships.len(),
        inactive
    )?;

    Ok(ExitCode::from(0))
}
