use crate::OutputFormat;
use crate::output::{json, text};
use anyhow::{Context, Result};
use model_diff::{DiffConfig, LineDiffAlgorithm, ModelDiffReport, NameOrder, diff_files};
use std::io::{self, Write};
use std::process::ExitCode;
use thiserror::Error;

/// Settings layered on top of the defaults: config file first, then flags.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<String>,
    pub patience: bool,
    pub sorted: bool,
    pub keep_blank_lines: bool,
}

/// The `--config` file could not be read.
#[derive(Debug, Error)]
#[error("Failed to read config file: {path}")]
pub struct ConfigReadError {
    pub path: String,
    #[source]
    pub source: io::Error,
}

pub fn run(
    old_path: &str,
    new_path: &str,
    format: OutputFormat,
    overrides: ConfigOverrides,
    quiet: bool,
) -> Result<ExitCode> {
    let config = build_config(&overrides)?;
    log::debug!("diffing {old_path} against {new_path} with {config:?}");

    let report = diff_files(old_path, new_path, &config)
        .with_context(|| format!("Failed to compare {old_path} and {new_path}"))?;

    print_warnings_to_stderr(&report);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Text if quiet => text::write_summary(&mut handle, &report)?,
        OutputFormat::Text => text::write_text_report(&mut handle, &report)?,
        OutputFormat::Json => json::write_json_report(&mut handle, &report)?,
    }
    handle.flush()?;

    Ok(exit_code_from_report(&report))
}

fn build_config(overrides: &ConfigOverrides) -> Result<DiffConfig> {
    let mut config = match &overrides.config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| ConfigReadError {
                path: path.clone(),
                source,
            })?;
            DiffConfig::from_json_str(&text)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => DiffConfig::default(),
    };

    if overrides.patience {
        config.line_diff_algorithm = LineDiffAlgorithm::Patience;
    }
    if overrides.sorted {
        config.name_order = NameOrder::Sorted;
    }
    if overrides.keep_blank_lines {
        config.ignore_blank_lines = false;
    }

    config.validate().context("Invalid diff settings")?;
    Ok(config)
}

fn print_warnings_to_stderr(report: &ModelDiffReport) {
    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
}

fn exit_code_from_report(report: &ModelDiffReport) -> ExitCode {
    if report.is_empty() {
        ExitCode::from(0)
    } else {
        ExitCode::from(1)
    }
}
