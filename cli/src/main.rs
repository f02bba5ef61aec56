mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use commands::diff::ConfigReadError;
use log::LevelFilter;
use model_diff::{ConfigError, LoadError, ModelDiffError};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "model-diff")]
#[command(about = "Compare tabular model definitions and show differences")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compare two model definition files")]
    Diff {
        #[arg(help = "Path to the old/base model file")]
        old: String,
        #[arg(help = "Path to the new/changed model file")]
        new: String,
        #[arg(long, short, value_enum, default_value = "text", help = "Format")]
        format: OutputFormat,
        #[arg(long, value_name = "PATH", help = "JSON file with diff settings")]
        config: Option<String>,
        #[arg(long, help = "Use the patience algorithm for expression line diffs")]
        patience: bool,
        #[arg(long, help = "Sort names instead of keeping document order")]
        sorted: bool,
        #[arg(long, help = "Keep blank lines in expression diffs")]
        keep_blank_lines: bool,
        #[arg(long, short, help = "Quiet mode: only show summary")]
        quiet: bool,
        #[arg(long, short, help = "Verbose mode: debug logging on stderr")]
        verbose: bool,
    },
    #[command(about = "Show information about a model file")]
    Info {
        #[arg(help = "Path to the model file")]
        path: String,
    },
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Diff { verbose: true, .. });
    init_logging(verbose);

    let result = match cli.command {
        Commands::Diff {
            old,
            new,
            format,
            config,
            patience,
            sorted,
            keep_blank_lines,
            quiet,
            verbose: _,
        } => commands::diff::run(
            &old,
            &new,
            format,
            commands::diff::ConfigOverrides {
                config_path: config,
                patience,
                sorted,
                keep_blank_lines,
            },
            quiet,
        ),
        Commands::Info { path } => commands::info::run(&path),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for_error(&e)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        log_level_from_env()
    };
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .init();
}

fn log_level_from_env() -> LevelFilter {
    match std::env::var("MODEL_DIFF_LOG").as_deref() {
        Ok("error") => LevelFilter::Error,
        Ok("warn") => LevelFilter::Warn,
        Ok("info") => LevelFilter::Info,
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        Ok("off") => LevelFilter::Off,
        _ => LevelFilter::Error,
    }
}

fn exit_code_for_error(err: &anyhow::Error) -> ExitCode {
    if is_input_error(err) {
        ExitCode::from(2)
    } else {
        ExitCode::from(3)
    }
}

/// Unreadable or invalid inputs. Other I/O failures, such as a closed
/// stdout, are not input errors.
fn is_input_error(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.is::<ModelDiffError>()
            || cause.is::<LoadError>()
            || cause.is::<ConfigError>()
            || cause.is::<ConfigReadError>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::io;

    #[test]
    fn broken_stdout_is_not_an_input_error() {
        let err = anyhow::Error::new(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(!is_input_error(&err));

        let err = Err::<(), _>(io::Error::from(io::ErrorKind::BrokenPipe))
            .context("Failed to write report")
            .expect_err("io error");
        assert!(!is_input_error(&err));
    }

    #[test]
    fn unreadable_config_file_is_an_input_error() {
        let err = ConfigReadError {
            path: "missing.json".into(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let err = anyhow::Error::new(err).context("Invalid diff settings");
        assert!(is_input_error(&err));
    }
}
