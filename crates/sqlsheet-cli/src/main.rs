//! sqlsheet CLI - SQL dump to spreadsheet converter

mod args;
mod config;
mod output;
mod workbook;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use sqlsheet_core::{ConvertOptions, Converter, InferenceMode};

use crate::args::{Args, Command};
use crate::config::Config;
use crate::output::SummaryPrinter;
use crate::workbook::WorkbookWriter;

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(args) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    match args.command {
        Command::Convert {
            files,
            out_dir,
            format,
            summary,
            first_table_only,
            config: config_path,
        } => {
            // Load configuration
            let config = if let Some(path) = config_path {
                Config::from_file(&path)?
            } else {
                Config::find_and_load()?.unwrap_or_default()
            };

            // Merge CLI args with config (CLI takes precedence)
            let config = config.merge_with_args(&out_dir, &format, first_table_only);

            let dump_files = expand_globs(&files)?;
            if dump_files.is_empty() {
                miette::bail!("No dump files matched the given paths");
            }

            let out_dir = config
                .out_dir
                .as_deref()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let writer = WorkbookWriter::new(config.workbook_format(), out_dir);
            let printer = SummaryPrinter::new(summary, args.quiet);

            let options = ConvertOptions {
                inference: if config.first_table_only {
                    InferenceMode::FirstTableOnly
                } else {
                    InferenceMode::AllTables
                },
            };
            let mut converter = Converter::new(options);

            let mut any_empty = false;
            for dump in &dump_files {
                let conversion = converter.convert_file(dump).into_diagnostic()?;
                if conversion.is_empty() {
                    printer.print_empty(dump);
                    any_empty = true;
                    continue;
                }
                let artifact = writer.write(&conversion)?;
                printer.print_success(dump, &conversion, &artifact);
            }

            Ok(any_empty)
        }

        Command::Schema { files } => {
            let dump_files = expand_globs(&files)?;
            let mut converter = Converter::default();

            for dump in &dump_files {
                let conversion = converter.convert_file(dump).into_diagnostic()?;

                println!("{}:", dump.display());
                if conversion.is_empty() {
                    println!("  (no tables found)");
                    continue;
                }
                for table in conversion.tables() {
                    println!("  Table: {}", table.name);
                    for column in &table.columns {
                        println!("    - {} {}", column.name, column.ty);
                    }
                }
            }

            Ok(false)
        }

        Command::Inspect { file } => {
            // Show extracted statements (for debugging)
            let content = std::fs::read_to_string(&file).into_diagnostic()?;

            let creates = sqlsheet_core::extract::create_tables(&content);
            let inserts = sqlsheet_core::extract::inserts(&content);

            println!("CREATE TABLE statements: {}", creates.len());
            for stmt in &creates {
                println!("{:#?}", stmt);
            }
            println!();
            println!("INSERT INTO statements: {}", inserts.len());
            for stmt in &inserts {
                println!("{:#?}", stmt);
            }

            Ok(false)
        }
    }
}

/// Expand glob patterns among the given paths; plain paths pass through.
fn expand_globs(patterns: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let pattern_str = pattern.display().to_string();
        if pattern_str.contains('*') {
            for path in glob::glob(&pattern_str).into_diagnostic()?.flatten() {
                files.push(path);
            }
        } else {
            files.push(pattern.clone());
        }
    }
    Ok(files)
}
