//! Conversion summaries

use std::path::Path;

use sqlsheet_core::Conversion;

use crate::args::SummaryFormat;

/// Prints per-dump conversion results.
pub struct SummaryPrinter {
    format: SummaryFormat,
    quiet: bool,
}

impl SummaryPrinter {
    pub fn new(format: SummaryFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn print_success(&self, source: &Path, conversion: &Conversion, artifact: &Path) {
        match self.format {
            SummaryFormat::Human => {
                if self.quiet {
                    return;
                }
                println!(
                    "{}: {} table(s) -> {}",
                    source.display(),
                    conversion.sheets.len(),
                    artifact.display()
                );
                for sheet in &conversion.sheets {
                    println!(
                        "  {} ({} columns, {} rows)",
                        sheet.table.name,
                        sheet.table.columns.len(),
                        sheet.records.len()
                    );
                }
            }
            SummaryFormat::Json => {
                let output = serde_json::json!({
                    "success": true,
                    "source": source.display().to_string(),
                    "workbook": artifact.display().to_string(),
                    "tables": conversion.tables().collect::<Vec<_>>(),
                });
                println!("{:#}", output);
            }
        }
    }

    pub fn print_empty(&self, source: &Path) {
        match self.format {
            SummaryFormat::Human => {
                eprintln!(
                    "{}: could not parse the dump or no table definitions found",
                    source.display()
                );
            }
            SummaryFormat::Json => {
                let output = serde_json::json!({
                    "success": false,
                    "source": source.display().to_string(),
                    "error": "could not parse the dump or no table definitions found",
                });
                println!("{:#}", output);
            }
        }
    }
}
