//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "sqlsheet")]
#[command(author, version, about = "Convert SQL dump files into spreadsheet workbooks")]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert SQL dump files into workbooks
    Convert {
        /// Dump files to convert (supports glob patterns)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory for generated workbooks (default: current directory)
        #[arg(short, long = "out-dir", value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Workbook format
        #[arg(short, long, value_enum)]
        format: Option<WorkbookFormat>,

        /// Summary format
        #[arg(long, default_value = "human", value_enum)]
        summary: SummaryFormat,

        /// Only build the first table when falling back to INSERT inference
        /// (legacy single-sheet behavior)
        #[arg(long)]
        first_table_only: bool,

        /// Path to a configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Display the schema detected in dump files
    Schema {
        /// Dump files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Show extracted statements (for debugging)
    Inspect {
        /// Dump file to inspect
        file: PathBuf,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Default)]
pub enum WorkbookFormat {
    /// One CSV file per sheet, in a directory named after the workbook
    #[default]
    Csv,
    /// Single JSON file mapping sheet names to record arrays
    Json,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, Default)]
pub enum SummaryFormat {
    /// Human-readable summary
    #[default]
    Human,
    /// JSON summary (table descriptors plus the artifact path)
    Json,
}
