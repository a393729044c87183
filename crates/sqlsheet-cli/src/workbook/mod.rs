//! Workbook writing
//!
//! The engine treats workbook serialization as opaque: one sheet per table,
//! sheet name = table name, header row = column names, one row per record in
//! column order. Two on-disk shapes are supported: a directory of CSV files
//! (one per sheet) or a single JSON file mapping sheet names to record
//! arrays. Artifacts are named `converted_<unixTimeMillis>` so concurrent
//! conversions never collide.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Utc;
use miette::{IntoDiagnostic, Result};
use sqlsheet_core::{Conversion, Sheet};

use crate::args::WorkbookFormat;

pub struct WorkbookWriter {
    format: WorkbookFormat,
    out_dir: PathBuf,
}

impl WorkbookWriter {
    pub fn new(format: WorkbookFormat, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            format,
            out_dir: out_dir.into(),
        }
    }

    /// Write the workbook and return the artifact path.
    pub fn write(&self, conversion: &Conversion) -> Result<PathBuf> {
        fs::create_dir_all(&self.out_dir).into_diagnostic()?;
        let stem = format!("converted_{}", Utc::now().timestamp_millis());

        match self.format {
            WorkbookFormat::Json => self.write_json(conversion, &stem),
            WorkbookFormat::Csv => self.write_csv(conversion, &stem),
        }
    }

    fn write_json(&self, conversion: &Conversion, stem: &str) -> Result<PathBuf> {
        let path = self.out_dir.join(format!("{}.json", stem));

        let mut sheets = serde_json::Map::new();
        for sheet in &conversion.sheets {
            sheets.insert(
                sheet.table.name.clone(),
                serde_json::to_value(&sheet.records).into_diagnostic()?,
            );
        }

        let file = File::create(&path).into_diagnostic()?;
        serde_json::to_writer_pretty(BufWriter::new(file), &sheets).into_diagnostic()?;
        Ok(path)
    }

    fn write_csv(&self, conversion: &Conversion, stem: &str) -> Result<PathBuf> {
        let dir = self.out_dir.join(stem);
        fs::create_dir_all(&dir).into_diagnostic()?;

        for sheet in &conversion.sheets {
            let path = dir.join(format!("{}.csv", sheet.table.name));
            let file = File::create(&path).into_diagnostic()?;
            write_sheet_csv(BufWriter::new(file), sheet).into_diagnostic()?;
        }
        Ok(dir)
    }
}

fn write_sheet_csv(mut out: impl Write, sheet: &Sheet) -> std::io::Result<()> {
    let header: Vec<String> = sheet
        .table
        .columns
        .iter()
        .map(|c| csv_field(&c.name))
        .collect();
    writeln!(out, "{}", header.join(","))?;

    for record in &sheet.records {
        let row: Vec<String> = record.values().map(|v| csv_field(&v.to_string())).collect();
        writeln!(out, "{}", row.join(","))?;
    }
    out.flush()
}

/// Quote a field when it contains a comma, quote, or newline; embedded quotes
/// are doubled.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
