//! Conversion orchestration
//!
//! Wires the extraction, inference and materialization stages into one pass
//! over a dump: raw SQL text in, one sheet of records per detected table out.
//! Everything is rebuilt from scratch per call; nothing is shared between
//! conversions.

use std::collections::HashMap;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::rows::{self, Record};
use crate::schema::{self, InferenceMode, Table};
use crate::{extract, values};

/// Options controlling a conversion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions {
    pub inference: InferenceMode,
}

/// One output sheet: the table descriptor plus its finalized records.
#[derive(Debug, Clone, Serialize)]
pub struct Sheet {
    pub table: Table,
    pub records: Vec<Record>,
}

/// Result of converting one dump.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub sheets: Vec<Sheet>,
}

impl Conversion {
    /// True when no tables were detected — the recoverable "could not parse"
    /// condition the caller surfaces to the user.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.sheets.iter().map(|s| &s.table)
    }
}

/// Dump-to-sheets converter. Holds the options and the RNG used for
/// synthesized padding values.
pub struct Converter {
    options: ConvertOptions,
    rng: StdRng,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            rng: StdRng::from_entropy(),
        }
    }

    /// Converter with a fixed RNG seed, for reproducible synthesis.
    pub fn seeded(options: ConvertOptions, seed: u64) -> Self {
        Self {
            options,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Read a UTF-8 `.sql` dump from disk and convert it.
    pub fn convert_file(&mut self, path: impl AsRef<Path>) -> Result<Conversion> {
        let sql = std::fs::read_to_string(path)?;
        Ok(self.convert(&sql))
    }

    /// Convert raw dump text.
    ///
    /// Declared CREATE TABLE schemas win; the INSERT-inference fallback only
    /// runs when none were found. Each table is materialized from the rows of
    /// its own INSERT statements, requesting exactly as many records as rows
    /// were found, so synthesis only covers per-row extraction shortfalls.
    pub fn convert(&mut self, sql: &str) -> Conversion {
        let creates = extract::create_tables(sql);
        let inserts = extract::inserts(sql);

        let tables = if creates.is_empty() {
            debug!("no CREATE TABLE statements, falling back to INSERT inference");
            schema::tables_from_inserts(&inserts, self.options.inference)
        } else {
            schema::tables_from_creates(&creates)
        };

        if tables.is_empty() {
            warn!("no tables found in dump");
            return Conversion { sheets: Vec::new() };
        }

        let mut rows_by_table: HashMap<&str, Vec<Vec<String>>> = HashMap::new();
        for stmt in &inserts {
            let rows = rows_by_table.entry(stmt.table.as_str()).or_default();
            rows.extend(stmt.tuples.iter().map(|t| values::tokenize(t)));
        }

        let sheets = tables
            .into_iter()
            .map(|table| {
                let raw = rows_by_table
                    .get(table.name.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                let records = rows::materialize(&table, raw, raw.len(), &mut self.rng);
                debug!(table = %table.name, rows = records.len(), "materialized sheet");
                Sheet { table, records }
            })
            .collect();

        Conversion { sheets }
    }

    /// Synthesize `count` records for a known table with no source text.
    pub fn synthesize(&mut self, table: &Table, count: usize) -> Vec<Record> {
        rows::synthesize(table, count, &mut self.rng)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}
