//! Row materialization
//!
//! Turns extracted VALUES tuples into finalized records, padding with
//! synthetic data when extraction comes up short of the requested count.

mod synth;

use indexmap::IndexMap;
use rand::Rng;
use serde::Serialize;

use crate::schema::Table;

/// One display value in an output cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Integer(n) => write!(f, "{}", n),
            Cell::Decimal(n) => write!(f, "{}", n),
        }
    }
}

/// One finalized output row: column name → display value, in column order.
pub type Record = IndexMap<String, Cell>;

/// Build exactly `requested` records for `table`.
///
/// The first `min(raw_rows.len(), requested)` come from extracted tuples:
/// positional tokens with one surrounding quote pair stripped and the literal
/// `NULL` mapped to empty. The remainder is synthesized per column type. Rows
/// shorter than the column list pad with empty values; longer rows are
/// truncated. The real-data prefix is deterministic; only synthesis draws
/// from `rng`.
pub fn materialize<R: Rng>(
    table: &Table,
    raw_rows: &[Vec<String>],
    requested: usize,
    rng: &mut R,
) -> Vec<Record> {
    let mut records = Vec::with_capacity(requested);
    let available = raw_rows.len().min(requested);

    for raw in &raw_rows[..available] {
        let record = table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let token = raw.get(idx).map(String::as_str).unwrap_or("");
                (column.name.clone(), Cell::Text(clean_token(token)))
            })
            .collect();
        records.push(record);
    }

    for index in available..requested {
        let record = table
            .columns
            .iter()
            .map(|column| {
                let cell = synth::cell(column.ty.semantic(), index, rng);
                (column.name.clone(), cell)
            })
            .collect();
        records.push(record);
    }

    records
}

/// Synthesize `count` records with no source data at all.
pub fn synthesize<R: Rng>(table: &Table, count: usize, rng: &mut R) -> Vec<Record> {
    materialize(table, &[], count, rng)
}

/// Strip one matching pair of surrounding quotes and map `NULL` to empty.
fn clean_token(token: &str) -> String {
    if token == "NULL" {
        return String::new();
    }
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            return token[1..token.len() - 1].to_string();
        }
    }
    token.to_string()
}
