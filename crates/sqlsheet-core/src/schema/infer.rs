//! Schema inference
//!
//! Two mutually exclusive strategies. The declared path reads columns
//! straight out of CREATE TABLE bodies; the inferred path is only tried when
//! no tables were declared at all, and reconstructs a schema from INSERT
//! column lists plus a sampled first row.

use tracing::debug;

use crate::extract::{CreateTable, Insert};
use crate::types::{ColumnType, SemanticType};
use crate::values;

use super::{Column, Table};

/// How many tables the INSERT-inference fallback may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InferenceMode {
    /// Build a table for every distinct INSERT target.
    #[default]
    AllTables,
    /// Stop after the first inferred table. Matches the historical converter
    /// behavior for callers that depend on single-sheet output.
    FirstTableOnly,
}

/// Build tables from declared CREATE TABLE bodies.
///
/// The body is split into column definitions at top-level commas (commas
/// inside type arguments like `DECIMAL(10,2)` or inside quoted defaults do
/// not split). Definitions that open with a table-level constraint keyword
/// (`PRIMARY KEY`, `KEY`, `UNIQUE`, `CONSTRAINT`) never produce a column.
/// For the rest, the leading identifier is the column name and the following
/// type token is kept verbatim.
pub fn tables_from_creates(stmts: &[CreateTable]) -> Vec<Table> {
    stmts
        .iter()
        .map(|stmt| {
            let mut table = Table::new(stmt.name.clone());
            for def in split_definitions(&stmt.body) {
                let def = def.trim();
                if def.is_empty() || is_constraint_line(def) {
                    continue;
                }
                if let Some(column) = parse_column_line(def) {
                    table.columns.push(column);
                }
            }
            debug!(table = %table.name, columns = table.columns.len(), "declared schema");
            table
        })
        .collect()
}

/// Split a CREATE TABLE body at depth-0 commas, treating quoted literals as
/// opaque.
fn split_definitions(body: &str) -> Vec<&str> {
    let mut defs = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    defs.push(&body[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    defs.push(&body[start..]);
    defs
}

/// Fallback: build tables from INSERT statements when nothing was declared.
///
/// Column names come from the INSERT column list; types are classified from
/// the first tuple's tokens, sampled with quotes intact so quoted numerics
/// stay textual. Repeat INSERTs into a table already seen add nothing.
pub fn tables_from_inserts(stmts: &[Insert], mode: InferenceMode) -> Vec<Table> {
    let mut tables: Vec<Table> = Vec::new();

    for stmt in stmts {
        if tables.iter().any(|t| t.name == stmt.table) {
            continue;
        }
        let Some(first_tuple) = stmt.tuples.first() else {
            continue;
        };
        let samples = values::tokenize_keeping_quotes(first_tuple);

        let columns = stmt
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let sample = samples.get(idx).map(String::as_str).unwrap_or("");
                Column::new(name, ColumnType::Semantic(SemanticType::of_literal(sample)))
            })
            .collect();

        debug!(table = %stmt.table, "inferred schema from INSERT");
        tables.push(Table {
            name: stmt.table.clone(),
            columns,
        });

        if mode == InferenceMode::FirstTableOnly {
            break;
        }
    }
    tables
}

/// Table-level constraint lines, never columns.
fn is_constraint_line(line: &str) -> bool {
    const PREFIXES: [&str; 4] = ["PRIMARY KEY", "KEY", "UNIQUE", "CONSTRAINT"];
    let bytes = line.as_bytes();
    PREFIXES.iter().any(|p| {
        bytes.len() >= p.len()
            && bytes[..p.len()].eq_ignore_ascii_case(p.as_bytes())
            // word boundary, so a column named `keyring` is not a constraint
            && bytes
                .get(p.len())
                .map_or(true, |b| !b.is_ascii_alphanumeric() && *b != b'_')
    })
}

/// `` `name` TYPE(args) extras `` → Column. Returns None for definitions
/// with no identifier or no type token. The type token runs to the first
/// whitespace outside parentheses, so `DECIMAL(10,2)` survives whole.
fn parse_column_line(line: &str) -> Option<Column> {
    let rest = line.trim_start();
    let (name, rest) = read_leading_identifier(rest)?;

    let rest = rest.trim_start();
    let mut depth = 0usize;
    let mut ty_end = rest.len();
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && c.is_whitespace() => {
                ty_end = i;
                break;
            }
            _ => {}
        }
    }
    let ty = &rest[..ty_end];
    if ty.is_empty() {
        return None;
    }
    Some(Column::new(name, ColumnType::Declared(ty.to_string())))
}

fn read_leading_identifier(s: &str) -> Option<(&str, &str)> {
    if let Some(stripped) = s.strip_prefix('`') {
        let end = stripped.find('`')?;
        return Some((&stripped[..end], &stripped[end + 1..]));
    }
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    (end > 0).then(|| (&s[..end], &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create(name: &str, body: &str) -> CreateTable {
        CreateTable {
            name: name.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_declared_columns_preserve_raw_types() {
        let stmt = create(
            "users",
            "  `id` INT NOT NULL,\n  name VARCHAR(255),\n  balance DECIMAL(10,2)\n",
        );
        let tables = tables_from_creates(&[stmt]);
        assert_eq!(tables.len(), 1);
        let cols = &tables[0].columns;
        assert_eq!(cols.len(), 3);
        assert_eq!(cols[0].name, "id");
        assert_eq!(cols[0].ty, ColumnType::Declared("INT".into()));
        assert_eq!(cols[1].ty, ColumnType::Declared("VARCHAR(255)".into()));
        assert_eq!(cols[2].ty, ColumnType::Declared("DECIMAL(10,2)".into()));
    }

    #[test]
    fn test_single_line_body_yields_all_columns() {
        let stmt = create("users", "id INT, name VARCHAR(255)");
        let tables = tables_from_creates(&[stmt]);
        let cols = &tables[0].columns;
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[1].name, "name");
    }

    #[test]
    fn test_comma_in_type_args_does_not_split() {
        let stmt = create("t", "price DECIMAL(10,2), tag ENUM('a','b')");
        let cols = &tables_from_creates(&[stmt])[0].columns;
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0].ty, ColumnType::Declared("DECIMAL(10,2)".into()));
        assert_eq!(cols[1].ty, ColumnType::Declared("ENUM('a','b')".into()));
    }

    #[test]
    fn test_quoted_default_with_comma_does_not_split() {
        let stmt = create("t", "a VARCHAR(10) DEFAULT 'x,y', b INT");
        assert_eq!(tables_from_creates(&[stmt])[0].columns.len(), 2);
    }

    #[test]
    fn test_constraint_lines_never_produce_columns() {
        let stmt = create(
            "t",
            "id INT,\nPRIMARY KEY (id),\nKEY idx_a (a),\nUNIQUE (b),\nCONSTRAINT fk FOREIGN KEY (c) REFERENCES x(id)\n",
        );
        let tables = tables_from_creates(&[stmt]);
        assert_eq!(tables[0].columns.len(), 1);
        assert_eq!(tables[0].columns[0].name, "id");
    }

    #[test]
    fn test_constraint_prefix_case_insensitive() {
        let stmt = create("t", "id INT,\nprimary key (id)\n");
        assert_eq!(tables_from_creates(&[stmt])[0].columns.len(), 1);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let stmt = create("t", "b INT,\na INT,\nc INT\n");
        let names = tables_from_creates(&[stmt])[0]
            .columns
            .iter()
            .map(|c| c.name.clone())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    fn insert(table: &str, columns: &[&str], tuples: &[&str]) -> Insert {
        Insert {
            table: table.to_string(),
            columns: columns.iter().map(|s| s.to_string()).collect(),
            tuples: tuples.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_inferred_types_from_first_tuple() {
        let stmt = insert(
            "t",
            &["a", "b", "c", "d"],
            &["1, 'x', 2.5, 2024-01-01", "9, 'y', 3.5, 2024-02-02"],
        );
        let tables = tables_from_inserts(&[stmt], InferenceMode::AllTables);
        let cols = &tables[0].columns;
        assert_eq!(cols[0].ty, ColumnType::Semantic(SemanticType::Integer));
        assert_eq!(cols[1].ty, ColumnType::Semantic(SemanticType::Text));
        assert_eq!(cols[2].ty, ColumnType::Semantic(SemanticType::Decimal));
        assert_eq!(cols[3].ty, ColumnType::Semantic(SemanticType::Date));
    }

    #[test]
    fn test_inferred_missing_sample_defaults_to_text() {
        let stmt = insert("t", &["a", "b"], &["1"]);
        let tables = tables_from_inserts(&[stmt], InferenceMode::AllTables);
        assert_eq!(
            tables[0].columns[1].ty,
            ColumnType::Semantic(SemanticType::Text)
        );
    }

    #[test]
    fn test_first_table_only_mode_stops() {
        let stmts = [
            insert("a", &["x"], &["1"]),
            insert("b", &["y"], &["2"]),
        ];
        let all = tables_from_inserts(&stmts, InferenceMode::AllTables);
        assert_eq!(all.len(), 2);
        let first = tables_from_inserts(&stmts, InferenceMode::FirstTableOnly);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name, "a");
    }

    #[test]
    fn test_repeat_inserts_do_not_duplicate_tables() {
        let stmts = [insert("a", &["x"], &["1"]), insert("a", &["x"], &["2"])];
        let tables = tables_from_inserts(&stmts, InferenceMode::AllTables);
        assert_eq!(tables.len(), 1);
    }
}
