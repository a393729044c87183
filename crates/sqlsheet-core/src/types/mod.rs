//! Semantic type system
//!
//! Dumps carry type information in two forms: the raw declared type string of
//! a `CREATE TABLE` column (`INT`, `VARCHAR(255)`, ...) and, when no schema is
//! declared, whatever can be read off a sampled literal. Both collapse into a
//! small set of semantic types that drive value synthesis.

use serde::{Deserialize, Serialize};

/// Semantic type of a column, inferred from data or a declared type string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Integer,
    Decimal,
    Date,
    Text,
}

impl SemanticType {
    /// Classify a sampled literal token (quotes still attached, if any).
    ///
    /// Priority: `NULL`/empty → text, fully numeric → integer or decimal,
    /// leading `YYYY-MM-DD` → date, anything else → text.
    pub fn of_literal(sample: &str) -> Self {
        if sample.is_empty() || sample.eq_ignore_ascii_case("NULL") {
            return SemanticType::Text;
        }
        if sample.parse::<f64>().is_ok() {
            return if sample.contains('.') {
                SemanticType::Decimal
            } else {
                SemanticType::Integer
            };
        }
        if starts_with_iso_date(sample) {
            return SemanticType::Date;
        }
        SemanticType::Text
    }

    /// Classify a declared SQL type string for synthesis purposes.
    ///
    /// Substring match, case-insensitive, checked in the order `int`,
    /// `varchar`/`text`, `date`, `decimal`/`float`. Unrecognized types fall
    /// back to text so synthesis always has something to emit.
    pub fn of_declared(declared: &str) -> Self {
        let lower = declared.to_ascii_lowercase();
        if lower.contains("int") {
            SemanticType::Integer
        } else if lower.contains("varchar") || lower.contains("text") {
            SemanticType::Text
        } else if lower.contains("date") {
            SemanticType::Date
        } else if lower.contains("decimal") || lower.contains("float") {
            SemanticType::Decimal
        } else {
            SemanticType::Text
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SemanticType::Integer => "integer",
            SemanticType::Decimal => "decimal",
            SemanticType::Date => "date",
            SemanticType::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// Column type: either the raw declared string or an inferred semantic label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnType {
    /// Raw SQL type string from a CREATE TABLE body, preserved verbatim.
    Declared(String),
    /// Semantic label inferred from a sampled INSERT value.
    Semantic(SemanticType),
}

impl ColumnType {
    /// Semantic type used for synthetic value generation.
    pub fn semantic(&self) -> SemanticType {
        match self {
            ColumnType::Declared(raw) => SemanticType::of_declared(raw),
            ColumnType::Semantic(ty) => *ty,
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Declared(raw) => write!(f, "{}", raw),
            ColumnType::Semantic(ty) => write!(f, "{}", ty),
        }
    }
}

/// True when the value starts with a `YYYY-MM-DD` calendar shape.
fn starts_with_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() < 10 {
        return false;
    }
    b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5].is_ascii_digit()
        && b[6].is_ascii_digit()
        && b[7] == b'-'
        && b[8].is_ascii_digit()
        && b[9].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_classification() {
        assert_eq!(SemanticType::of_literal("42"), SemanticType::Integer);
        assert_eq!(SemanticType::of_literal("-17"), SemanticType::Integer);
        assert_eq!(SemanticType::of_literal("3.14"), SemanticType::Decimal);
        assert_eq!(SemanticType::of_literal("2024-01-31"), SemanticType::Date);
        assert_eq!(
            SemanticType::of_literal("2024-01-31 10:30:00"),
            SemanticType::Date
        );
        assert_eq!(SemanticType::of_literal("'hello'"), SemanticType::Text);
        assert_eq!(SemanticType::of_literal("NULL"), SemanticType::Text);
        assert_eq!(SemanticType::of_literal(""), SemanticType::Text);
    }

    #[test]
    fn test_literal_classification_is_pure() {
        for sample in ["42", "3.14", "2024-01-31", "abc", "NULL"] {
            assert_eq!(
                SemanticType::of_literal(sample),
                SemanticType::of_literal(sample)
            );
        }
    }

    #[test]
    fn test_declared_classification_order() {
        assert_eq!(SemanticType::of_declared("INT"), SemanticType::Integer);
        // "int" wins over "point"-style coincidences by design of the order
        assert_eq!(SemanticType::of_declared("BIGINT"), SemanticType::Integer);
        assert_eq!(
            SemanticType::of_declared("VARCHAR(255)"),
            SemanticType::Text
        );
        assert_eq!(SemanticType::of_declared("TEXT"), SemanticType::Text);
        assert_eq!(SemanticType::of_declared("DATE"), SemanticType::Date);
        assert_eq!(SemanticType::of_declared("DATETIME"), SemanticType::Date);
        assert_eq!(
            SemanticType::of_declared("DECIMAL(10,2)"),
            SemanticType::Decimal
        );
        assert_eq!(SemanticType::of_declared("FLOAT"), SemanticType::Decimal);
        assert_eq!(SemanticType::of_declared("BLOB"), SemanticType::Text);
    }

    #[test]
    fn test_date_shape_requires_full_prefix() {
        assert_eq!(SemanticType::of_literal("2024-1-31"), SemanticType::Text);
        assert_eq!(SemanticType::of_literal("2024-01"), SemanticType::Text);
    }

    #[test]
    fn test_column_type_semantic() {
        assert_eq!(
            ColumnType::Declared("DECIMAL(10,2)".into()).semantic(),
            SemanticType::Decimal
        );
        assert_eq!(
            ColumnType::Semantic(SemanticType::Date).semantic(),
            SemanticType::Date
        );
    }
}
