//! sqlsheet-core: SQL dump to spreadsheet conversion library
//!
//! This library parses SQL dump files (CREATE TABLE / INSERT statements),
//! infers table schemas, reconstructs row data, and produces one sheet of
//! records per table, ready to be handed to a workbook writer.

pub mod convert;
pub mod error;
pub mod extract;
pub mod rows;
pub mod schema;
pub mod types;
pub mod values;

pub use convert::{Conversion, ConvertOptions, Converter, Sheet};
pub use error::{Error, Result};
pub use rows::{Cell, Record};
pub use schema::{Column, InferenceMode, Table};
pub use types::{ColumnType, SemanticType};
