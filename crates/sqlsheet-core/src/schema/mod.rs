//! Schema extraction and inference

mod infer;
mod table;

pub use infer::{tables_from_creates, tables_from_inserts, InferenceMode};
pub use table::{Column, Table};
