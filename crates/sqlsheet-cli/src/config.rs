//! Configuration file handling

use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::args::WorkbookFormat;

/// Configuration for sqlsheet
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Output directory for generated workbooks
    pub out_dir: Option<String>,

    /// Workbook format ("csv" or "json")
    #[serde(default)]
    pub format: Option<String>,

    /// Legacy single-table behavior for INSERT-only dumps
    #[serde(default)]
    pub first_table_only: bool,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).into_diagnostic()?;
        let config: Config = toml::from_str(&contents).into_diagnostic()?;
        Ok(config)
    }

    /// Try to find and load sqlsheet.toml in current directory or parent directories
    pub fn find_and_load() -> Result<Option<Self>> {
        let mut current_dir = std::env::current_dir().into_diagnostic()?;

        loop {
            let config_path = current_dir.join("sqlsheet.toml");
            if config_path.exists() {
                return Ok(Some(Self::from_file(&config_path)?));
            }

            // Try parent directory
            if !current_dir.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Merge CLI arguments into configuration.
    /// CLI arguments take precedence over config file values.
    pub fn merge_with_args(
        mut self,
        out_dir: &Option<PathBuf>,
        format: &Option<WorkbookFormat>,
        first_table_only: bool,
    ) -> Self {
        if out_dir.is_some() {
            self.out_dir = out_dir.as_ref().map(|p| p.display().to_string());
        }

        if let Some(fmt) = format {
            self.format = Some(format!("{:?}", fmt).to_lowercase());
        }

        if first_table_only {
            self.first_table_only = true;
        }

        self
    }

    /// Resolved workbook format, defaulting to CSV.
    pub fn workbook_format(&self) -> WorkbookFormat {
        match self.format.as_deref() {
            Some("json") => WorkbookFormat::Json,
            _ => WorkbookFormat::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_override_config() {
        let config = Config {
            out_dir: Some("from_config".to_string()),
            format: Some("json".to_string()),
            first_table_only: false,
        };
        let merged = config.merge_with_args(
            &Some(PathBuf::from("from_cli")),
            &Some(WorkbookFormat::Csv),
            true,
        );
        assert_eq!(merged.out_dir.as_deref(), Some("from_cli"));
        assert_eq!(merged.format.as_deref(), Some("csv"));
        assert!(merged.first_table_only);
    }

    #[test]
    fn test_config_values_kept_without_cli_args() {
        let config = Config {
            out_dir: Some("kept".to_string()),
            format: Some("json".to_string()),
            first_table_only: true,
        };
        let merged = config.merge_with_args(&None, &None, false);
        assert_eq!(merged.out_dir.as_deref(), Some("kept"));
        assert_eq!(merged.workbook_format(), WorkbookFormat::Json);
        assert!(merged.first_table_only);
    }
}
