//! Configuration structures for the conversion pipeline.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ExtractionError, PontoError};

/// Main configuration for the ponto pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PontoConfig {
    /// Column names, in the order they appear in the report.
    ///
    /// The first column holds the person's name, the second the date and
    /// every following column a clock time or total.
    pub columns: Vec<String>,

    /// Default input/output paths.
    pub paths: PathsConfig,

    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Table detection configuration.
    pub table: TableConfig,

    /// Spreadsheet output configuration.
    pub output: OutputConfig,
}

impl Default for PontoConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            paths: PathsConfig::default(),
            extraction: ExtractionConfig::default(),
            table: TableConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

fn default_columns() -> Vec<String> {
    [
        "Nome",
        "Data",
        "Entr.Manha",
        "Saíd.Manha",
        "Entr.Tarde",
        "Said.Tarde",
        "Total",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

/// Paths used when none are given on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Input PDF.
    pub input: PathBuf,

    /// Output workbook.
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("entrada.pdf"),
            output: PathBuf::from("saida.xlsx"),
        }
    }
}

/// Which extraction tiers to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Structured tables first, then text patterns.
    #[default]
    Auto,
    /// Structured tables only.
    Table,
    /// Text patterns only.
    Text,
}

/// Record extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Which tiers to run.
    pub strategy: ExtractionStrategy,

    /// Rows containing any of these (case-insensitive) are dropped from
    /// detected tables as headers or footers.
    pub header_keywords: Vec<String>,

    /// Pattern locating a record date in plain text.
    pub date_pattern: String,

    /// Pattern locating a clock time in plain text.
    pub time_pattern: String,

    /// How many characters before a date are searched for its times.
    pub lookbehind_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strategy: ExtractionStrategy::Auto,
            header_keywords: [
                "nome",
                "data",
                "entr",
                "said",
                "tarde",
                "manha",
                "instituição",
                "página",
                "emissão",
                "estado de mato grosso",
                "relação de registro",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            date_pattern: r"\d{2}/\d{2}/\d{4}".to_string(),
            time_pattern: r"\d{2}:\d{2}:\d{2}".to_string(),
            lookbehind_chars: 400,
        }
    }
}

/// Table detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Maximum baseline difference (points) for fragments on one line.
    pub row_tolerance: f32,

    /// Maximum gap (in ems) between fragments merged into one cell.
    pub cell_gap: f32,

    /// Maximum distance (points) between left edges in one column.
    pub column_tolerance: f32,

    /// Minimum cells on a line for it to count as a table row.
    pub min_columns: usize,

    /// Minimum consecutive table rows for a table.
    pub min_rows: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 3.0,
            cell_gap: 1.0,
            column_tolerance: 12.0,
            min_columns: 3,
            min_rows: 2,
        }
    }
}

/// Spreadsheet output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Worksheet name.
    pub sheet_name: String,

    /// Write dates and times as Excel serial values instead of text.
    pub native_types: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            native_types: false,
        }
    }
}

impl PontoConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Check the column layout and the text patterns.
    pub fn validate(&self) -> Result<(), PontoError> {
        if self.columns.len() < 2 {
            return Err(ExtractionError::ColumnLayout(self.columns.len()).into());
        }
        if self.columns.iter().any(|c| c.trim().is_empty()) {
            return Err(PontoError::Config("column names must not be empty".to_string()));
        }

        Regex::new(&self.extraction.date_pattern)
            .map_err(|source| ExtractionError::Pattern { name: "date", source })?;
        Regex::new(&self.extraction.time_pattern)
            .map_err(|source| ExtractionError::Pattern { name: "time", source })?;

        if self.table.min_columns == 0 || self.table.min_rows == 0 {
            return Err(PontoError::Config(
                "table.min_columns and table.min_rows must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Number of time columns following the name and date.
    pub fn time_columns(&self) -> usize {
        self.columns.len().saturating_sub(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_layout() {
        let config = PontoConfig::default();
        assert_eq!(config.columns.len(), 7);
        assert_eq!(config.columns[0], "Nome");
        assert_eq!(config.time_columns(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PontoConfig =
            serde_json::from_str(r#"{"extraction": {"strategy": "text"}}"#).unwrap();
        assert_eq!(config.extraction.strategy, ExtractionStrategy::Text);
        assert_eq!(config.extraction.lookbehind_chars, 400);
        assert_eq!(config.output.sheet_name, "Sheet1");
    }

    #[test]
    fn test_validate_rejects_short_layout() {
        let config = PontoConfig {
            columns: vec!["Nome".to_string()],
            ..PontoConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PontoError::Extraction(ExtractionError::ColumnLayout(1)))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let mut config = PontoConfig::default();
        config.extraction.time_pattern = r"\d{2".to_string();
        assert!(matches!(
            config.validate(),
            Err(PontoError::Extraction(ExtractionError::Pattern { name: "time", .. }))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PontoConfig::default();
        config.output.native_types = true;
        config.save(&path).unwrap();

        let loaded = PontoConfig::from_file(&path).unwrap();
        assert!(loaded.output.native_types);
        assert_eq!(loaded.columns, config.columns);
    }
}
