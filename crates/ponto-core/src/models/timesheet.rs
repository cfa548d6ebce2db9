//! Time-clock report data model.

use serde::{Deserialize, Serialize};

/// How the records of a timesheet were recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Structured tables rebuilt from positioned page text.
    Table,
    /// Pattern matching over the plain document text.
    Text,
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionMethod::Table => write!(f, "table"),
            ExtractionMethod::Text => write!(f, "text"),
        }
    }
}

/// One attendance row: who, when, and the clock times of that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesheetRecord {
    /// Person's name as printed in the report.
    pub name: String,
    /// Date as printed (`dd/mm/yyyy` in the usual layout).
    pub date: String,
    /// Clock times and totals; empty strings where a slot is blank.
    pub times: Vec<String>,
}

impl TimesheetRecord {
    /// Build a record from a row of cells laid out as name, date, times.
    ///
    /// The row is padded or truncated to `width` cells.
    pub fn from_cells(cells: Vec<String>, width: usize) -> Self {
        let mut cells = cells;
        cells.resize(width.max(2), String::new());

        let mut iter = cells.into_iter();
        let name = iter.next().unwrap_or_default();
        let date = iter.next().unwrap_or_default();

        Self {
            name,
            date,
            times: iter.collect(),
        }
    }

    /// All cells in column order.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        [self.name.as_str(), self.date.as_str()]
            .into_iter()
            .chain(self.times.iter().map(String::as_str))
    }
}

/// Extracted report, ready to be written out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timesheet {
    /// Column names.
    pub columns: Vec<String>,
    /// Records in document order.
    pub records: Vec<TimesheetRecord>,
    /// Tier that produced the records.
    pub method: ExtractionMethod,
}

impl Timesheet {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
