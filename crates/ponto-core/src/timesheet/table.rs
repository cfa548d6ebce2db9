//! Records from detected tables.

use tracing::debug;

use super::patterns::{clean_cell, clean_name};
use crate::models::timesheet::TimesheetRecord;
use crate::table::DetectedTable;

/// Turns detected tables into records of a fixed column layout.
pub struct TableRecordBuilder {
    width: usize,
    keywords: Vec<String>,
}

impl TableRecordBuilder {
    /// Create a builder for `width` columns, dropping rows that mention any
    /// of `keywords`.
    pub fn new(width: usize, keywords: &[String]) -> Self {
        Self {
            width,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn is_header_or_footer(&self, row: &[String]) -> bool {
        row.iter().any(|cell| {
            let lower = cell.to_lowercase();
            self.keywords.iter().any(|k| lower.contains(k.as_str()))
        })
    }

    /// Build records from all tables, in order.
    pub fn build(&self, tables: &[DetectedTable]) -> Vec<TimesheetRecord> {
        let mut records = Vec::new();

        for table in tables {
            if table.is_blank() {
                continue;
            }

            let before = records.len();
            for row in &table.rows {
                let mut cells = row.clone();
                cells.resize(self.width, String::new());

                if self.is_header_or_footer(&cells) {
                    continue;
                }

                let cells = cells.iter().map(|c| clean_cell(c)).collect();
                let mut record = TimesheetRecord::from_cells(cells, self.width);
                record.name = clean_name(&record.name);
                records.push(record);
            }

            debug!(
                "Table on page {}: {} of {} rows kept",
                table.page,
                records.len() - before,
                table.num_rows()
            );
        }

        records
    }
}
