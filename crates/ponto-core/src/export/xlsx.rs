//! XLSX writer with a styled header and fitted column widths.

use std::path::Path;

use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use super::excel_date::parse_to_excel_serial;
use crate::error::ExportError;
use crate::models::config::OutputConfig;
use crate::models::timesheet::{Timesheet, TimesheetRecord};

/// Writes timesheets as single-sheet workbooks.
pub struct XlsxWriter {
    config: OutputConfig,
}

impl XlsxWriter {
    /// Create a writer with the given output options.
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Build the workbook in memory.
    pub fn build(&self, timesheet: &Timesheet) -> Result<Workbook, ExportError> {
        self.build_rows(&timesheet.columns, &timesheet.records)
    }

    fn build_rows(
        &self,
        columns: &[String],
        records: &[TimesheetRecord],
    ) -> Result<Workbook, ExportError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.config.sheet_name)?;

        let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);

        for (col, header) in columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, header, &header_format)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        let mut col_widths: Vec<usize> = columns
            .iter()
            .map(|h| UnicodeWidthStr::width(h.as_str()))
            .collect();

        for (row_index, record) in records.iter().enumerate() {
            let row = (row_index + 1) as u32;
            for (col, value) in record.cells().enumerate() {
                self.write_cell(worksheet, row, col as u16, value)?;
                if let Some(width) = col_widths.get_mut(col) {
                    *width = (*width).max(UnicodeWidthStr::width(value));
                }
            }
        }

        for (col, width) in col_widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width as f64 + 2.0)?;
        }

        debug!(
            "Built worksheet {:?}: {} rows x {} columns",
            self.config.sheet_name,
            records.len(),
            columns.len()
        );
        Ok(workbook)
    }

    /// Build the workbook and save it to `path`.
    pub fn write(&self, timesheet: &Timesheet, path: &Path) -> Result<(), ExportError> {
        let mut workbook = self.build(timesheet)?;
        workbook.save(path)?;
        info!("Wrote {} records to {}", timesheet.len(), path.display());
        Ok(())
    }

    /// Save a workbook holding only the header row.
    pub fn write_header_only(&self, columns: &[String], path: &Path) -> Result<(), ExportError> {
        let mut workbook = self.build_rows(columns, &[])?;
        workbook.save(path)?;
        info!("Wrote header-only workbook to {}", path.display());
        Ok(())
    }

    fn write_cell(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &str,
    ) -> Result<(), ExportError> {
        if value.is_empty() {
            return Ok(());
        }

        if self.config.native_types {
            if let Some((num_format, serial)) = parse_to_excel_serial(value) {
                let format = Format::new().set_num_format(num_format);
                worksheet.write_number_with_format(row, col, serial, &format)?;
                return Ok(());
            }
        }

        worksheet.write_string(row, col, value)?;
        Ok(())
    }
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}
