//! Spreadsheet export.

mod excel_date;
mod xlsx;

pub use xlsx::XlsxWriter;
