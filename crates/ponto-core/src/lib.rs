//! Core library for converting time-clock ("registro de ponto") PDF reports
//! into spreadsheets.
//!
//! This crate provides:
//! - PDF loading, plain text and positioned text extraction
//! - Table detection from the layout of page text
//! - Record extraction from tables, with a text-pattern fallback
//! - XLSX output

pub mod error;
pub mod export;
pub mod models;
pub mod pdf;
pub mod table;
pub mod timesheet;

pub use error::{PontoError, Result};
pub use export::XlsxWriter;
pub use models::config::{ExtractionStrategy, PontoConfig};
pub use models::timesheet::{ExtractionMethod, Timesheet, TimesheetRecord};
pub use pdf::{PdfExtractor, PdfProcessor, TextFragment};
pub use table::{DetectedTable, TableDetector};
pub use timesheet::{ExtractionResult, HybridTimesheetParser, TimesheetParser};
