//! Time-clock record extraction.

pub mod parser;
pub mod patterns;
pub mod table;
pub mod text;

pub use parser::{ExtractionResult, HybridTimesheetParser};
pub use table::TableRecordBuilder;
pub use text::TextRecordParser;

use crate::error::PontoError;
use crate::pdf::PdfProcessor;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, PontoError>;

/// Trait for timesheet parsing.
pub trait TimesheetParser {
    /// Parse the records of a loaded document.
    fn parse(&self, pdf: &dyn PdfProcessor) -> Result<ExtractionResult>;
}
