//! Error types for the ponto-core library.

use thiserror::Error;

/// Main error type for the ponto library.
#[derive(Error, Debug)]
pub enum PontoError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Timesheet extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Spreadsheet export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// Failed to decode a page content stream.
    #[error("failed to decode content of page {page}: {reason}")]
    Content { page: u32, reason: String },

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to timesheet extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Neither extraction tier produced a record.
    #[error("no time-clock records found")]
    NoRecords,

    /// A configured pattern failed to compile.
    #[error("invalid {name} pattern: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    /// The column layout cannot hold a name, a date and times.
    #[error("column layout needs at least 2 columns, got {0}")]
    ColumnLayout(usize),
}

/// Errors related to writing the spreadsheet.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The XLSX writer rejected an operation.
    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type for the ponto library.
pub type Result<T> = std::result::Result<T, PontoError>;
