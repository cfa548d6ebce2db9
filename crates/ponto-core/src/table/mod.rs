//! Table structure recognition from positioned page text.
//!
//! Rebuilds rows and columns from the layout of text fragments, without
//! relying on ruling lines or tagged structure.

mod detector;

pub use detector::TableDetector;

/// A cell on one text line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCell {
    /// Left edge in user space.
    pub x: f32,
    /// Estimated right edge in user space.
    pub right: f32,
    /// Cell content.
    pub text: String,
}

/// A line of cells sharing a baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Baseline of the first fragment on the line.
    pub y: f32,
    /// Cells ordered left to right.
    pub cells: Vec<LineCell>,
}

/// A table recovered from a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTable {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of columns.
    pub num_cols: usize,
    /// Cell text, row-major; every row has `num_cols` entries.
    pub rows: Vec<Vec<String>>,
}

impl DetectedTable {
    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Get the cell at a position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Whether the table holds no text at all.
    pub fn is_blank(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.trim().is_empty()))
    }
}
