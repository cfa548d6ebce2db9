//! Common regex patterns for time-clock report cleanup.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Separators that leak into the name column from wrapped cells
    pub static ref NAME_SEPARATORS: Regex = Regex::new(r"[\n;:]").unwrap();

    // Anything that cannot be part of a person's name
    pub static ref NAME_NOISE: Regex = Regex::new(r"[^\w\s\-]").unwrap();

    pub static ref MULTI_SPACE: Regex = Regex::new(r"\s{2,}").unwrap();

    pub static ref MULTI_NEWLINE: Regex = Regex::new(r"\n{2,}").unwrap();

    pub static ref BLANK_CELL: Regex = Regex::new(r"^\s*$").unwrap();
}

/// Normalise a name cell: separators and punctuation become spaces,
/// whitespace runs collapse.
pub fn clean_name(text: &str) -> String {
    let text = NAME_SEPARATORS.replace_all(text, " ");
    let text = NAME_NOISE.replace_all(&text, " ");
    MULTI_SPACE.replace_all(&text, " ").trim().to_string()
}

/// Normalise a data cell: blank and placeholder values become empty.
pub fn clean_cell(text: &str) -> String {
    if BLANK_CELL.is_match(text) || text == "nan" || text == "None" {
        String::new()
    } else {
        text.to_string()
    }
}
