//! Records from plain document text.
//!
//! Each date in the text anchors one record; the clock times and the name
//! are searched in the text just before it.

use regex::Regex;
use tracing::debug;

use super::patterns::{MULTI_NEWLINE, clean_name};
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::timesheet::TimesheetRecord;

/// Pattern-based record parser for text without usable tables.
pub struct TextRecordParser {
    date: Regex,
    time: Regex,
    lookbehind_chars: usize,
    time_slots: usize,
}

impl TextRecordParser {
    /// Compile the configured patterns for a layout with `time_slots`
    /// time columns.
    pub fn new(config: &ExtractionConfig, time_slots: usize) -> Result<Self, ExtractionError> {
        let date = Regex::new(&config.date_pattern)
            .map_err(|source| ExtractionError::Pattern { name: "date", source })?;
        let time = Regex::new(&config.time_pattern)
            .map_err(|source| ExtractionError::Pattern { name: "time", source })?;

        Ok(Self {
            date,
            time,
            lookbehind_chars: config.lookbehind_chars,
            time_slots,
        })
    }

    /// Parse every dated record in `text`.
    pub fn parse(&self, text: &str) -> Vec<TimesheetRecord> {
        let text = normalize_text(text);

        let records: Vec<TimesheetRecord> = self
            .date
            .find_iter(&text)
            .map(|m| {
                let start = lookbehind_start(&text, m.start(), self.lookbehind_chars);
                self.record_from_snippet(&text[start..m.end()], m.as_str())
            })
            .collect();

        debug!("Text patterns matched {} records", records.len());
        records
    }

    fn record_from_snippet(&self, snippet: &str, date: &str) -> TimesheetRecord {
        let found: Vec<&str> = self.time.find_iter(snippet).map(|t| t.as_str()).collect();
        let skip = found.len().saturating_sub(self.time_slots);

        let mut times: Vec<String> = found[skip..].iter().map(|t| t.to_string()).collect();
        times.resize(self.time_slots, String::new());

        let name_part = match self.time.find(snippet) {
            Some(first) => &snippet[..first.start()],
            None => snippet,
        };

        TimesheetRecord {
            name: clean_name(name_part.trim()),
            date: date.to_string(),
            times,
        }
    }
}

/// Tabs become spaces and blank lines are squeezed out.
fn normalize_text(text: &str) -> String {
    let text = text.replace('\t', " ");
    MULTI_NEWLINE.replace_all(&text, "\n").into_owned()
}

/// Byte offset `chars` characters before `end`, or 0.
fn lookbehind_start(text: &str, end: usize, chars: usize) -> usize {
    if chars == 0 {
        return end;
    }
    text[..end]
        .char_indices()
        .rev()
        .nth(chars - 1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}
