//! Excel serial values for report dates and clock times.

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Interpret a cell as a date or a clock time, returning the Excel serial
/// value and the number format to display it with.
pub(crate) fn parse_to_excel_serial(s: &str) -> Option<(&'static str, f64)> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%d/%m/%Y") {
        return Some(("dd/mm/yyyy", date_to_excel_serial(d)));
    }

    let time_formats = [("%H:%M:%S", "hh:mm:ss"), ("%H:%M", "hh:mm")];

    for (fmt, num_format) in time_formats {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            let seconds = t.num_seconds_from_midnight() as f64;
            return Some((num_format, seconds / 86400.0));
        }
    }

    None
}

fn date_to_excel_serial(d: NaiveDate) -> f64 {
    // 1899-12-30 absorbs Excel's phantom 1900-02-29
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    (d - epoch).num_days() as f64
}
