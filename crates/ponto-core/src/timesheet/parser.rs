//! Hybrid timesheet parser: structured tables first, text patterns second.

use std::time::Instant;

use tracing::{debug, info, warn};

use super::table::TableRecordBuilder;
use super::text::TextRecordParser;
use super::{Result, TimesheetParser};
use crate::error::{ExtractionError, PontoError};
use crate::models::config::{ExtractionStrategy, PontoConfig};
use crate::models::timesheet::{ExtractionMethod, Timesheet, TimesheetRecord};
use crate::pdf::PdfProcessor;
use crate::table::{DetectedTable, TableDetector};

/// Result of timesheet extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted records.
    pub timesheet: Timesheet,
    /// Extraction warnings (failed or skipped tiers).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Parser running the table tier and falling back to the text tier.
pub struct HybridTimesheetParser {
    config: PontoConfig,
}

impl HybridTimesheetParser {
    /// Create a parser from a validated configuration.
    pub fn new(config: PontoConfig) -> std::result::Result<Self, PontoError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Override the configured strategy.
    pub fn with_strategy(mut self, strategy: ExtractionStrategy) -> Self {
        self.config.extraction.strategy = strategy;
        self
    }

    fn detect_tables(&self, pdf: &dyn PdfProcessor) -> Result<Vec<DetectedTable>> {
        let detector = TableDetector::new(self.config.table.clone());
        let mut tables = Vec::new();

        for page in 1..=pdf.page_count() {
            let fragments = pdf.page_fragments(page)?;
            tables.extend(detector.detect(page, &fragments));
        }

        Ok(tables)
    }

    fn from_tables(&self, pdf: &dyn PdfProcessor) -> Result<Vec<TimesheetRecord>> {
        info!("Extracting tables from positioned text...");
        let tables = self.detect_tables(pdf)?;
        debug!("Detected {} tables", tables.len());

        let builder =
            TableRecordBuilder::new(self.config.columns.len(), &self.config.extraction.header_keywords);
        Ok(builder.build(&tables))
    }

    fn from_text(&self, pdf: &dyn PdfProcessor) -> Result<Vec<TimesheetRecord>> {
        info!("Extracting records from plain text...");
        let parser = TextRecordParser::new(&self.config.extraction, self.config.time_columns())?;
        let text = pdf.extract_text()?;
        Ok(parser.parse(&text))
    }

    fn timesheet(&self, records: Vec<TimesheetRecord>, method: ExtractionMethod) -> Timesheet {
        Timesheet {
            columns: self.config.columns.clone(),
            records,
            method,
        }
    }
}

impl TimesheetParser for HybridTimesheetParser {
    fn parse(&self, pdf: &dyn PdfProcessor) -> Result<ExtractionResult> {
        let start = Instant::now();
        let strategy = self.config.extraction.strategy;
        let mut warnings = Vec::new();

        if strategy != ExtractionStrategy::Text {
            match self.from_tables(pdf) {
                Ok(records) if !records.is_empty() => {
                    info!("Table extraction produced {} records", records.len());
                    return Ok(ExtractionResult {
                        timesheet: self.timesheet(records, ExtractionMethod::Table),
                        warnings,
                        processing_time_ms: start.elapsed().as_millis() as u64,
                    });
                }
                Ok(_) => {
                    warn!("No table rows detected");
                    warnings.push("no table rows detected".to_string());
                }
                Err(e) => {
                    warn!("Table extraction failed: {}", e);
                    warnings.push(format!("table extraction failed: {}", e));
                }
            }

            if strategy == ExtractionStrategy::Table {
                return Err(ExtractionError::NoRecords.into());
            }
            info!("Falling back to text patterns");
        }

        let records = self.from_text(pdf)?;
        if records.is_empty() {
            warn!("No records found in document text");
            return Err(ExtractionError::NoRecords.into());
        }

        info!("Text extraction produced {} records", records.len());
        Ok(ExtractionResult {
            timesheet: self.timesheet(records, ExtractionMethod::Text),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;
    use crate::pdf::fixtures::{literal, show_at, single_page_pdf};
    use crate::pdf::{PdfExtractor, TextFragment};
    use lopdf::{Object, StringFormat};
    use pretty_assertions::assert_eq;

    /// In-memory document: one fragment list per page plus its plain text.
    struct FakePdf {
        pages: Vec<Vec<TextFragment>>,
        text: String,
        broken_page: Option<u32>,
    }

    impl PdfProcessor for FakePdf {
        fn load(&mut self, _data: &[u8]) -> crate::pdf::Result<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn extract_text(&self) -> crate::pdf::Result<String> {
            Ok(self.text.clone())
        }

        fn page_fragments(&self, page: u32) -> crate::pdf::Result<Vec<TextFragment>> {
            if self.broken_page == Some(page) {
                return Err(PdfError::Content {
                    page,
                    reason: "bad stream".to_string(),
                });
            }
            self.pages
                .get(page as usize - 1)
                .cloned()
                .ok_or(PdfError::InvalidPage(page))
        }
    }

    fn frag(x: f32, y: f32, text: &str) -> TextFragment {
        TextFragment {
            x,
            y,
            width: text.chars().count() as f32 * 5.0,
            font_size: 10.0,
            text: text.to_string(),
        }
    }

    fn row(y: f32, cells: &[&str]) -> Vec<TextFragment> {
        let xs = [30.0, 160.0, 230.0, 300.0, 370.0, 440.0, 510.0];
        cells
            .iter()
            .zip(xs)
            .filter(|(c, _)| !c.is_empty())
            .map(|(c, x)| frag(x, y, c))
            .collect()
    }

    fn table_page() -> Vec<TextFragment> {
        let mut page = vec![frag(30.0, 800.0, "RELAÇÃO DE REGISTRO DE PONTO")];
        page.extend(row(760.0, &["Nome", "Data", "Entr.Manha", "Saíd.Manha", "Entr.Tarde", "Said.Tarde", "Total"]));
        page.extend(row(740.0, &["ANA LIMA", "01/03/2024", "07:00:00", "11:00:00", "13:00:00", "17:00:00", "08:00:00"]));
        page.extend(row(725.0, &["ANA LIMA", "02/03/2024", "07:10:00", "11:00:00", "", "", "03:50:00"]));
        page.extend(row(710.0, &["ANA LIMA", "03/03/2024", "07:00:00", "11:00:00", "13:00:00", "17:05:00", "08:05:00"]));
        page
    }

    const PLAIN_TEXT: &str = "Relação de registro\n\nBRUNO COSTA\n07:00:00\n11:00:00\n13:00:00\n17:00:00\n08:00:00\n04/03/2024\n";

    fn parser() -> HybridTimesheetParser {
        HybridTimesheetParser::new(PontoConfig::default()).unwrap()
    }

    #[test]
    fn test_table_rows_match_visible_rows() {
        let pdf = FakePdf {
            pages: vec![table_page()],
            text: PLAIN_TEXT.to_string(),
            broken_page: None,
        };

        let result = parser().parse(&pdf).unwrap();
        let sheet = &result.timesheet;
        assert_eq!(sheet.method, ExtractionMethod::Table);
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.records[1].date, "02/03/2024");
        assert_eq!(sheet.records[1].times, vec!["07:10:00", "11:00:00", "", "", "03:50:00"]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_falls_back_to_text_without_tables() {
        let pdf = FakePdf {
            pages: vec![vec![frag(30.0, 800.0, "BRUNO COSTA 04/03/2024")]],
            text: PLAIN_TEXT.to_string(),
            broken_page: None,
        };

        let result = parser().parse(&pdf).unwrap();
        let sheet = &result.timesheet;
        assert_eq!(sheet.method, ExtractionMethod::Text);
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.records[0].date, "04/03/2024");
        assert_eq!(sheet.records[0].times[0], "07:00:00");
        assert_eq!(sheet.records[0].times[4], "08:00:00");
        assert_eq!(result.warnings, vec!["no table rows detected"]);
    }

    #[test]
    fn test_page_errors_fall_back_with_warning() {
        let pdf = FakePdf {
            pages: vec![table_page()],
            text: PLAIN_TEXT.to_string(),
            broken_page: Some(1),
        };

        let result = parser().parse(&pdf).unwrap();
        assert_eq!(result.timesheet.method, ExtractionMethod::Text);
        assert!(result.warnings[0].starts_with("table extraction failed"));
    }

    #[test]
    fn test_table_only_strategy_does_not_fall_back() {
        let pdf = FakePdf {
            pages: vec![vec![]],
            text: PLAIN_TEXT.to_string(),
            broken_page: None,
        };

        let result = parser().with_strategy(ExtractionStrategy::Table).parse(&pdf);
        assert!(matches!(
            result,
            Err(PontoError::Extraction(ExtractionError::NoRecords))
        ));
    }

    #[test]
    fn test_text_strategy_skips_tables() {
        let pdf = FakePdf {
            pages: vec![table_page()],
            text: PLAIN_TEXT.to_string(),
            broken_page: None,
        };

        let result = parser().with_strategy(ExtractionStrategy::Text).parse(&pdf).unwrap();
        assert_eq!(result.timesheet.method, ExtractionMethod::Text);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_nothing_found_is_an_error() {
        let pdf = FakePdf {
            pages: vec![vec![]],
            text: "Página 1".to_string(),
            broken_page: None,
        };

        assert!(matches!(
            parser().parse(&pdf),
            Err(PontoError::Extraction(ExtractionError::NoRecords))
        ));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let pdf = FakePdf {
            pages: vec![table_page(), table_page()],
            text: PLAIN_TEXT.to_string(),
            broken_page: None,
        };

        let first = parser().parse(&pdf).unwrap().timesheet;
        let second = parser().parse(&pdf).unwrap().timesheet;
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_punctuated_name_stays_in_name_column() {
        let xs = [30, 160, 230, 300, 370, 440, 510];
        let mut ops = Vec::new();
        for (y, date) in [(740, "01/03/2024"), (725, "02/03/2024")] {
            ops.extend(show_at(
                xs[0],
                y,
                Object::String(b"JOANA D\x92AVILA".to_vec(), StringFormat::Literal),
            ));
            ops.extend(show_at(xs[1], y, literal(date)));
            for (x, time) in xs[2..].iter().zip(["07:00:00", "11:00:00", "13:00:00", "17:00:00", "08:00:00"]) {
                ops.extend(show_at(*x, y, literal(time)));
            }
        }
        let mut pdf = PdfExtractor::new();
        pdf.load(&single_page_pdf(ops)).unwrap();

        let result = parser().parse(&pdf).unwrap();
        let sheet = &result.timesheet;
        assert_eq!(sheet.method, ExtractionMethod::Table);
        let names: Vec<&str> = sheet.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["JOANA D AVILA", "JOANA D AVILA"]);
        assert_eq!(sheet.records[1].date, "02/03/2024");
        assert_eq!(sheet.records[1].times[4], "08:00:00");
    }

    #[test]
    fn test_undecodable_cell_keeps_other_columns_in_place() {
        let mut page = Vec::new();
        for (y, date) in [(740.0, "01/03/2024"), (725.0, "02/03/2024")] {
            let mut cells = row(y, &["", date, "07:00:00", "11:00:00", "13:00:00", "17:00:00", "08:00:00"]);
            // Glyphs without a Unicode mapping leave a blank fragment behind
            cells.insert(0, TextFragment { width: 60.0, ..frag(30.0, y, "") });
            page.extend(cells);
        }
        let pdf = FakePdf {
            pages: vec![page],
            text: String::new(),
            broken_page: None,
        };

        let sheet = parser().parse(&pdf).unwrap().timesheet;
        assert_eq!(sheet.method, ExtractionMethod::Table);
        assert_eq!(sheet.records[0].name, "");
        assert_eq!(sheet.records[0].date, "01/03/2024");
        assert_eq!(sheet.records[1].times[0], "07:00:00");
    }
}
