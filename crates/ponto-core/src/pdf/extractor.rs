//! PDF text extraction using lopdf and pdf-extract.

use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, warn};

use super::content::{FragmentCollector, TextFragment};
use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// pdf-extract works on its own lopdf release.
type LayoutDocument = pdf_extract::Document;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    layout: Option<LayoutDocument>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            layout: None,
            raw_data: Vec::new(),
        }
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a pdf-extract call, turning its panics into errors.
///
/// pdf-extract panics on some malformed font programs and resources.
fn guarded<T, E: Display>(
    task: impl FnOnce() -> std::result::Result<T, E>,
) -> std::result::Result<T, String> {
    match panic::catch_unwind(AssertUnwindSafe(task)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("aborted on malformed content".to_string()),
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted_data
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let layout = match LayoutDocument::load_mem(&raw_data) {
            Ok(layout) => Some(layout),
            Err(e) => {
                warn!("Page layout unavailable: {}", e);
                None
            }
        };

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        self.layout = layout;
        self.raw_data = raw_data;
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        self.document()?;

        let text = guarded(|| pdf_extract::extract_text_from_mem(&self.raw_data))
            .map_err(PdfError::TextExtraction)?;
        debug!("Extracted {} chars of text", text.len());
        Ok(text)
    }

    fn page_fragments(&self, page: u32) -> Result<Vec<TextFragment>> {
        let doc = self.document()?;
        if !doc.get_pages().contains_key(&page) {
            return Err(PdfError::InvalidPage(page));
        }

        let layout = self.layout.as_ref().ok_or_else(|| PdfError::Content {
            page,
            reason: "document structure not readable".to_string(),
        })?;

        let fragments = guarded(|| {
            let mut collector = FragmentCollector::new();
            pdf_extract::output_doc_page(layout, &mut collector, page)
                .map(|()| collector.into_fragments())
        })
        .map_err(|reason| PdfError::Content { page, reason })?;

        debug!("Page {}: {} text fragments", page, fragments.len());
        Ok(fragments)
    }
}
