//! Positioned text from page content streams.
//!
//! pdf-extract interprets the content stream (graphics state stack, text
//! state, form XObjects) and decodes every glyph through its font's
//! encoding, `Differences` and `ToUnicode` map. This module collects the
//! glyphs of each text-showing operation into a [`TextFragment`].

use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use tracing::trace;

/// A run of text shown on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// Left edge in user space.
    pub x: f32,
    /// Baseline in user space (grows upwards).
    pub y: f32,
    /// Advance width in user space, from the font's glyph widths.
    pub width: f32,
    /// Font size after text and graphics scaling.
    pub font_size: f32,
    /// Decoded text.
    pub text: String,
}

impl TextFragment {
    /// Right edge in user space.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Collects glyphs into one fragment per text-showing operation.
#[derive(Default)]
pub struct FragmentCollector {
    fragments: Vec<TextFragment>,
    current: Option<TextFragment>,
    unmapped: bool,
}

impl FragmentCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish collecting and return the fragments in content-stream order.
    pub fn into_fragments(mut self) -> Vec<TextFragment> {
        self.flush();
        self.fragments
    }

    fn flush(&mut self) {
        let Some(fragment) = self.current.take() else {
            return;
        };

        // A glyph without a Unicode mapping still occupies its cell, so the
        // fragment is kept (blank if nothing else decoded) to hold its column.
        if self.unmapped {
            trace!(
                "Fragment at ({}, {}) has unmapped glyphs: {:?}",
                fragment.x, fragment.y, fragment.text
            );
        }
        if self.unmapped || !fragment.text.trim().is_empty() {
            self.fragments.push(fragment);
        }
        self.unmapped = false;
    }
}

impl OutputDev for FragmentCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        spacing: f64,
        font_size: f64,
        glyph: &str,
    ) -> Result<(), OutputError> {
        let scale_x = trm.m11.hypot(trm.m12);
        let scale_y = trm.m21.hypot(trm.m22);
        let (x, y) = (trm.m31 as f32, trm.m32 as f32);
        let advance = ((width * font_size + spacing) * scale_x) as f32;

        let fragment = self.current.get_or_insert_with(|| TextFragment {
            x,
            y,
            width: 0.0,
            font_size: (font_size * scale_y) as f32,
            text: String::new(),
        });

        if glyph.is_empty() || glyph.chars().any(char::is_control) {
            self.unmapped = true;
            fragment.text.extend(glyph.chars().filter(|c| !c.is_control()));
        } else {
            fragment.text.push_str(glyph);
        }
        fragment.width = fragment.width.max(x + advance - fragment.x);
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}
