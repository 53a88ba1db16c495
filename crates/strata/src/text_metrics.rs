//! Text measurement used to size edge-label nodes.

use unicode_width::UnicodeWidthStr;

/// Measures label text. The layout only calls this for edge labels.
pub trait TextMetrics {
    fn text_width(&self, text: &str) -> f64;
    fn text_height(&self, text: &str) -> f64;
}

/// Monospace approximation: every terminal column is `char_width` wide and every line
/// `line_height` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTextMetrics {
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for FixedTextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 15.0,
        }
    }
}

impl TextMetrics for FixedTextMetrics {
    fn text_width(&self, text: &str) -> f64 {
        let columns = text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
        columns as f64 * self.char_width
    }

    fn text_height(&self, text: &str) -> f64 {
        text.lines().count().max(1) as f64 * self.line_height
    }
}
