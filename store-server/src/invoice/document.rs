//! Fixed-width document builder
//!
//! Provides a fluent API for laying out printable text documents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Characters per line
pub const DOC_WIDTH: usize = 72;

/// Lines per page before a page break
pub const PAGE_LINES: usize = 56;

/// Fixed-width document builder
///
/// Collects lines; pagination happens once at `build`.
pub struct DocBuilder {
    width: usize,
    lines: Vec<String>,
}

impl DocBuilder {
    /// Create a new builder with the given line width in characters
    pub fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::with_capacity(64),
        }
    }

    /// Get the configured line width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Append one line
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.lines.push(s.to_string());
        self
    }

    /// Append an empty line
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Append a centered line
    pub fn center(&mut self, s: &str) -> &mut Self {
        let len = s.chars().count();
        if len >= self.width {
            return self.line(s);
        }
        let pad = (self.width - len) / 2;
        let mut padded = " ".repeat(pad);
        padded.push_str(s);
        self.lines.push(padded);
        self
    }

    // === Separators ===

    /// Append a line of '=' characters
    pub fn sep_double(&mut self) -> &mut Self {
        let sep = "=".repeat(self.width);
        self.line(&sep)
    }

    /// Append a line of '-' characters
    pub fn sep_single(&mut self) -> &mut Self {
        let sep = "-".repeat(self.width);
        self.line(&sep)
    }

    // === Layout Helpers ===

    /// Left and right text on the same line, gap filled with spaces
    ///
    /// Falls back to two lines when the texts do not fit side by side.
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = left.chars().count();
        let rw = right.chars().count();

        if lw + rw >= self.width {
            self.line(left);
            let pad = self.width.saturating_sub(rw);
            let mut second = " ".repeat(pad);
            second.push_str(right);
            return self.line(&second);
        }

        let mut combined = left.to_string();
        combined.push_str(&" ".repeat(self.width - lw - rw));
        combined.push_str(right);
        self.line(&combined)
    }

    /// Finish the document, splitting lines into pages
    pub fn build(self, rendered_at: i64) -> InvoiceDocument {
        let pages = self
            .lines
            .chunks(PAGE_LINES)
            .map(|chunk| chunk.join("\n"))
            .collect::<Vec<_>>();
        InvoiceDocument {
            pages: if pages.is_empty() {
                vec![String::new()]
            } else {
                pages
            },
            rendered_at,
        }
    }
}

/// A rendered, paginated invoice
///
/// `rendered_at` is metadata only: it appears in the document header but
/// never participates in any computed amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument {
    pages: Vec<String>,
    pub rendered_at: i64,
}

impl InvoiceDocument {
    /// Pages in order
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Full document text, pages separated by form feeds
    pub fn to_text(&self) -> String {
        self.pages.join("\n\u{0c}\n")
    }

    /// Binary encoding for storage or transport
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_text().into_bytes()
    }

    /// Base64 encoding for mail attachments
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Write the document to `<dir>/<file_stem>.txt` and return the path
    pub fn save_to(&self, dir: impl AsRef<Path>, file_stem: &str) -> io::Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{file_stem}.txt"));
        fs::write(&path, self.to_bytes())?;
        Ok(path)
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    #[test]
    fn line_lr_pads_to_width() {
        let mut b = DocBuilder::new(20);
        b.line_lr("left", "right");
        let doc = b.build(0);
        let line = &doc.pages()[0];
        assert_eq!(line.chars().count(), 20);
        assert!(line.starts_with("left"));
        assert!(line.ends_with("right"));
    }

    #[test]
    fn line_lr_wraps_when_too_long() {
        let mut b = DocBuilder::new(10);
        b.line_lr("a-very-long-left", "right");
        let doc = b.build(0);
        let lines: Vec<&str> = doc.pages()[0].lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("right"));
    }

    #[test]
    fn paginates_after_page_lines() {
        let mut b = DocBuilder::new(40);
        for i in 0..(PAGE_LINES + 10) {
            b.line(&format!("line {i}"));
        }
        let doc = b.build(0);
        assert_eq!(doc.pages().len(), 2);
        assert_eq!(doc.pages()[0].lines().count(), PAGE_LINES);
        assert_eq!(doc.pages()[1].lines().count(), 10);
    }

    #[test]
    fn base64_round_trips_the_bytes() {
        let mut b = DocBuilder::new(40);
        b.line("hello");
        let doc = b.build(0);

        let decoded = BASE64.decode(doc.to_base64()).unwrap();
        assert_eq!(decoded, doc.to_bytes());
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly-10", 10), "exactly-10");
        let cut = truncate("a-name-that-is-definitely-too-long", 10);
        assert_eq!(cut.chars().count(), 10);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn save_to_writes_the_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut b = DocBuilder::new(40);
        b.line("invoice body");
        let doc = b.build(0);

        let path = doc.save_to(dir.path(), "XT-TEST-0001").unwrap();
        assert!(path.ends_with("XT-TEST-0001.txt"));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("invoice body"));
    }
}
