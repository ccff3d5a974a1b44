//! Page segmentation of source documents

use crate::error::DocumentFormatError;
use lopdf::Document;
use sentra_core::SourceDocument;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Page separator of paged text input
pub const PAGE_SEPARATOR: char = '\x0C';

/// Declared format of document bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// PDF file
    Pdf,
    /// UTF-8 text with pages separated by form feeds
    PagedText,
}

impl DocumentFormat {
    /// `.pdf` (any case) is a PDF, anything else is paged text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => DocumentFormat::Pdf,
            _ => DocumentFormat::PagedText,
        }
    }

    /// Short name
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::PagedText => "text",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "text" | "txt" | "paged-text" => Ok(DocumentFormat::PagedText),
            other => Err(format!("unknown document format: {other}")),
        }
    }
}

/// Splits documents into pages in reading order
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSegmenter;

impl PageSegmenter {
    /// Create a segmenter
    pub fn new() -> Self {
        Self
    }

    /// Split bytes of a declared format into pages
    ///
    /// Empty input, or a document without pages, yields an empty
    /// [`SourceDocument`] whatever the declared format. Pages
    /// without text are kept as empty pages. Any unreadable input fails the
    /// whole call.
    pub fn segment(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> std::result::Result<SourceDocument, DocumentFormatError> {
        if bytes.is_empty() {
            return Ok(SourceDocument::empty());
        }
        let document = match format {
            DocumentFormat::Pdf => segment_pdf(bytes)?,
            DocumentFormat::PagedText => segment_paged_text(bytes)?,
        };
        tracing::debug!(format = %format, pages = document.len(), "segmented document");
        Ok(document)
    }
}

fn segment_pdf(bytes: &[u8]) -> std::result::Result<SourceDocument, DocumentFormatError> {
    let doc =
        Document::load_mem(bytes).map_err(|e| DocumentFormatError::MalformedPdf(e.to_string()))?;

    // get_pages is keyed by page number, so iteration is reading order
    let mut texts = Vec::new();
    for (&number, _) in doc.get_pages().iter() {
        let text = doc
            .extract_text(&[number])
            .map_err(|e| DocumentFormatError::PageExtraction {
                page: number as usize,
                reason: e.to_string(),
            })?;
        texts.push(text.trim().to_string());
    }

    Ok(SourceDocument::from_texts(texts))
}

fn segment_paged_text(bytes: &[u8]) -> std::result::Result<SourceDocument, DocumentFormatError> {
    let text =
        std::str::from_utf8(bytes).map_err(|e| DocumentFormatError::InvalidUtf8(e.to_string()))?;

    // A trailing separator closes the last page rather than opening a new one
    let body = text.strip_suffix(PAGE_SEPARATOR).unwrap_or(text);
    Ok(SourceDocument::from_texts(
        body.split(PAGE_SEPARATOR).map(|page| page.trim().to_string()),
    ))
}
