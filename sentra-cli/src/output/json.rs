//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use sentra_core::AnalysisRecord;
use sentra_engine::PageSentiment;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs everything as one JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    items: Vec<serde_json::Value>,
}

/// Data structure for one page in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct PageData {
    /// 1-indexed page number
    pub page: usize,
    /// Signed percentage read back from the rendered label
    pub value: f64,
    /// Sentiment label
    pub label: String,
    /// Rendered sentiment
    pub sentiment: String,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            items: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_record(&mut self, record: &AnalysisRecord) -> Result<()> {
        self.items.push(serde_json::to_value(record)?);
        Ok(())
    }

    fn format_page(&mut self, page: &PageSentiment) -> Result<()> {
        let data = PageData {
            page: page.page,
            value: page.value,
            label: page.sentiment.label().as_str().to_string(),
            sentiment: page.sentiment.rendered().to_string(),
        };
        self.items.push(serde_json::to_value(data)?);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.items)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.items)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
