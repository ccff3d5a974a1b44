//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use sentra_core::{AnalysisRecord, ScoringMethod, TrendSeries};
use sentra_engine::PageSentiment;
use std::io::Write;

/// Text formatter - one block per record, one line per page
pub struct TextFormatter<W: Write> {
    writer: W,
    records: usize,
    page_method: Option<ScoringMethod>,
    page_values: Vec<f64>,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: 0,
            page_method: None,
            page_values: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_record(&mut self, record: &AnalysisRecord) -> Result<()> {
        if self.records > 0 {
            writeln!(self.writer)?;
        }
        self.records += 1;

        writeln!(self.writer, "Text: {}", record.original_text.trim())?;
        writeln!(self.writer, "Detected Language: {}", record.detected_language)?;
        if let Some(sentiment) = &record.lexicon_sentiment {
            writeln!(self.writer, "Lexicon Sentiment: {sentiment}")?;
        }
        if let Some(sentiment) = &record.rule_based_sentiment {
            writeln!(self.writer, "Rule-Based Sentiment: {sentiment}")?;
        }
        Ok(())
    }

    fn format_page(&mut self, page: &PageSentiment) -> Result<()> {
        writeln!(
            self.writer,
            "Page {}: {:>8.2}  {}",
            page.page,
            page.value,
            page.sentiment.rendered()
        )?;
        self.page_method.get_or_insert(page.sentiment.method());
        self.page_values.push(page.value);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(method) = self.page_method {
            let series = TrendSeries::new(method, std::mem::take(&mut self.page_values));
            if let Some(mean) = series.mean() {
                writeln!(self.writer, "Mean: {mean:.2}")?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
