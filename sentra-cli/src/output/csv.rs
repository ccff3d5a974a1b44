//! CSV output formatter

use super::OutputFormatter;
use anyhow::Result;
use sentra_core::AnalysisRecord;
use sentra_engine::PageSentiment;
use std::io::Write;

const PAGE_COLUMNS: [&str; 3] = ["Page", "Value", "Sentiment"];

/// CSV formatter - header row first, one row per record or page
pub struct CsvFormatter<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> CsvFormatter<W> {
    /// Create a new CSV formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            header_written: false,
        }
    }

    fn header(&mut self, columns: &[&str]) -> Result<()> {
        if !self.header_written {
            self.writer.write_record(columns)?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for CsvFormatter<W> {
    fn format_record(&mut self, record: &AnalysisRecord) -> Result<()> {
        self.header(&AnalysisRecord::COLUMNS)?;
        self.writer.write_record(record.to_row())?;
        Ok(())
    }

    fn format_page(&mut self, page: &PageSentiment) -> Result<()> {
        self.header(&PAGE_COLUMNS)?;
        self.writer.write_record([
            page.page.to_string(),
            format!("{:.2}", page.value),
            page.sentiment.rendered().to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
