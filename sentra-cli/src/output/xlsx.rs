//! Spreadsheet (xlsx) output formatter
//!
//! Rows are buffered and the workbook is assembled on `finish`, since an
//! xlsx file is a zip archive that cannot be streamed row by row.

use super::OutputFormatter;
use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use sentra_core::AnalysisRecord;
use sentra_engine::PageSentiment;
use std::io::Write;

const PAGE_COLUMNS: [&str; 3] = ["Page", "Value", "Sentiment"];

enum Cell {
    Text(String),
    Number(f64),
}

/// Xlsx formatter - one worksheet with a header row
pub struct XlsxFormatter<W: Write> {
    writer: W,
    sheet: &'static str,
    header: &'static [&'static str],
    rows: Vec<Vec<Cell>>,
}

impl<W: Write> XlsxFormatter<W> {
    /// Create a new xlsx formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sheet: "Sentiment",
            header: &AnalysisRecord::COLUMNS,
            rows: Vec::new(),
        }
    }

    fn workbook(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.sheet)?;

        if !self.rows.is_empty() {
            for (col, name) in self.header.iter().enumerate() {
                worksheet.write_string(0, col as u16, *name)?;
            }
        }
        for (idx, row) in self.rows.iter().enumerate() {
            let row_num = idx as u32 + 1;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(text) => worksheet.write_string(row_num, col as u16, text.as_str())?,
                    Cell::Number(value) => worksheet.write_number(row_num, col as u16, *value)?,
                };
            }
        }

        workbook.save_to_buffer().context("Failed to build xlsx workbook")
    }
}

impl<W: Write + Send + Sync> OutputFormatter for XlsxFormatter<W> {
    fn format_record(&mut self, record: &AnalysisRecord) -> Result<()> {
        self.rows
            .push(record.to_row().into_iter().map(Cell::Text).collect());
        Ok(())
    }

    fn format_page(&mut self, page: &PageSentiment) -> Result<()> {
        self.sheet = "Trend";
        self.header = &PAGE_COLUMNS;
        self.rows.push(vec![
            Cell::Number(page.page as f64),
            Cell::Number(page.value),
            Cell::Text(page.sentiment.rendered().to_string()),
        ]);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let bytes = self.workbook()?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(())
    }
}
