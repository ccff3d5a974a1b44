//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use sentra_core::AnalysisRecord;
use sentra_engine::PageSentiment;
use std::io::Write;

/// Markdown formatter - outputs a table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new Markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    fn header(&mut self, columns: &[&str]) -> Result<()> {
        if self.header_written {
            return Ok(());
        }
        writeln!(self.writer, "| {} |", columns.join(" | "))?;
        let rule: Vec<&str> = columns.iter().map(|_| "---").collect();
        writeln!(self.writer, "| {} |", rule.join(" | "))?;
        self.header_written = true;
        Ok(())
    }
}

/// Make a value safe for a single table cell
fn cell(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_record(&mut self, record: &AnalysisRecord) -> Result<()> {
        self.header(&AnalysisRecord::COLUMNS)?;
        let row: Vec<String> = record.to_row().iter().map(|value| cell(value)).collect();
        writeln!(self.writer, "| {} |", row.join(" | "))?;
        Ok(())
    }

    fn format_page(&mut self, page: &PageSentiment) -> Result<()> {
        self.header(&["Page", "Value", "Sentiment"])?;
        writeln!(
            self.writer,
            "| {} | {:.2} | {} |",
            page.page,
            page.value,
            page.sentiment.rendered()
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_record_table() {
        let mut output = Vec::new();
        {
            let mut formatter = MarkdownFormatter::new(&mut output);
            formatter.format_record(&lexicon_record("a | b\nc", 0.5)).unwrap();
            formatter.finish().unwrap();
        }
        let result = String::from_utf8(output).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(
            lines[0],
            "| Original Text | Detected Language | Lexicon Sentiment | Rule-Based Sentiment |"
        );
        assert_eq!(lines[1], "| --- | --- | --- | --- |");
        assert_eq!(lines[2], "| a \\| b c | en | Positive (50.00%) |  |");
    }

    #[test]
    fn test_page_table() {
        let mut output = Vec::new();
        {
            let mut formatter = MarkdownFormatter::new(&mut output);
            formatter.format_page(&page(1, 0.5)).unwrap();
            formatter.format_page(&page(2, -0.2)).unwrap();
            formatter.finish().unwrap();
        }
        let result = String::from_utf8(output).unwrap();
        assert_eq!(
            result,
            "| Page | Value | Sentiment |\n| --- | --- | --- |\n\
             | 1 | 50.00 | Positive (50.00%) |\n| 2 | -20.00 | Negative (20.00%) |\n"
        );
    }
}
