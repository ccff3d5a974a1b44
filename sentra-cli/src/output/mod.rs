//! Output formatting module

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use sentra_core::AnalysisRecord;
use sentra_engine::PageSentiment;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one analysis record
    fn format_record(&mut self, record: &AnalysisRecord) -> Result<()>;

    /// Format and output one page of a trend
    fn format_page(&mut self, page: &PageSentiment) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable blocks
    Text,
    /// JSON array
    Json,
    /// Comma-separated values with a header row
    Csv,
    /// Markdown table
    Markdown,
    /// Excel workbook; needs an output file
    Xlsx,
}

impl OutputFormat {
    /// Parse a format name as written in a config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }

    /// Whether the format is binary and cannot go to a terminal
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Xlsx)
    }
}

/// Build the formatter for a format over any writer
pub fn create_formatter<W>(format: OutputFormat, writer: W, pretty_json: bool) -> Box<dyn OutputFormatter>
where
    W: Write + Send + Sync + 'static,
{
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Csv => Box::new(CsvFormatter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        OutputFormat::Xlsx => Box::new(XlsxFormatter::new(writer)),
    }
}

/// Formatter writing to `path`, or to stdout when no path is given
pub fn open_output(
    format: OutputFormat,
    path: Option<&Path>,
    pretty_json: bool,
) -> Result<Box<dyn OutputFormatter>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(create_formatter(format, BufWriter::new(file), pretty_json))
        }
        None if format.is_binary() => {
            bail!("The {format:?} format is binary; choose an output file with -o FILE")
        }
        None => Ok(create_formatter(format, io::stdout(), pretty_json)),
    }
}

pub mod csv;
pub mod json;
pub mod markdown;
pub mod text;
pub mod xlsx;

pub use self::csv::CsvFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
pub use xlsx::XlsxFormatter;

#[cfg(test)]
pub(crate) mod test_support {
    use sentra_core::{AnalysisRecord, LanguageCode, ScoreFormatter, SentimentResult};
    use sentra_engine::PageSentiment;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Writer whose contents stay readable after the formatter takes it
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.bytes()).unwrap()
        }

        pub fn bytes(&self) -> Vec<u8> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    pub fn lexicon_record(text: &str, polarity: f64) -> AnalysisRecord {
        let sentiment = ScoreFormatter::new().format(&SentimentResult::Lexicon {
            polarity,
            subjectivity: 0.5,
        });
        AnalysisRecord::new(text, LanguageCode::english(), &sentiment)
    }

    pub fn page(number: usize, compound: f64) -> PageSentiment {
        let sentiment = ScoreFormatter::new().format(&SentimentResult::RuleBased { compound });
        let value = sentiment.round_trip().unwrap();
        PageSentiment {
            page: number,
            sentiment,
            value,
        }
    }
}
