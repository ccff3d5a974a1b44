//! Trend command implementation

use super::{
    build_pipeline, configured_document_format, configured_format, configured_method,
    init_logging, value_name, DocumentFormatArg, MethodArg, ModeArg,
};
use crate::config::CliConfig;
use crate::input::FileReader;
use crate::output::{open_output, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use sentra_engine::DocumentFormat;
use std::path::PathBuf;

/// Arguments for the trend command
#[derive(Debug, Args)]
pub struct TrendArgs {
    /// Document to analyze page by page
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Scoring method
    #[arg(short, long, value_enum)]
    pub method: Option<MethodArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Page scoring execution mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Number of worker threads for parallel scoring (0 = one per CPU)
    #[arg(long)]
    pub threads: Option<usize>,

    /// How the document is split into pages
    #[arg(long, value_enum)]
    pub document_format: Option<DocumentFormatArg>,

    /// Lexicon table replacing the built-in table of its kind
    #[arg(long, value_name = "FILE")]
    pub lexicon: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl TrendArgs {
    /// Execute the trend command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let mut config = CliConfig::load_or_default(self.config.as_deref())?;
        self.apply_overrides(&mut config);

        let method = configured_method(&config)?;
        let format = configured_format(&config)?;
        let declared = configured_document_format(&config)?
            .unwrap_or_else(|| DocumentFormat::from_path(&self.input));
        let pipeline = build_pipeline(&config)?;

        let bytes = FileReader::read_bytes(&self.input)?;
        let document = pipeline
            .segment(&bytes, declared)
            .with_context(|| format!("Failed to read pages of {}", self.input.display()))?;
        log::info!(
            "Scoring {} page(s) of {} with the {method} method",
            document.len(),
            self.input.display()
        );

        let pages = pipeline
            .page_sentiments(&document, method)
            .with_context(|| format!("Failed to compute trend of {}", self.input.display()))?;

        let mut formatter = open_output(format, self.output.as_deref(), config.output.pretty_json)?;
        for page in &pages {
            formatter.format_page(page)?;
        }
        formatter.finish()
    }

    /// Command-line options take precedence over the configuration file
    fn apply_overrides(&self, config: &mut CliConfig) {
        if let Some(method) = self.method {
            config.analysis.method = value_name(method);
        }
        if let Some(format) = self.format {
            config.output.format = value_name(format);
        }
        if let Some(mode) = self.mode {
            config.trend.mode = value_name(mode);
        }
        if let Some(threads) = self.threads {
            config.trend.threads = threads;
        }
        if let Some(document_format) = self.document_format {
            config.analysis.document_format = value_name(document_format);
        }
        if let Some(lexicon) = &self.lexicon {
            config.analysis.lexicon = Some(lexicon.clone());
        }
    }
}
