//! Analyze command implementation

use super::{
    build_pipeline, configured_document_format, configured_format, configured_method,
    init_logging, value_name, DocumentFormatArg, MethodArg,
};
use crate::config::CliConfig;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{open_output, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use sentra_engine::DocumentFormat;
use std::path::PathBuf;

/// Arguments for the analyze command
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["text", "input"])))]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(short, long)]
    pub text: Option<String>,

    /// Input files or glob patterns; each file becomes one record
    #[arg(short, long, value_name = "FILE/PATTERN", num_args = 1..)]
    pub input: Vec<String>,

    /// Scoring method
    #[arg(short, long, value_enum)]
    pub method: Option<MethodArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Lexicon table replacing the built-in table of its kind
    #[arg(long, value_name = "FILE")]
    pub lexicon: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How input files are split into pages
    #[arg(long, value_enum)]
    pub document_format: Option<DocumentFormatArg>,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let mut config = CliConfig::load_or_default(self.config.as_deref())?;
        self.apply_overrides(&mut config);

        let method = configured_method(&config)?;
        let format = configured_format(&config)?;
        let document_format = configured_document_format(&config)?;
        let pipeline = build_pipeline(&config)?;

        let mut formatter = open_output(format, self.output.as_deref(), config.output.pretty_json)?;

        if let Some(text) = &self.text {
            log::info!("Analyzing text with the {method} method");
            let analysis = pipeline.analyze(text, method).context("Analysis failed")?;
            formatter.format_record(&analysis.record)?;
        } else {
            let files = resolve_patterns(&self.input)?;
            log::info!("Analyzing {} file(s) with the {method} method", files.len());

            let mut progress = ProgressReporter::new(self.quiet);
            progress.init_files(files.len() as u64);

            for path in &files {
                let bytes = FileReader::read_bytes(path)?;
                let declared = document_format.unwrap_or_else(|| DocumentFormat::from_path(path));
                log::debug!("Reading {} as {declared}", path.display());

                let analysis = pipeline
                    .analyze_document(&bytes, declared, method)
                    .with_context(|| format!("Failed to analyze {}", path.display()))?;
                formatter.format_record(&analysis.record)?;

                progress.file_completed(&path.display().to_string());
            }
            progress.finish();
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
        if let Some(lexicon) = &self.lexicon {
            config.analysis.lexicon = Some(lexicon.clone());
        }
        if let Some(document_format) = self.document_format {
            config.analysis.document_format = value_name(document_format);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AnalyzeArgs {
        AnalyzeArgs {
            text: Some("I love this!".to_string()),
            input: Vec::new(),
            method: None,
            format: None,
            output: None,
            lexicon: None,
            config: None,
            document_format: None,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_analyze_args_debug() {
        let debug_str = format!("{:?}", args());
        assert!(debug_str.contains("AnalyzeArgs"));
        assert!(debug_str.contains("I love this!"));
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = CliConfig::default();
        args().apply_overrides(&mut config);
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_overrides_win() {
        let mut analyze = args();
        analyze.method = Some(MethodArg::RuleBased);
        analyze.format = Some(OutputFormat::Markdown);
        analyze.document_format = Some(DocumentFormatArg::Pdf);
        analyze.lexicon = Some(PathBuf::from("custom.toml"));

        let mut config = CliConfig::default();
        analyze.apply_overrides(&mut config);

        assert_eq!(configured_method(&config).unwrap(), sentra_core::ScoringMethod::RuleBased);
        assert_eq!(configured_format(&config).unwrap(), OutputFormat::Markdown);
        assert_eq!(configured_document_format(&config).unwrap(), Some(DocumentFormat::Pdf));
        assert_eq!(config.analysis.lexicon, Some(PathBuf::from("custom.toml")));
    }
}
