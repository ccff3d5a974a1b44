//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use sentra_core::{Lexicon, LexiconScorer, RuleBasedScorer, ScoringMethod};
use sentra_engine::{
    DocumentFormat, ExecutionMode, HttpTranslationService, LanguageDetector, Pipeline,
};
use std::sync::Arc;
use std::time::Duration;

pub mod analyze;
pub mod trend;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect language, translate and score texts or documents
    Analyze(analyze::AnalyzeArgs),

    /// Score every page of a document and report the sentiment trend
    Trend(trend::TrendArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate a lexicon table
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ListCommands {
    /// List available scoring methods
    Methods,

    /// List languages the detector recognizes
    Languages,

    /// List available output and document formats
    Formats,
}

/// Scoring method options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Polarity and subjectivity from a word lexicon
    Lexicon,
    /// Valence rules with negation, boosters and punctuation emphasis
    RuleBased,
}

impl From<MethodArg> for ScoringMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Lexicon => ScoringMethod::Lexicon,
            MethodArg::RuleBased => ScoringMethod::RuleBased,
        }
    }
}

/// Document format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormatArg {
    /// Pick by file extension: `.pdf` is PDF, anything else paged text
    Auto,
    /// PDF document
    Pdf,
    /// UTF-8 text with pages separated by form feeds
    Text,
}

impl DocumentFormatArg {
    /// Declared format, `None` when it follows the file extension
    pub fn declared(self) -> Option<DocumentFormat> {
        match self {
            DocumentFormatArg::Auto => None,
            DocumentFormatArg::Pdf => Some(DocumentFormat::Pdf),
            DocumentFormatArg::Text => Some(DocumentFormat::PagedText),
        }
    }
}

/// Trend execution mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Score pages one after another
    Sequential,
    /// Score pages on a thread pool
    Parallel,
    /// Parallel only for documents above the page threshold
    Adaptive,
}

/// Initialize logging based on verbosity level
pub fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        let env = env_logger::Env::default().default_filter_or(log_level);
        let _ = env_logger::Builder::from_env(env).try_init();
    }
}

/// Scoring method named in the configuration
pub fn configured_method(config: &CliConfig) -> Result<ScoringMethod> {
    Ok(config
        .analysis
        .method
        .parse::<ScoringMethod>()
        .map_err(CliError::ConfigError)?)
}

/// Output format named in the configuration
pub fn configured_format(config: &CliConfig) -> Result<OutputFormat> {
    OutputFormat::from_name(&config.output.format).ok_or_else(|| {
        CliError::ConfigError(format!("unknown output format: {}", config.output.format)).into()
    })
}

/// Document format named in the configuration
pub fn configured_document_format(config: &CliConfig) -> Result<Option<DocumentFormat>> {
    let name = config.analysis.document_format.as_str();
    let arg = <DocumentFormatArg as ValueEnum>::from_str(name, true)
        .map_err(|_| CliError::ConfigError(format!("unknown document format: {name}")))?;
    Ok(arg.declared())
}

/// Build the pipeline described by a configuration
pub fn build_pipeline(config: &CliConfig) -> Result<Pipeline> {
    let timeout = match config.translation.timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let service = HttpTranslationService::with_options(&config.translation.endpoint, timeout)
        .context("Failed to create translation client")?;

    let mode = config
        .trend
        .mode
        .parse::<ExecutionMode>()
        .map_err(CliError::ConfigError)?;
    let threads = match config.trend.threads {
        0 => num_cpus::get(),
        n => n,
    };

    let mut builder = Pipeline::builder()
        .detector_seed(config.analysis.detector_seed)
        .translate_rule_based(config.analysis.translate_rule_based)
        .translation_service(Arc::new(service))
        .execution_mode(mode)
        .parallel_threshold(config.trend.parallel_threshold)
        .threads(Some(threads));

    if let Some(path) = &config.analysis.lexicon {
        let lexicon = Lexicon::from_file(path)
            .with_context(|| format!("Failed to load lexicon: {}", path.display()))?;
        log::info!(
            "Using {:?} lexicon '{}' from {}",
            lexicon.metadata().kind,
            lexicon.metadata().code,
            path.display()
        );
        builder = match lexicon {
            Lexicon::Polarity(table) => {
                builder.lexicon_scorer(LexiconScorer::new(Arc::new(table))?)
            }
            Lexicon::Valence(table) => {
                builder.rule_based_scorer(RuleBasedScorer::new(Arc::new(table)))
            }
        };
    }

    builder.build().context("Failed to build analysis pipeline")
}

/// Execute a list subcommand
pub fn list(subcommand: ListCommands) -> Result<()> {
    match subcommand {
        ListCommands::Methods => {
            println!("Available scoring methods:");
            for method in ScoringMethod::ALL {
                println!("  {:<12} - {}", method.as_str(), method.description());
            }
        }
        ListCommands::Languages => {
            let detector = LanguageDetector::new(LanguageDetector::DEFAULT_SEED)?;
            println!("Detectable languages:");
            for profile in detector.profiles() {
                println!("  {:<6} - {}", profile.code().as_str(), profile.name());
            }
            println!();
            println!("Text in any other language is reported as 'unknown' and scored as given.");
        }
        ListCommands::Formats => {
            println!("Output formats:");
            print_values(OutputFormat::value_variants());
            println!();
            println!("Document formats:");
            print_values(DocumentFormatArg::value_variants());
        }
    }
    Ok(())
}

/// Name of a value as clap spells it on the command line
pub fn value_name<T: ValueEnum>(value: T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

fn print_values<T: ValueEnum>(variants: &[T]) {
    for value in variants.iter().filter_map(ValueEnum::to_possible_value) {
        let help = value.get_help().map(ToString::to_string).unwrap_or_default();
        println!("  {:<10} - {}", value.get_name(), help);
    }
}
