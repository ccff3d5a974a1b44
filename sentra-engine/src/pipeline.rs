//! Pipeline orchestration and builder
//!
//! Single-text analysis runs detect → translate → score → format. Trend
//! analysis segments a document and scores every page without translating.

use crate::{
    config::{PipelineConfig, TrendConfig},
    document::{DocumentFormat, PageSegmenter},
    error::{EngineError, Result},
    executor::ExecutionMode,
    language::LanguageDetector,
    translate::{HttpTranslationService, TranslationService, Translator},
    trend::{PageSentiment, TrendAggregator},
};
use sentra_core::{
    AnalysisRecord, FormattedSentiment, LanguageCode, LexiconScorer, RuleBasedScorer,
    ScoreFormatter, Scorers, ScoringMethod, SourceDocument, TrendSeries,
};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of analyzing one text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Language detected for the original text
    pub language: LanguageCode,
    /// English text that was scored, when translation took place
    pub translated_text: Option<String>,
    /// Formatted sentiment
    pub sentiment: FormattedSentiment,
    /// Exportable record
    pub record: AnalysisRecord,
}

/// Language normalization, scoring and trend analysis
#[derive(Debug, Clone)]
pub struct Pipeline {
    detector: LanguageDetector,
    translator: Translator,
    scorers: Arc<Scorers>,
    formatter: ScoreFormatter,
    segmenter: PageSegmenter,
    trends: TrendAggregator,
    config: PipelineConfig,
}

impl Pipeline {
    /// Start building a pipeline
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Settings in use
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Language detector in use
    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    /// Scorers in use
    pub fn scorers(&self) -> &Scorers {
        &self.scorers
    }

    /// Detect the language of a text
    pub fn detect(&self, text: &str) -> LanguageCode {
        self.detector.detect(text)
    }

    /// Analyze one text with the chosen method
    ///
    /// Text in a known language other than English is translated before
    /// lexicon scoring (and before rule-based scoring when configured).
    /// Text whose language is `unknown` is scored as given. A translation
    /// failure aborts the analysis.
    pub fn analyze(&self, text: &str, method: ScoringMethod) -> Result<Analysis> {
        let language = self.detector.detect(text);
        tracing::debug!(stage = "detection", language = %language, "detected language");

        let translate = match method {
            ScoringMethod::Lexicon => true,
            ScoringMethod::RuleBased => self.config.translate_rule_based,
        };
        let translated_text = if translate && !language.is_unknown() && !language.is_english() {
            Some(self.translator.normalize(text, &language)?)
        } else {
            None
        };

        let scored_text = translated_text.as_deref().unwrap_or(text);
        tracing::debug!(stage = "scoring", method = %method, "scoring text");
        let result = self.scorers.get(method).score(scored_text);
        let sentiment = self.formatter.format(&result);
        let record = AnalysisRecord::new(text, language.clone(), &sentiment);

        Ok(Analysis {
            language,
            translated_text,
            sentiment,
            record,
        })
    }

    /// Split document bytes into pages
    pub fn segment(&self, bytes: &[u8], format: DocumentFormat) -> Result<SourceDocument> {
        Ok(self.segmenter.segment(bytes, format)?)
    }

    /// Analyze a whole document as one text, its pages joined by spaces
    pub fn analyze_document(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
        method: ScoringMethod,
    ) -> Result<Analysis> {
        let document = self.segment(bytes, format)?;
        self.analyze(&document.joined_text(), method)
    }

    /// Per-page trend of a document
    pub fn trend(&self, document: &SourceDocument, method: ScoringMethod) -> Result<TrendSeries> {
        self.trends.trend(document.pages(), method)
    }

    /// Per-page trend with an explicit execution mode
    pub fn trend_with_mode(
        &self,
        document: &SourceDocument,
        method: ScoringMethod,
        mode: ExecutionMode,
    ) -> Result<TrendSeries> {
        self.trends.trend_with_mode(document.pages(), method, mode)
    }

    /// Per-page results of a document, with labels
    pub fn page_sentiments(
        &self,
        document: &SourceDocument,
        method: ScoringMethod,
    ) -> Result<Vec<PageSentiment>> {
        self.trends.page_sentiments(document.pages(), method)
    }
}

/// Builder for [`Pipeline`]
///
/// Without an explicit translation service, `build` creates an
/// [`HttpTranslationService`] for the default endpoint.
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
    service: Option<Arc<dyn TranslationService>>,
    scorers: Option<Scorers>,
    lexicon_scorer: Option<LexiconScorer>,
    rule_based_scorer: Option<RuleBasedScorer>,
}

impl PipelineBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all settings
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed for the language detector
    pub fn detector_seed(mut self, seed: u64) -> Self {
        self.config.detector_seed = seed;
        self
    }

    /// Translation backend
    pub fn translation_service(mut self, service: Arc<dyn TranslationService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Translate before rule-based scoring too
    pub fn translate_rule_based(mut self, enabled: bool) -> Self {
        self.config.translate_rule_based = enabled;
        self
    }

    /// Both scorers at once
    pub fn scorers(mut self, scorers: Scorers) -> Self {
        self.scorers = Some(scorers);
        self
    }

    /// Custom lexicon scorer
    pub fn lexicon_scorer(mut self, scorer: LexiconScorer) -> Self {
        self.lexicon_scorer = Some(scorer);
        self
    }

    /// Custom rule-based scorer
    pub fn rule_based_scorer(mut self, scorer: RuleBasedScorer) -> Self {
        self.rule_based_scorer = Some(scorer);
        self
    }

    /// Trend settings
    pub fn trend_config(mut self, trend: TrendConfig) -> Self {
        self.config.trend = trend;
        self
    }

    /// Trend execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.trend.execution_mode = mode;
        self
    }

    /// Trend thread count
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.trend.threads = threads;
        self
    }

    /// Minimum page count for parallel trends in adaptive mode
    pub fn parallel_threshold(mut self, pages: usize) -> Self {
        self.config.trend.parallel_threshold = pages;
        self
    }

    /// Validate the settings and build the pipeline
    pub fn build(self) -> Result<Pipeline> {
        self.config.validate()?;

        let mut scorers = match self.scorers {
            Some(scorers) => scorers,
            None => Scorers::builtin()?,
        };
        if let Some(scorer) = self.lexicon_scorer {
            scorers = scorers.with_lexicon_scorer(scorer);
        }
        if let Some(scorer) = self.rule_based_scorer {
            scorers = scorers.with_rule_based_scorer(scorer);
        }
        let scorers = Arc::new(scorers);

        let service = match self.service {
            Some(service) => service,
            None => Arc::new(HttpTranslationService::new().map_err(EngineError::from)?),
        };

        Ok(Pipeline {
            detector: LanguageDetector::new(self.config.detector_seed)?,
            translator: Translator::new(service),
            trends: TrendAggregator::new(scorers.clone(), self.config.trend.clone()),
            scorers,
            formatter: ScoreFormatter::new(),
            segmenter: PageSegmenter::new(),
            config: self.config,
        })
    }
}
