//! Per-page sentiment trends
//!
//! Every page is scored, formatted and then read back through the rendered
//! string, so the trend reflects exactly what a reader of the rendered
//! labels would see. Pages are never translated and nothing is cached
//! between calls.

use crate::config::TrendConfig;
use crate::error::{EngineError, Result};
#[cfg(feature = "parallel")]
use crate::executor::ParallelExecutor;
use crate::executor::{auto_select, ExecutionMode, Executor, SequentialExecutor};
use sentra_core::{
    FormattedSentiment, PageText, ScoreFormatter, Scorers, ScoringMethod, SentimentScorer,
    TrendSeries,
};
use serde::Serialize;
use std::sync::Arc;

/// Sentiment of one page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSentiment {
    /// 1-indexed page number
    pub page: usize,
    /// Formatted result
    pub sentiment: FormattedSentiment,
    /// Signed percentage read back from the rendered string
    pub value: f64,
}

/// Scores every page of a document with one method
#[derive(Debug, Clone)]
pub struct TrendAggregator {
    scorers: Arc<Scorers>,
    formatter: ScoreFormatter,
    config: TrendConfig,
}

impl TrendAggregator {
    /// Aggregator over shared scorers
    pub fn new(scorers: Arc<Scorers>, config: TrendConfig) -> Self {
        Self {
            scorers,
            formatter: ScoreFormatter::new(),
            config,
        }
    }

    /// Execution settings in use
    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Signed percentage per page, index-aligned with `pages`
    pub fn trend(&self, pages: &[PageText], method: ScoringMethod) -> Result<TrendSeries> {
        self.trend_with_mode(pages, method, self.config.execution_mode)
    }

    /// [`Self::trend`] with an explicit execution mode
    pub fn trend_with_mode(
        &self,
        pages: &[PageText],
        method: ScoringMethod,
        mode: ExecutionMode,
    ) -> Result<TrendSeries> {
        let values = self
            .page_sentiments_with_mode(pages, method, mode)?
            .into_iter()
            .map(|page| page.value)
            .collect();
        Ok(TrendSeries::new(method, values))
    }

    /// Full per-page results, index-aligned with `pages`
    pub fn page_sentiments(
        &self,
        pages: &[PageText],
        method: ScoringMethod,
    ) -> Result<Vec<PageSentiment>> {
        self.page_sentiments_with_mode(pages, method, self.config.execution_mode)
    }

    fn page_sentiments_with_mode(
        &self,
        pages: &[PageText],
        method: ScoringMethod,
        mode: ExecutionMode,
    ) -> Result<Vec<PageSentiment>> {
        let scorer = self.scorers.get(method);
        let mode = match mode {
            ExecutionMode::Adaptive => auto_select(pages.len(), self.config.parallel_threshold),
            other => other,
        };
        tracing::debug!(pages = pages.len(), method = %method, mode = %mode, "computing trend");

        let task = |page: &PageText| self.score_page(page, scorer);
        match mode {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                ParallelExecutor::new(self.config.threads).map_pages(pages, task)
            }
            _ => SequentialExecutor.map_pages(pages, task),
        }
    }

    fn score_page(&self, page: &PageText, scorer: &dyn SentimentScorer) -> Result<PageSentiment> {
        let sentiment = self.formatter.format(&scorer.score(&page.text));
        let value = sentiment
            .round_trip()
            .map_err(|source| EngineError::PageScoring {
                page: page.number,
                source,
            })?;
        Ok(PageSentiment {
            page: page.number,
            sentiment,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentra_core::SourceDocument;

    fn aggregator(config: TrendConfig) -> TrendAggregator {
        TrendAggregator::new(Arc::new(Scorers::builtin().unwrap()), config)
    }

    #[test]
    fn test_empty_pages_give_empty_trend() {
        let trend = aggregator(TrendConfig::default())
            .trend(&[], ScoringMethod::RuleBased)
            .unwrap();
        assert!(trend.is_empty());
        assert_eq!(trend.method(), ScoringMethod::RuleBased);
    }

    #[test]
    fn test_values_follow_page_order_and_sign() {
        let doc = SourceDocument::from_texts(["I love this", "", "This is terrible"]);
        let trend = aggregator(TrendConfig::sequential())
            .trend(doc.pages(), ScoringMethod::RuleBased)
            .unwrap();
        let values = trend.values();
        assert_eq!(values.len(), 3);
        assert!(values[0] > 0.0);
        assert_eq!(values[1], 0.0);
        assert!(values[2] < 0.0);
    }

    #[test]
    fn test_page_sentiments_carry_page_numbers() {
        let doc = SourceDocument::from_texts(["good", "bad"]);
        let pages = aggregator(TrendConfig::default())
            .page_sentiments(doc.pages(), ScoringMethod::Lexicon)
            .unwrap();
        assert_eq!(pages.iter().map(|p| p.page).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(pages[0].sentiment.rendered(), "Positive (70.00%)");
        assert_eq!(pages[1].value, -70.0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let texts: Vec<String> = (0..40)
            .map(|i| match i % 3 {
                0 => format!("page {i} was great"),
                1 => format!("page {i} was awful"),
                _ => format!("page {i}"),
            })
            .collect();
        let doc = SourceDocument::from_texts(texts);
        let aggregator = aggregator(TrendConfig::parallel(Some(3)));
        for method in ScoringMethod::ALL {
            let sequential = aggregator
                .trend_with_mode(doc.pages(), method, ExecutionMode::Sequential)
                .unwrap();
            let parallel = aggregator
                .trend_with_mode(doc.pages(), method, ExecutionMode::Parallel)
                .unwrap();
            let adaptive = aggregator
                .trend_with_mode(doc.pages(), method, ExecutionMode::Adaptive)
                .unwrap();
            assert_eq!(sequential, parallel);
            assert_eq!(sequential, adaptive);
        }
    }
}
