//! Parallel execution strategy

use crate::{
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor},
};
use rayon::prelude::*;
use sentra_core::PageText;

/// Multi-threaded executor over rayon
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelExecutor {
    threads: Option<usize>,
}

impl ParallelExecutor {
    /// Executor on a dedicated pool of `threads` threads, or on the global
    /// pool when `None`
    pub fn new(threads: Option<usize>) -> Self {
        Self { threads }
    }

    fn run<T, F>(pages: &[PageText], task: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&PageText) -> Result<T> + Sync + Send,
    {
        // Collected per page first so the earliest failing page wins
        let results: Vec<Result<T>> = pages.par_iter().map(task).collect();
        results.into_iter().collect()
    }
}

impl Executor for ParallelExecutor {
    fn map_pages<T, F>(&self, pages: &[PageText], task: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&PageText) -> Result<T> + Sync + Send,
    {
        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EngineError::ParallelError(e.to_string()))?;
                pool.install(|| Self::run(pages, task))
            }
            None => Self::run(pages, task),
        }
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::SequentialExecutor;
    use sentra_core::SourceDocument;

    fn pages(n: usize) -> Vec<PageText> {
        SourceDocument::from_texts((0..n).map(|i| format!("page {i}"))).into_pages()
    }

    #[test]
    fn test_order_matches_sequential() {
        let pages = pages(64);
        let task = |page: &PageText| Ok(page.number * 10);
        let sequential = SequentialExecutor.map_pages(&pages, task).unwrap();
        let parallel = ParallelExecutor::new(Some(4)).map_pages(&pages, task).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_earliest_failure_is_reported() {
        let pages = pages(32);
        let err = ParallelExecutor::new(None)
            .map_pages(&pages, |page: &PageText| {
                if page.number % 5 == 0 {
                    Err(EngineError::ConfigError(format!("page {}", page.number)))
                } else {
                    Ok(page.number)
                }
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: page 5");
    }
}
