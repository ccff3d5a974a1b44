//! Execution strategies for per-page work

use crate::error::Result;
use sentra_core::PageText;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// One page after another on the calling thread
    Sequential,
    /// Pages spread over a rayon thread pool
    Parallel,
    /// Parallel above a page-count threshold, sequential below it
    Adaptive,
}

impl ExecutionMode {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
            ExecutionMode::Adaptive => "adaptive",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "parallel" => Ok(ExecutionMode::Parallel),
            "adaptive" => Ok(ExecutionMode::Adaptive),
            other => Err(format!("unknown execution mode: {other}")),
        }
    }
}

/// Runs a fallible task over every page
///
/// Output is index-aligned with the input. When several pages fail, the
/// error of the earliest page is returned.
pub trait Executor: Send + Sync {
    /// Apply `task` to each page
    fn map_pages<T, F>(&self, pages: &[PageText], task: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&PageText) -> Result<T> + Sync + Send;

    /// The mode this executor implements
    fn mode(&self) -> ExecutionMode;
}

/// Resolve `Adaptive` into a concrete mode for a page count
pub fn auto_select(page_count: usize, parallel_threshold: usize) -> ExecutionMode {
    if page_count < 2 || page_count < parallel_threshold {
        return ExecutionMode::Sequential;
    }

    #[cfg(feature = "parallel")]
    return ExecutionMode::Parallel;

    #[cfg(not(feature = "parallel"))]
    ExecutionMode::Sequential
}
