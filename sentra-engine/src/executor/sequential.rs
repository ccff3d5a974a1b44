//! Sequential execution strategy

use crate::{
    error::Result,
    executor::{ExecutionMode, Executor},
};
use sentra_core::PageText;

/// Single-threaded executor
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn map_pages<T, F>(&self, pages: &[PageText], task: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(&PageText) -> Result<T> + Sync + Send,
    {
        pages.iter().map(task).collect()
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
