//! File reading utilities

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads input files for analysis
pub struct FileReader;

impl FileReader {
    /// Read a file as raw bytes, for document segmentation
    pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let content =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }
}
