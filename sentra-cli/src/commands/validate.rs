//! Validate command implementation

use anyhow::Result;
use clap::Args;
use sentra_core::Lexicon;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the lexicon table to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub lexicon: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating lexicon: {}", self.lexicon.display());

        match Lexicon::from_file(&self.lexicon) {
            Ok(lexicon) => {
                let metadata = lexicon.metadata();
                println!("✓ Lexicon is valid!");
                println!("  Kind: {:?}", metadata.kind);
                println!("  Code: {}", metadata.code);
                println!("  Name: {}", metadata.name);
                println!("  Words: {}", lexicon.word_count());
                Ok(())
            }
            Err(e) => {
                println!("✗ Lexicon is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
