//! Validate command implementation

use anyhow::Result;
use clap::Args;
use glossa_core::LanguageRules;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to language configuration file to validate
    #[arg(short = 'c', long, value_name = "FILE", required = true)]
    pub language_config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!(
            "Validating language configuration: {}",
            self.language_config.display()
        );

        // Loading compiles every pattern, so a successful load is a full check
        match LanguageRules::from_file(&self.language_config) {
            Ok(rules) => {
                println!("✓ Configuration is valid!");
                println!("  Language code: {}", rules.language().code());
                println!("  Language name: {}", rules.name());
                println!("  Verb rules: {}", rules.verbs().len());
                println!("  Nominal rules: {}", rules.nouns().len());
                println!("  Adjective rules: {}", rules.adjectives().len());
                println!("  Phrases: {}", rules.phrases().len());
                println!("  Lexicon entries: {}", rules.lexicon().len());
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
