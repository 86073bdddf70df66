//! Generate config command implementation

use crate::language_source::LanguageArg;
use anyhow::{bail, Context, Result};
use clap::Args;
use glossa_core::rules::embedded_source;
use glossa_core::Language;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Embedded rule table to start from
    #[arg(short, long, value_enum, default_value = "english")]
    pub language: LanguageArg,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        let Some(language) = self.language.language() else {
            bail!("generate-config needs a concrete language, not auto");
        };
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating language configuration template...");
        println!("  Base language: {}", language.name());
        println!("  Output file: {}", self.output.display());

        std::fs::write(&self.output, Self::generate_template(language))
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the rule tables; order matters, the first matching rule wins");
        println!("2. Validate your configuration:");
        println!(
            "   glossa validate --language-config {}",
            self.output.display()
        );
        println!("3. Use it for analysis:");
        println!(
            "   glossa analyze -i input.txt --language-config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Template content: the embedded table under an explanatory header
    fn generate_template(language: Language) -> String {
        format!(
            "# Language configuration based on the built-in {} tables.\n\
             # The metadata code decides which language this file replaces.\n\n{}",
            language.name(),
            embedded_source(language)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::LanguageRules;
    use tempfile::TempDir;

    #[test]
    fn test_generated_template_is_loadable() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("fr.toml");
        let args = GenerateConfigArgs {
            language: LanguageArg::French,
            output: output.clone(),
            force: false,
        };
        args.execute().unwrap();

        let rules = LanguageRules::from_file(&output).unwrap();
        assert_eq!(rules.language(), Language::French);
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .starts_with("# Language configuration based on the built-in French tables."));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("en.toml");
        std::fs::write(&output, "keep me").unwrap();

        let mut args = GenerateConfigArgs {
            language: LanguageArg::English,
            output: output.clone(),
            force: false,
        };
        assert!(args.execute().is_err());
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep me");

        args.force = true;
        args.execute().unwrap();
        assert_ne!(std::fs::read_to_string(&output).unwrap(), "keep me");
    }

    #[test]
    fn test_auto_is_rejected() {
        let dir = TempDir::new().unwrap();
        let args = GenerateConfigArgs {
            language: LanguageArg::Auto,
            output: dir.path().join("x.toml"),
            force: false,
        };
        assert!(args.execute().is_err());
    }
}
