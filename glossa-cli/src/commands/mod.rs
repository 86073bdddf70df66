//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use glossa_core::rules::list_available_languages;

pub mod analyze;
pub mod generate_config;
pub mod validate;

use analyze::OutputFormat;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze text files: language, morphology, structure, patterns and difficulty
    Analyze(analyze::AnalyzeArgs),

    /// Validate a language configuration file
    Validate(validate::ValidateArgs),

    /// Write a language configuration template based on a built-in table
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available language rules
    Languages,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Analyze(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
        }
    }
}

impl ListCommands {
    pub fn execute(&self) -> Result<()> {
        match self {
            ListCommands::Languages => {
                println!("Available languages:");
                for language in list_available_languages() {
                    println!("  {:<4} {}", language.code(), language.name());
                }
            }
            ListCommands::Formats => {
                println!("Available output formats:");
                for format in OutputFormat::ALL {
                    println!("  {:<10} {}", format.name(), format.description());
                }
            }
        }
        Ok(())
    }
}
