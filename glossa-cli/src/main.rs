//! Command-line entry point for glossa

use anyhow::Result;
use clap::Parser;
use glossa_cli::commands::Commands;

/// Rule-based English/French text analysis
#[derive(Debug, Parser)]
#[command(name = "glossa", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    Cli::parse().command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "glossa", "analyze", "-i", "a.txt", "-i", "b.txt", "-f", "json", "-l", "french", "-vv",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.input, vec!["a.txt", "b.txt"]);
                assert_eq!(args.verbose, 2);
            }
            other => panic!("Expected analyze, got {other:?}"),
        }
    }

    #[test]
    fn test_analyze_requires_input() {
        assert!(Cli::try_parse_from(["glossa", "analyze"]).is_err());
    }
}
