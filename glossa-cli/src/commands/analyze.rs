//! Analyze command implementation

use crate::config::CliConfig;
use crate::input::{resolve_patterns, FileReader};
use crate::language_source::{LanguageArg, LanguageSource};
use crate::output::{JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter};
use anyhow::{Context, Result};
use clap::Args;
use glossa_core::{Collaborators, LexiconTagger, SpecialTokenClassifier, TextAnalyzer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the analyze command
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Analyze as this language instead of detecting one
    #[arg(short, long, value_enum, default_value = "auto")]
    pub language: LanguageArg,

    /// External language rule table replacing the embedded one for its language
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Lexicon file used as the word-class tagger
    #[arg(long, value_name = "FILE")]
    pub lexicon: Option<PathBuf>,

    /// Special token pattern file replacing the embedded patterns
    #[arg(long, value_name = "FILE")]
    pub special_tokens: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Sectioned plain-text report
    Text,
    /// JSON array with one record per input
    Json,
    /// Markdown formatted output
    Markdown,
}

impl OutputFormat {
    /// Every format, in listing order
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Text, OutputFormat::Json, OutputFormat::Markdown];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Text => "Sectioned plain-text report",
            OutputFormat::Json => "JSON array with one record per input",
            OutputFormat::Markdown => "Markdown document with tables",
        }
    }
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting text analysis");
        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        let analyzer = self.build_analyzer(&config)?;
        let tagger = self.load_lexicon()?;
        let mut collaborators = Collaborators::none();
        if let Some(tagger) = &tagger {
            collaborators = collaborators.with_tagger(tagger);
        }

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} file(s) to analyze", files.len());

        let writer = self.open_output()?;
        let mut formatter = self.create_formatter(writer, &config);

        for file in &files {
            log::info!("Analyzing file: {}", file.display());
            let content = FileReader::read_text(file)?;
            let analysis = analyzer.analyze(&content, collaborators);
            if analysis.degraded {
                log::warn!("{}: analysis ran with a failed collaborator", file.display());
            }
            log::debug!(
                "{}: {} sentence(s), level {}",
                file.display(),
                analysis.sentences.len(),
                analysis.difficulty.level
            );
            formatter.format_analysis(&file.display().to_string(), &analysis)?;
        }

        formatter.finish()?;
        log::info!("Analysis complete");
        Ok(())
    }

    /// Assemble the analyzer from the config file and command-line overrides
    fn build_analyzer(&self, config: &CliConfig) -> Result<TextAnalyzer> {
        let mut engine = config.engine.clone();
        if let Some(language) = self.language.language() {
            engine = engine.with_language(Some(language));
        }

        let source = LanguageSource::from_option(self.language_config.clone());
        log::info!("Language rules: {}", source.display_name());
        let mut builder = TextAnalyzer::builder()
            .rules(source.load()?)
            .config(engine);

        if let Some(path) = &self.special_tokens {
            let special = SpecialTokenClassifier::from_file(path).with_context(|| {
                format!("Failed to load special token patterns: {}", path.display())
            })?;
            builder = builder.special_tokens(Arc::new(special));
        }

        Ok(builder.build()?)
    }

    fn load_lexicon(&self) -> Result<Option<LexiconTagger>> {
        let Some(path) = &self.lexicon else {
            return Ok(None);
        };
        let tagger = LexiconTagger::from_file(path)
            .with_context(|| format!("Failed to load lexicon: {}", path.display()))?;
        log::info!("Loaded {} lexicon entries from {}", tagger.len(), path.display());
        Ok(Some(tagger))
    }

    fn open_output(&self) -> Result<Box<dyn Write + Send + Sync>> {
        Ok(match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        })
    }

    fn create_formatter(
        &self,
        writer: Box<dyn Write + Send + Sync>,
        config: &CliConfig,
    ) -> Box<dyn OutputFormatter> {
        let include_tokens = config.output.include_tokens;
        match self.format {
            OutputFormat::Text => {
                Box::new(TextFormatter::new(writer).include_tokens(include_tokens))
            }
            OutputFormat::Json => Box::new(
                JsonFormatter::new(writer)
                    .pretty(config.output.pretty_json)
                    .include_tokens(include_tokens),
            ),
            OutputFormat::Markdown => {
                Box::new(MarkdownFormatter::new(writer).include_tokens(include_tokens))
            }
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A second init in the same process (tests) is harmless
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}
