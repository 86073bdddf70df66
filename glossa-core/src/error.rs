//! Error types
//!
//! Only configuration problems are errors. Empty input and unmatched rules are
//! ordinary results, and collaborator failures are absorbed at the adapter
//! boundary and turned into degraded output.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while loading or compiling configuration.
///
/// These are fatal: no analyzer is built from a partially loaded table.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML could not be parsed into the expected schema
    #[error("failed to parse {source_name}: {message}")]
    Parse {
        /// Which document failed (file path or embedded table name)
        source_name: String,
        /// Parser diagnostic
        message: String,
    },

    /// A rule pattern failed to compile
    #[error("invalid pattern in {table} rule #{index} `{pattern}`: {source}")]
    InvalidPattern {
        /// Table the rule belongs to, e.g. `fr.verbs`
        table: String,
        /// Zero-based position of the rule in its table
        index: usize,
        /// The offending pattern text
        pattern: String,
        /// Compiler diagnostic
        #[source]
        source: Box<regex::Error>,
    },

    /// An embedded table declares a different code than it is registered under
    #[error("config code mismatch: expected {expected}, got {found}")]
    CodeMismatch {
        /// Code the table was registered under
        expected: String,
        /// Code found in `[metadata]`
        found: String,
    },

    /// Language code is not one the engine supports
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Semantically invalid setting
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Failure reported by an external collaborator (tagger or language
/// hypothesis source).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// The collaborator ran and reported a failure
    #[error("collaborator failed: {0}")]
    Failed(String),

    /// The collaborator did not answer in time
    #[error("collaborator timed out")]
    TimedOut,

    /// The collaborator is not reachable
    #[error("collaborator unavailable")]
    Unavailable,
}

/// Crate-level error
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_display_names_table_and_index() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = ConfigError::InvalidPattern {
            table: "fr.verbs".to_string(),
            index: 3,
            pattern: "(unclosed".to_string(),
            source: Box::new(source),
        };
        let msg = err.to_string();
        assert!(msg.contains("fr.verbs"));
        assert!(msg.contains("#3"));
        assert!(msg.contains("(unclosed"));
    }

    #[test]
    fn test_config_error_converts_into_crate_error() {
        let err: Error = ConfigError::UnsupportedLanguage("de".to_string()).into();
        assert!(matches!(err, Error::Config(ConfigError::UnsupportedLanguage(_))));
        assert_eq!(
            err.to_string(),
            "configuration error: unsupported language: de"
        );
    }

    #[test]
    fn test_collaborator_error_display() {
        assert_eq!(CollaboratorError::TimedOut.to_string(), "collaborator timed out");
        assert_eq!(
            CollaboratorError::Failed("boom".into()).to_string(),
            "collaborator failed: boom"
        );
    }
}
