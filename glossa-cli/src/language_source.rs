//! Language selection and rule table sources for the CLI

use anyhow::{Context, Result};
use glossa_core::{Language, RuleSet, RuleSetBuilder};
use std::path::PathBuf;
use std::sync::Arc;

/// Language choice on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LanguageArg {
    /// Detect the dominant language of each file
    Auto,
    /// English rules
    English,
    /// French rules
    French,
}

impl LanguageArg {
    /// Forced language, if any
    pub fn language(&self) -> Option<Language> {
        match self {
            LanguageArg::Auto => None,
            LanguageArg::English => Some(Language::English),
            LanguageArg::French => Some(Language::French),
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageArg::Auto => "auto",
            LanguageArg::English => "English",
            LanguageArg::French => "French",
        }
    }
}

/// Source of language rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSource {
    /// Embedded tables only
    BuiltIn,
    /// Embedded tables, with the external file replacing its language
    External {
        /// Path to the configuration file
        path: PathBuf,
    },
}

impl LanguageSource {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => LanguageSource::External { path },
            None => LanguageSource::BuiltIn,
        }
    }

    /// Get the display name for the language source
    pub fn display_name(&self) -> String {
        match self {
            LanguageSource::BuiltIn => "Built-in tables".to_string(),
            LanguageSource::External { path } => format!("External: {}", path.display()),
        }
    }

    /// Compile the rule set this source describes
    pub fn load(&self) -> Result<Arc<RuleSet>> {
        match self {
            LanguageSource::BuiltIn => Ok(RuleSet::builtin()?),
            LanguageSource::External { path } => {
                let rules = RuleSetBuilder::with_builtin()?
                    .language_file(path)
                    .with_context(|| {
                        format!("Failed to load language configuration: {}", path.display())
                    })?
                    .build();
                Ok(Arc::new(rules))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_arg_mapping() {
        assert_eq!(LanguageArg::Auto.language(), None);
        assert_eq!(LanguageArg::French.language(), Some(Language::French));
        assert_eq!(LanguageArg::English.as_str(), "English");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(LanguageSource::BuiltIn.display_name(), "Built-in tables");
        let external = LanguageSource::from_option(Some(PathBuf::from("fr.toml")));
        assert_eq!(external.display_name(), "External: fr.toml");
    }

    #[test]
    fn test_builtin_load_has_both_languages() {
        let rules = LanguageSource::BuiltIn.load().unwrap();
        assert_eq!(
            rules.languages().collect::<Vec<_>>(),
            vec![Language::English, Language::French]
        );
    }

    #[test]
    fn test_missing_external_file() {
        let source = LanguageSource::from_option(Some(PathBuf::from("/nonexistent/lang.toml")));
        let err = source.load().unwrap_err();
        assert!(err
            .to_string()
            .contains("Failed to load language configuration"));
    }
}
