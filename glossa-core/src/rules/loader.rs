use super::config::LanguageConfig;
use crate::error::ConfigError;
use crate::types::Language;

macro_rules! embed_language_config {
    ($language:expr, $path:expr) => {
        ($language, include_str!($path))
    };
}

const EMBEDDED_CONFIGS: [(Language, &str); 2] = [
    embed_language_config!(Language::English, "../../../configs/languages/english.toml"),
    embed_language_config!(Language::French, "../../../configs/languages/french.toml"),
];

pub(crate) const SPECIAL_TOKENS_CONFIG: &str = include_str!("../../../configs/special_tokens.toml");

/// Raw TOML of the embedded table for `language`
pub fn embedded_source(language: Language) -> &'static str {
    EMBEDDED_CONFIGS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, source)| *source)
        .unwrap_or_default()
}

/// Parse the embedded table for `language`
pub fn load_embedded_config(language: Language) -> Result<LanguageConfig, ConfigError> {
    let source_name = format!("embedded {} config", language.code());
    let config = LanguageConfig::from_toml_str(embedded_source(language), &source_name)?;

    // Validate that the config code matches
    if config.language()? != language {
        return Err(ConfigError::CodeMismatch {
            expected: language.code().to_string(),
            found: config.metadata.code.clone(),
        });
    }

    Ok(config)
}

/// Languages with an embedded rule table
pub fn list_available_languages() -> Vec<Language> {
    EMBEDDED_CONFIGS.iter().map(|(lang, _)| *lang).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_english() {
        let config = load_embedded_config(Language::English).expect("English config should load");
        assert_eq!(config.metadata.code, "en");
        assert_eq!(config.metadata.name, "English");
        assert!(!config.verbs.is_empty());
        assert!(config.morphology.regular_suffixes.is_empty());
    }

    #[test]
    fn test_load_embedded_french() {
        let config = load_embedded_config(Language::French).expect("French config should load");
        assert_eq!(config.metadata.code, "fr");
        assert!(config.verbs.len() > 50);
        assert!(config
            .morphology
            .irregular_verbs
            .iter()
            .any(|v| v == "être"));
        assert!(!config.morphology.irregular_verbs.iter().any(|v| v == "parler"));
    }

    #[test]
    fn test_list_available_languages() {
        let mut languages = list_available_languages();
        languages.sort();
        assert_eq!(languages, vec![Language::English, Language::French]);
    }

    #[test]
    fn test_special_tokens_config_embedded() {
        assert!(SPECIAL_TOKENS_CONFIG.contains("[[patterns]]"));
    }
}
