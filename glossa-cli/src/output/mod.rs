//! Output formatting module

use anyhow::Result;
use glossa_core::TextAnalysis;
use serde::Serialize;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format the analysis of one input
    fn format_analysis(&mut self, source: &str, analysis: &TextAnalysis) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Wire name of a serde enum, as it appears in JSON output
pub(crate) fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        Ok(other) => other.to_string(),
        Err(_) => String::from("?"),
    }
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
