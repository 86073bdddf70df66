//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_core::TextAnalysis;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs one record per input as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    include_tokens: bool,
    records: Vec<AnalysisRecord>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Input file the analysis came from
    pub source: String,
    /// The analysis itself, flattened into the record
    #[serde(flatten)]
    pub analysis: serde_json::Value,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: true,
            include_tokens: true,
            records: Vec::new(),
        }
    }

    /// Write compact JSON instead of pretty-printed
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Keep or drop the token list
    pub fn include_tokens(mut self, include: bool) -> Self {
        self.include_tokens = include;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_analysis(&mut self, source: &str, analysis: &TextAnalysis) -> Result<()> {
        let mut value = serde_json::to_value(analysis)?;
        if !self.include_tokens {
            if let Some(object) = value.as_object_mut() {
                object.remove("tokens");
            }
        }
        self.records.push(AnalysisRecord {
            source: source.to_string(),
            analysis: value,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.records)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::{Collaborators, TextAnalyzer};

    fn render(formatter: JsonFormatter<Vec<u8>>, inputs: &[(&str, &str)]) -> serde_json::Value {
        let analyzer = TextAnalyzer::new().unwrap();
        let mut formatter = formatter;
        for (source, text) in inputs {
            let analysis = analyzer.analyze(text, Collaborators::none());
            formatter.format_analysis(source, &analysis).unwrap();
        }
        formatter.finish().unwrap();
        serde_json::from_slice(&formatter.writer).unwrap()
    }

    #[test]
    fn test_json_record_per_input() {
        let value = render(
            JsonFormatter::new(Vec::new()),
            &[("a.txt", "The cat sleeps."), ("b.txt", "Le chat dort.")],
        );
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["source"], "a.txt");
        assert_eq!(records[0]["language"]["language"], "english");
        assert_eq!(records[1]["language"]["language"], "french");
        assert!(records[0]["tokens"].is_array());
        assert!(records[0]["difficulty"]["level"].is_string());
    }

    #[test]
    fn test_json_without_tokens() {
        let value = render(
            JsonFormatter::new(Vec::new()).include_tokens(false),
            &[("a.txt", "The cat sleeps.")],
        );
        assert!(value[0].get("tokens").is_none());
        assert!(value[0]["sentences"].is_array());
        let cat = &value[0]["vocabulary"][1];
        assert_eq!(cat["word"], "cat");
        assert_eq!(cat["type"], "noun");
        assert_eq!(cat["context"], "The cat sleeps");
    }

    #[test]
    fn test_compact_json_is_single_line() {
        let analyzer = TextAnalyzer::new().unwrap();
        let mut formatter = JsonFormatter::new(Vec::new()).pretty(false);
        let analysis = analyzer.analyze("Hi.", Collaborators::none());
        formatter.format_analysis("x", &analysis).unwrap();
        formatter.finish().unwrap();
        let output = String::from_utf8(formatter.writer).unwrap();
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_empty_run_is_empty_array() {
        let mut formatter = JsonFormatter::new(Vec::new());
        formatter.finish().unwrap();
        assert_eq!(String::from_utf8(formatter.writer).unwrap().trim(), "[]");
    }
}
