// specter-core/src/report.rs
//! Serialized run reports.
//!
//! A report is a structured dump of what happened to each page: source and
//! transformed text, the effective spans, and the applied replacements.
//! It is a data file, not a wire protocol; field names are the only
//! compatibility surface.
//!
//! License: MIT OR APACHE 2.0

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::engine::PageOutcome;
use crate::rewriter::Replacement;
use crate::span::EffectiveSpan;

/// Everything recorded for one page.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub page: u32,
    pub source_text: String,
    pub transformed_text: String,
    pub spans: Vec<EffectiveSpan>,
    pub replacements: Vec<Replacement>,
}

/// A run report covering one source (a text string or a document).
#[derive(Debug, Clone, Serialize)]
pub struct TransformationReport {
    pub source_id: String,
    pub language: String,
    pub created_at: String,
    pub pages: Vec<PageReport>,
}

impl TransformationReport {
    pub fn new(source_id: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            language: language.into(),
            created_at: Utc::now().to_rfc3339(),
            pages: Vec::new(),
        }
    }

    /// Records one processed page.
    pub fn push_page(&mut self, page: u32, outcome: &PageOutcome) {
        self.pages.push(PageReport {
            page,
            source_text: outcome.result.source_text.clone(),
            transformed_text: outcome.result.transformed_text.clone(),
            spans: outcome.spans.clone(),
            replacements: outcome.result.replacements.clone(),
        });
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, self)
            .with_context(|| format!("Failed to serialize report to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewriter::TransformationResult;

    fn outcome() -> PageOutcome {
        PageOutcome {
            spans: Vec::new(),
            result: TransformationResult {
                source_text: "John was here".to_string(),
                transformed_text: "<person> was here".to_string(),
                replacements: Vec::new(),
            },
        }
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let mut report = TransformationReport::new("input.txt", "en");
        report.push_page(0, &outcome());

        let json = serde_json::to_string(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source_id"], "input.txt");
        assert_eq!(value["language"], "en");
        assert_eq!(value["pages"][0]["page"], 0);
        assert_eq!(value["pages"][0]["transformed_text"], "<person> was here");
    }

    #[test]
    fn test_write_json_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let mut report = TransformationReport::new("input.txt", "en");
        report.push_page(0, &outcome());
        report.write_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"source_id\""));
    }
}
