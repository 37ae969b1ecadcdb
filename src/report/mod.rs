//! Report Document
//!
//! Assembles a mixture run into a titled, sectioned report and writes it to
//! disk as Markdown or JSON. Chart images and paginated documents are
//! produced by external collaborators, not here.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub heading: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub title: String,
    pub generated_by: String,
    pub generated_at: String,
    pub sections: Vec<ReportSection>,
}

impl ReportDocument {
    /// Build a report from a completed mixture run: the synthesis first,
    /// then one section per layer with its concatenated member output.
    pub fn from_run(
        title: impl Into<String>,
        mixture_name: &str,
        final_text: &str,
        history: &[Vec<String>],
    ) -> Self {
        let mut sections = vec![ReportSection {
            heading: "Synthesis".to_string(),
            body: final_text.to_string(),
        }];

        for (index, layer) in history.iter().enumerate() {
            sections.push(ReportSection {
                heading: format!("Layer {}", index + 1),
                body: layer.join("\n\n"),
            });
        }

        Self {
            title: title.into(),
            generated_by: mixture_name.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            sections,
        }
    }

    /// Render the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut out = format!(
            "# {}\n\n_Generated by {} at {}_\n",
            self.title, self.generated_by, self.generated_at
        );

        for section in &self.sections {
            out.push_str(&format!("\n## {}\n\n{}\n", section.heading, section.body));
        }

        out
    }

    pub fn save_markdown(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_markdown())
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportDocument {
        ReportDocument::from_run(
            "Tesla Business Analysis",
            "business-analysis",
            "Buy.",
            &[
                vec!["R1".to_string(), "R2".to_string()],
                vec!["R3".to_string(), "[no response from risk]".to_string()],
            ],
        )
    }

    #[test]
    fn test_from_run_sections() {
        let report = sample();
        assert_eq!(report.sections.len(), 3);
        assert_eq!(report.sections[0].heading, "Synthesis");
        assert_eq!(report.sections[0].body, "Buy.");
        assert_eq!(report.sections[1].heading, "Layer 1");
        assert_eq!(report.sections[1].body, "R1\n\nR2");
        assert_eq!(report.sections[2].body, "R3\n\n[no response from risk]");
    }

    #[test]
    fn test_markdown_rendering() {
        let md = sample().to_markdown();
        assert!(md.starts_with("# Tesla Business Analysis\n"));
        assert!(md.contains("## Synthesis\n\nBuy.\n"));
        assert!(md.contains("## Layer 2\n"));
    }

    #[test]
    fn test_json_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let report = sample();
        report.save_json(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let restored: ReportDocument = serde_json::from_str(&contents).unwrap();
        assert_eq!(restored, report);
    }
}
