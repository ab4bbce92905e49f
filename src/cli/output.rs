//! Output formatting for parse and analysis results
//!
//! JSON and YAML are meant for scripts; the human format is a short report.

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::parser::Segment;
use crate::preview::PreviewCapability;
use crate::session::ResponseAnalysis;
use crate::tech::signature;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_analysis(&self, analysis: &ResponseAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(analysis)
                .context("Failed to serialize response analysis to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(analysis)
                .context("Failed to serialize response analysis to YAML"),
            OutputFormat::Human => Ok(self.format_analysis_human(analysis)),
        }
    }

    pub fn format_capability(&self, capability: &PreviewCapability) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(capability)
                .context("Failed to serialize preview capability to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(capability)
                .context("Failed to serialize preview capability to YAML"),
            OutputFormat::Human => Ok(self.format_capability_human(capability)),
        }
    }

    fn format_analysis_human(&self, analysis: &ResponseAnalysis) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Segments ({}):", analysis.segments.len());
        for (index, segment) in analysis.segments.iter().enumerate() {
            match segment {
                Segment::Text { content } => {
                    let first_line = content.lines().next().unwrap_or_default();
                    let _ = writeln!(out, "  [{}] text  {}", index, first_line);
                }
                Segment::Code(block) => {
                    let _ = writeln!(
                        out,
                        "  [{}] code  {} ({} lines)",
                        index,
                        block.language,
                        block.content.lines().count()
                    );
                }
            }
        }

        if analysis.technologies.is_empty() {
            let _ = writeln!(out, "Technologies: none");
        } else {
            let _ = writeln!(out, "Technologies:");
            for id in analysis.technologies.iter() {
                let sig = signature(id);
                let status = if sig.is_previewable() {
                    "previewable"
                } else {
                    "not previewable"
                };
                let _ = writeln!(out, "  - {} ({})", sig.name, status);
            }
        }
        let _ = write!(
            out,
            "Preview available: {}",
            if analysis.previewable { "yes" } else { "no" }
        );
        out
    }

    fn format_capability_human(&self, capability: &PreviewCapability) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Can preview: {}",
            if capability.can_preview { "yes" } else { "no" }
        );
        let _ = writeln!(out, "Framework:   {}", capability.framework);
        let cdns: Vec<&str> = capability.cdns.iter().map(|c| c.as_str()).collect();
        let _ = writeln!(
            out,
            "CDNs:        {}",
            if cdns.is_empty() {
                "none".to_string()
            } else {
                cdns.join(", ")
            }
        );
        for warning in &capability.warnings {
            let _ = writeln!(out, "warning: {}", warning);
        }
        for suggestion in &capability.suggestions {
            let _ = writeln!(out, "suggestion: {}", suggestion);
        }
        out.trim_end().to_string()
    }
}
