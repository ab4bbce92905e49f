//! Fenced code block extraction
//!
//! Splits a model answer into an ordered list of text and code segments. A code
//! region opens with three backticks, an optional language tag glued to them,
//! and a line break; it closes at the next three backticks. An opening fence
//! without a closing one is left in the surrounding text untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Language recorded for fences without a tag
pub const PLAINTEXT: &str = "plaintext";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub language: String,
    pub content: String,
}

impl CodeBlock {
    pub fn new(language: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            content: content.into(),
        }
    }

    /// Lower-cased language tag, the form every consumer compares against
    pub fn language_key(&self) -> String {
        self.language.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Text { content: String },
    Code(CodeBlock),
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    pub fn code(language: impl Into<String>, content: impl Into<String>) -> Self {
        Segment::Code(CodeBlock::new(language, content))
    }

    pub fn as_code(&self) -> Option<&CodeBlock> {
        match self {
            Segment::Code(block) => Some(block),
            Segment::Text { .. } => None,
        }
    }
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"```([\w+#.-]*)\r?\n((?s:.*?))```").expect("valid regex"))
}

fn push_text(segments: &mut Vec<Segment>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        segments.push(Segment::text(trimmed));
    }
}

/// Parses a markdown answer into segments, preserving input order
pub fn parse(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for caps in fence_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_text(&mut segments, &text[last_end..whole.start()]);

        let language = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|tag| !tag.is_empty())
            .unwrap_or(PLAINTEXT);
        let content = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        segments.push(Segment::code(language, content));

        last_end = whole.end();
    }

    push_text(&mut segments, &text[last_end..]);

    debug!(
        segments = segments.len(),
        code_blocks = segments.iter().filter(|s| s.as_code().is_some()).count(),
        "Parsed response"
    );
    segments
}

/// Code blocks of a segment list, in order
pub fn code_blocks(segments: &[Segment]) -> impl Iterator<Item = &CodeBlock> {
    segments.iter().filter_map(Segment::as_code)
}
