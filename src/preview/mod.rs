//! Live preview support
//!
//! - [`capability`]: whether a detected technology set can be previewed, and how
//! - [`adapter`]: framework-specific rewriting of component code
//! - [`document`]: the self-contained HTML document shown in the preview frame
//!
//! The helpers in this module pick which code blocks feed a preview.

pub mod adapter;
pub mod capability;
pub mod document;

pub use capability::{analyze, Cdn, PreviewCapability, UiFramework};
pub use document::{build, DocumentBuilder};

use crate::parser::{code_blocks, CodeBlock, Segment};
use crate::tech::{DetectedTechnologies, TechId};

/// Language tags whose blocks are fed into a preview
const PREVIEW_LANGUAGES: &[&str] = &["html", "jsx", "tsx", "vue"];

/// True for blocks that take part in a preview
///
/// Untagged blocks carry the `plaintext` fallback tag and are never
/// previewed, so shell transcripts and prose in fences stay out of the page.
pub fn is_previewable_block(block: &CodeBlock) -> bool {
    PREVIEW_LANGUAGES.contains(&block.language_key().as_str())
}

/// Previewable blocks, in response order
pub fn previewable_blocks(segments: &[Segment]) -> Vec<&CodeBlock> {
    code_blocks(segments)
        .filter(|b| is_previewable_block(b))
        .collect()
}

/// Joined source of every previewable block, or `None` when there is none
pub fn preview_source(segments: &[Segment]) -> Option<String> {
    let blocks = previewable_blocks(segments);
    if blocks.is_empty() {
        return None;
    }
    Some(
        blocks
            .iter()
            .map(|b| b.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"),
    )
}

/// Whether the preview action should be offered for a response
pub fn has_previewable_code(segments: &[Segment], detected: &DetectedTechnologies) -> bool {
    let css_framework = detected.contains(TechId::Tailwind) || detected.contains(TechId::Bootstrap);
    code_blocks(segments).any(|b| is_previewable_block(b) || css_framework)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Short label naming what a preview was built with, e.g. "React + Tailwind"
pub fn preview_label(capability: &PreviewCapability) -> String {
    let mut labels = Vec::new();
    if capability.framework != UiFramework::None {
        labels.push(capitalize(capability.framework.as_str()));
    }
    labels.extend(capability.cdns.iter().map(|cdn| capitalize(cdn.as_str())));

    if labels.is_empty() {
        "Plain HTML".to_string()
    } else {
        labels.join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_previewable_blocks_filter_by_language() {
        let segments = parse(
            "```html\n<p>a</p>\n```\n```py\nprint(1)\n```\n```\n<b>b</b>\n```\n```JSX\n<i/>\n```",
        );
        let languages: Vec<&str> = previewable_blocks(&segments)
            .iter()
            .map(|b| b.language.as_str())
            .collect();
        assert_eq!(languages, vec!["html", "JSX"]);
    }

    #[test]
    fn test_untagged_block_is_not_previewable() {
        let segments = parse("Steps:\n```\nnpm install\nnpm start\n```");
        assert!(!has_previewable_code(&segments, &DetectedTechnologies::new()));
        assert!(preview_source(&segments).is_none());

        let tagged = parse("```plaintext\n<p>x</p>\n```");
        assert!(previewable_blocks(&tagged).is_empty());
    }

    #[test]
    fn test_preview_source_joins_blocks() {
        let segments = parse("```html\n<p>a</p>\n```\ntext\n```html\n<p>b</p>\n```");
        assert_eq!(
            preview_source(&segments).as_deref(),
            Some("<p>a</p>\n\n\n<p>b</p>\n")
        );
    }

    #[test]
    fn test_preview_source_none_without_blocks() {
        let segments = parse("```sql\nSELECT 1 FROM t\n```");
        assert!(preview_source(&segments).is_none());
    }

    #[test]
    fn test_has_previewable_code() {
        let segments = parse("```css\n.a { color: red; }\n```");
        assert!(!has_previewable_code(&segments, &DetectedTechnologies::new()));

        let with_tailwind: DetectedTechnologies = [TechId::Tailwind].into_iter().collect();
        assert!(has_previewable_code(&segments, &with_tailwind));

        assert!(!has_previewable_code(&parse("only words"), &with_tailwind));
    }

    #[test]
    fn test_preview_label() {
        let detected: DetectedTechnologies =
            [TechId::React, TechId::Tailwind, TechId::Bootstrap].into_iter().collect();
        assert_eq!(preview_label(&analyze(&detected)), "React + Tailwind + Bootstrap");
        assert_eq!(preview_label(&analyze(&DetectedTechnologies::new())), "Plain HTML");
    }
}
