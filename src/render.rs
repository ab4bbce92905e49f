//! HTML markup for a parsed response
//!
//! Produces the fragments a host page inserts: prose rendered through
//! [`crate::markdown`], code blocks with a header, per-block technology badges
//! and a copy button, plus the detected-technology badge strip. Syntax
//! highlighting is left to the page; blocks only carry a `language-*` class.

use crate::markdown::{self, escape_html};
use crate::parser::Segment;
use crate::preview::PreviewCapability;
use crate::tech::{block_technologies, contrast_color, signature, DetectedTechnologies};
use tracing::warn;

/// Highlighter grammar name for a language tag
pub fn prism_language(tag: &str) -> String {
    let key = tag.to_lowercase();
    let mapped = match key.as_str() {
        "html" | "xml" => "markup",
        "jsx" => "jsx",
        "tsx" => "tsx",
        "csharp" | "cs" | "c#" => "csharp",
        "javascript" | "js" => "javascript",
        "typescript" | "ts" => "typescript",
        "css" => "css",
        "json" => "json",
        "sql" => "sql",
        "python" | "py" => "python",
        "bash" | "shell" | "sh" => "bash",
        "yaml" | "yml" => "yaml",
        "" => "plaintext",
        _ => return key,
    };
    mapped.to_string()
}

/// Human-readable language name shown in a code block header
pub fn language_display_name(tag: &str) -> String {
    let name = match tag.to_lowercase().as_str() {
        "html" => "HTML",
        "xml" => "XML",
        "jsx" => "JSX",
        "tsx" => "TSX",
        "csharp" | "cs" | "c#" => "C#",
        "javascript" | "js" => "JavaScript",
        "typescript" | "ts" => "TypeScript",
        "css" => "CSS",
        "json" => "JSON",
        "sql" => "SQL",
        "python" | "py" => "Python",
        "bash" => "Bash",
        "shell" => "Shell",
        "yaml" => "YAML",
        "plaintext" | "" => "Code",
        _ => return tag.to_uppercase(),
    };
    name.to_string()
}

/// Badge strip for every detected technology
pub fn technology_badges(detected: &DetectedTechnologies) -> String {
    detected
        .iter()
        .map(|id| {
            let sig = signature(id);
            let text_color = contrast_color(sig.color).unwrap_or_else(|e| {
                warn!(technology = %id, error = %e, "Falling back to white badge text");
                "#ffffff"
            });
            format!(
                r#"<span class="badge tech-badge-display" style="background-color: {}; color: {}"><i class="{}"></i> {}</span>"#,
                sig.color, text_color, sig.icon, sig.name
            )
        })
        .collect()
}

/// Markup for every segment of a response, in order
pub fn render_response(segments: &[Segment], detected: &DetectedTechnologies) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| match segment {
            Segment::Text { content } => {
                format!(r#"<div class="response-text">{}</div>"#, markdown::render(content))
            }
            Segment::Code(block) => {
                let badges: String = block_technologies(block, detected)
                    .iter()
                    .map(|id| format!(r#"<span class="tech-badge">{}</span>"#, id.name()))
                    .collect();
                format!(
                    r#"
<div class="code-block" data-index="{index}">
    <div class="code-header">
        <span class="code-label">
            <i class="bi bi-code-slash"></i> {display}
            {badges}
        </span>
        <button class="copy-btn" onclick="copyCode(this)">
            <i class="bi bi-clipboard"></i>
            <span>Copy</span>
        </button>
    </div>
    <pre><code class="language-{prism}">{code}</code></pre>
</div>
"#,
                    display = language_display_name(&block.language),
                    prism = prism_language(&block.language),
                    code = escape_html(&block.content),
                )
            }
        })
        .collect()
}

/// Warnings and suggestions shown when a preview is refused
pub fn capability_markup(capability: &PreviewCapability) -> String {
    let mut html: String = capability
        .warnings
        .iter()
        .map(|w| format!(r#"<p><i class="bi bi-exclamation-circle text-warning"></i> {}</p>"#, w))
        .collect();

    if !capability.suggestions.is_empty() {
        html.push_str("<strong>Suggestions:</strong><ul>");
        for suggestion in &capability.suggestions {
            html.push_str(&format!("<li>{}</li>", suggestion));
        }
        html.push_str("</ul>");
    }
    html
}

/// Inline alert for a response that could not be retrieved
pub fn error_markup(message: &str) -> String {
    format!(
        r#"<div class="alert alert-danger"><i class="bi bi-exclamation-triangle"></i> Error: {}</div>"#,
        escape_html(message)
    )
}
