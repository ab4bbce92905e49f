//! Lightweight markdown-to-HTML for the prose between code blocks.
//!
//! Rendering is a fixed sequence of string passes. Each pass sees the output of
//! the previous one, so the order in [`PASSES`] is part of the behaviour:
//! escaping must run first, and line breaks must be handled last so heading and
//! list lines are still recognisable when their passes run.

use regex::Regex;
use std::sync::OnceLock;

/// A single rendering step
pub type Pass = fn(&str) -> String;

/// Rendering passes in execution order
pub const PASSES: &[(&str, Pass)] = &[
    ("escape", escape_html),
    ("headings", headings),
    ("bold", bold),
    ("italic", italic),
    ("inline_code", inline_code),
    ("lists", lists),
    ("line_breaks", line_breaks),
];

struct Patterns {
    headings: [(Regex, &'static str); 4],
    bold_stars: Regex,
    bold_underscores: Regex,
    italic_star: Regex,
    italic_underscore: Regex,
    inline_code: Regex,
    bullet_item: Regex,
    numbered_item: Regex,
    item_run: Regex,
    double_break: Regex,
    break_before_heading: Regex,
    break_after_heading: Regex,
    break_before_list: Regex,
    break_after_list: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |p: &str| Regex::new(p).expect("valid regex");
        Patterns {
            // Longest prefix first so "###" is never read as "#".
            headings: [
                (re(r"(?m)^#### (.+)$"), "<h4>${1}</h4>"),
                (re(r"(?m)^### (.+)$"), "<h3>${1}</h3>"),
                (re(r"(?m)^## (.+)$"), "<h2>${1}</h2>"),
                (re(r"(?m)^# (.+)$"), "<h1>${1}</h1>"),
            ],
            bold_stars: re(r"\*\*(.+?)\*\*"),
            bold_underscores: re(r"__(.+?)__"),
            italic_star: re(r"\*(.+?)\*"),
            italic_underscore: re(r"_(.+?)_"),
            inline_code: re(r"`([^`]+)`"),
            bullet_item: re(r"(?m)^[-*] (.+)$"),
            numbered_item: re(r"(?m)^\d+\. (.+)$"),
            item_run: re(r"(?:<li>.*</li>\n?)+"),
            double_break: re(r"<br>\s*<br>"),
            break_before_heading: re(r"<br>\s*(<h[1-4]>)"),
            break_after_heading: re(r"(</h[1-4]>)\s*<br>"),
            break_before_list: re(r"<br>\s*(<ul>)"),
            break_after_list: re(r"(</ul>)\s*<br>"),
        }
    })
}

/// Escapes `&`, `<` and `>`
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn headings(text: &str) -> String {
    patterns()
        .headings
        .iter()
        .fold(text.to_string(), |acc, (re, rep)| re.replace_all(&acc, *rep).into_owned())
}

pub fn bold(text: &str) -> String {
    let p = patterns();
    let text = p.bold_stars.replace_all(text, "<strong>${1}</strong>");
    p.bold_underscores
        .replace_all(&text, "<strong>${1}</strong>")
        .into_owned()
}

pub fn italic(text: &str) -> String {
    let p = patterns();
    let text = p.italic_star.replace_all(text, "<em>${1}</em>");
    p.italic_underscore
        .replace_all(&text, "<em>${1}</em>")
        .into_owned()
}

pub fn inline_code(text: &str) -> String {
    patterns()
        .inline_code
        .replace_all(text, r#"<code class="inline-code">${1}</code>"#)
        .into_owned()
}

/// Turns bullet and numbered lines into list items, wrapping each run once
pub fn lists(text: &str) -> String {
    let p = patterns();
    let text = p.bullet_item.replace_all(text, "<li>${1}</li>");
    let text = p.numbered_item.replace_all(&text, "<li>${1}</li>");
    p.item_run.replace_all(&text, "<ul>${0}</ul>").into_owned()
}

/// Newlines become `<br>`, blank lines become paragraph breaks, and breaks
/// touching headings or lists are dropped
pub fn line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' && chars.peek() != Some(&'<') {
            out.push_str("<br>");
        } else {
            out.push(c);
        }
    }

    let p = patterns();
    let out = p.double_break.replace_all(&out, "</p><p>");
    let out = p.break_before_heading.replace_all(&out, "${1}");
    let out = p.break_after_heading.replace_all(&out, "${1}");
    let out = p.break_before_list.replace_all(&out, "${1}");
    p.break_after_list.replace_all(&out, "${1}").into_owned()
}

/// Renders a text segment to HTML
pub fn render(text: &str) -> String {
    PASSES
        .iter()
        .fold(text.to_string(), |acc, (_, pass)| pass(&acc))
}
