//! Preview document synthesis
//!
//! Builds a complete HTML document around previewable code. Framework code is
//! routed through its adapter; plain HTML is either wrapped in a minimal
//! document or, when it already is a document, gets the CDN tags spliced in.

use super::adapter::{adapter_for, FrameworkAdapter};
use super::{Cdn, UiFramework};
use crate::config::PreviewAssets;
use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::debug;

const BASE_STYLE: &str =
    "body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 20px; }";

/// Style rule applied when the preview is rendered in dark mode
pub const DARK_MODE_STYLE: &str = "body { background-color: #1a1a2e; color: #eee; }";

fn head_open_regex() -> &'static Regex {
    static HEAD_OPEN: OnceLock<Regex> = OnceLock::new();
    HEAD_OPEN.get_or_init(|| Regex::new(r"(?i)<head>").expect("valid regex"))
}

fn body_close_regex() -> &'static Regex {
    static BODY_CLOSE: OnceLock<Regex> = OnceLock::new();
    BODY_CLOSE.get_or_init(|| Regex::new(r"(?i)</body>").expect("valid regex"))
}

/// True when the code is already a full HTML document
pub fn is_full_document(code: &str) -> bool {
    code.contains("<html") || code.contains("<!DOCTYPE")
}

pub struct DocumentBuilder<'a> {
    assets: &'a PreviewAssets,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(assets: &'a PreviewAssets) -> Self {
        Self { assets }
    }

    /// Tags placed in the document head for the requested CDNs
    fn head_content(&self, cdns: &BTreeSet<Cdn>) -> String {
        let mut head = String::new();
        if cdns.contains(&Cdn::Tailwind) {
            head.push_str(&format!("<script src=\"{}\"></script>\n", self.assets.tailwind));
        }
        if cdns.contains(&Cdn::Bootstrap) {
            head.push_str(&format!(
                "<link href=\"{}\" rel=\"stylesheet\">\n",
                self.assets.bootstrap_css
            ));
        }
        head
    }

    /// Scripts appended at the end of the body
    fn trailing_scripts(&self, cdns: &BTreeSet<Cdn>) -> String {
        if cdns.contains(&Cdn::Bootstrap) {
            format!("<script src=\"{}\"></script>\n", self.assets.bootstrap_js)
        } else {
            String::new()
        }
    }

    pub fn build(
        &self,
        code: &str,
        framework: UiFramework,
        cdns: &BTreeSet<Cdn>,
        dark_mode: bool,
    ) -> String {
        let head = self.head_content(cdns);
        let scripts = self.trailing_scripts(cdns);
        let dark_style = if dark_mode { DARK_MODE_STYLE } else { "" };

        debug!(framework = %framework, cdns = cdns.len(), dark_mode, "Building preview document");

        if let Some(adapter) = adapter_for(framework) {
            return self.framework_document(adapter, code, &head, &scripts, dark_style);
        }

        if is_full_document(code) {
            return inject_into_document(code, &head, &scripts);
        }

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    {head}
    <style>
        {BASE_STYLE}
        {dark_style}
    </style>
</head>
<body>
    {code}
    {scripts}
</body>
</html>"#
        )
    }

    fn framework_document(
        &self,
        adapter: &dyn FrameworkAdapter,
        code: &str,
        head: &str,
        scripts: &str,
        dark_style: &str,
    ) -> String {
        let runtime = adapter
            .runtime_scripts(self.assets)
            .iter()
            .map(|src| format!("<script src=\"{}\"></script>", src))
            .collect::<Vec<_>>()
            .join("\n    ");
        let script_open = match adapter.script_type() {
            Some(kind) => format!("<script type=\"{}\">", kind),
            None => "<script>".to_string(),
        };
        let mount_id = adapter.mount_id();
        let bootstrap = adapter.adapt(code);

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    {head}
    {runtime}
    <style>
        {BASE_STYLE}
        {dark_style}
    </style>
</head>
<body>
    <div id="{mount_id}"></div>
    {script_open}
        {bootstrap}
    </script>
    {scripts}
</body>
</html>"#
        )
    }
}

/// Splices CDN tags into an existing document, once each
fn inject_into_document(code: &str, head: &str, scripts: &str) -> String {
    let mut document = code.to_string();
    if !head.is_empty() {
        document = head_open_regex()
            .replacen(&document, 1, |caps: &Captures| format!("{}\n{}", &caps[0], head))
            .into_owned();
    }
    if !scripts.is_empty() {
        document = body_close_regex()
            .replacen(&document, 1, |caps: &Captures| format!("{}{}", scripts, &caps[0]))
            .into_owned();
    }
    document
}

/// Builds a preview document with the default asset URLs
pub fn build(code: &str, framework: UiFramework, cdns: &BTreeSet<Cdn>, dark_mode: bool) -> String {
    static DEFAULT_ASSETS: OnceLock<PreviewAssets> = OnceLock::new();
    DocumentBuilder::new(DEFAULT_ASSETS.get_or_init(PreviewAssets::default))
        .build(code, framework, cdns, dark_mode)
}
