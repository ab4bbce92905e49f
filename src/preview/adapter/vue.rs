//! Vue adapter: builds a Vue 3 app from the template markup
//!
//! Only the first `<template>` block is used; any `<script>` logic in the
//! source component is dropped, so the app only offers a `message` field.

use super::*;
use regex::Regex;
use std::sync::OnceLock;

pub struct VueAdapter;

fn template_regex() -> &'static Regex {
    static TEMPLATE: OnceLock<Regex> = OnceLock::new();
    TEMPLATE.get_or_init(|| Regex::new(r"(?s)<template>(.*?)</template>").expect("valid regex"))
}

/// Inner markup of the first template block, or the whole code
pub fn extract_template(code: &str) -> &str {
    template_regex()
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(code)
}

/// Escapes text for embedding in a JavaScript template literal
fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

impl FrameworkAdapter for VueAdapter {
    fn framework(&self) -> UiFramework {
        UiFramework::Vue
    }

    fn mount_id(&self) -> &'static str {
        "app"
    }

    fn runtime_scripts<'a>(&self, assets: &'a PreviewAssets) -> Vec<&'a str> {
        vec![assets.vue.as_str()]
    }

    fn adapt(&self, code: &str) -> String {
        let template = escape_template_literal(extract_template(code));
        format!(
            r#"
        const {{ createApp, ref, reactive, computed, onMounted }} = Vue;

        const app = createApp({{
            setup() {{
                const message = ref("Hello Vue!");
                return {{ message }};
            }},
            template: `{template}`
        }});

        app.mount('#app');
    "#
        )
    }
}
