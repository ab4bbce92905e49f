//! React adapter: mounts an `App` component through ReactDOM

use super::*;
use regex::Regex;
use std::sync::OnceLock;

pub struct ReactAdapter;

struct ReactPatterns {
    react_import: Regex,
    any_import: Regex,
    export_default: Regex,
}

fn patterns() -> &'static ReactPatterns {
    static PATTERNS: OnceLock<ReactPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| ReactPatterns {
        react_import: Regex::new(r#"import.*from\s+['"]react['"];?\n?"#).expect("valid regex"),
        any_import: Regex::new(r#"import.*from\s+['"].*['"];?\n?"#).expect("valid regex"),
        export_default: Regex::new(r"export\s+default\s+").expect("valid regex"),
    })
}

/// True when the code declares its own component rather than bare JSX
pub fn is_component_module(code: &str) -> bool {
    code.contains("export default") || code.contains("function App")
}

/// Drops import-from statements and export-default markers
pub fn strip_module_syntax(code: &str) -> String {
    let p = patterns();
    let code = p.react_import.replace_all(code, "");
    let code = p.any_import.replace_all(&code, "");
    p.export_default.replace_all(&code, "").into_owned()
}

impl FrameworkAdapter for ReactAdapter {
    fn framework(&self) -> UiFramework {
        UiFramework::React
    }

    fn mount_id(&self) -> &'static str {
        "root"
    }

    fn script_type(&self) -> Option<&'static str> {
        Some("text/babel")
    }

    fn runtime_scripts<'a>(&self, assets: &'a PreviewAssets) -> Vec<&'a str> {
        vec![
            assets.react.as_str(),
            assets.react_dom.as_str(),
            assets.babel.as_str(),
        ]
    }

    fn adapt(&self, code: &str) -> String {
        if is_component_module(code) {
            let body = strip_module_syntax(code);
            // Mount only if the code actually defined App.
            return format!(
                r#"
            {body}
            const components = [typeof App !== 'undefined' ? App : null].filter(Boolean);
            if (components.length > 0) {{
                const root = ReactDOM.createRoot(document.getElementById('root'));
                root.render(React.createElement(components[0]));
            }}
        "#
            );
        }

        format!(
            r#"
        function App() {{
            return (
                {code}
            );
        }}
        const root = ReactDOM.createRoot(document.getElementById('root'));
        root.render(React.createElement(App));
    "#
        )
    }
}
