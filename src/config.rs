use std::env;
use thiserror::Error;
use tracing::Level;

const DEFAULT_LOG_LEVEL: Level = Level::INFO;
const DEFAULT_DARK_MODE: bool = false;

const DEFAULT_TAILWIND_URL: &str = "https://cdn.tailwindcss.com";
const DEFAULT_BOOTSTRAP_CSS_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css";
const DEFAULT_BOOTSTRAP_JS_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js";
const DEFAULT_REACT_URL: &str = "https://unpkg.com/react@18/umd/react.development.js";
const DEFAULT_REACT_DOM_URL: &str = "https://unpkg.com/react-dom@18/umd/react-dom.development.js";
const DEFAULT_BABEL_URL: &str = "https://unpkg.com/@babel/standalone/babel.min.js";
const DEFAULT_VUE_URL: &str = "https://unpkg.com/vue@3/dist/vue.global.js";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Externally hosted scripts and stylesheets referenced by preview documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewAssets {
    pub tailwind: String,
    pub bootstrap_css: String,
    pub bootstrap_js: String,
    pub react: String,
    pub react_dom: String,
    pub babel: String,
    pub vue: String,
}

impl Default for PreviewAssets {
    fn default() -> Self {
        Self {
            tailwind: DEFAULT_TAILWIND_URL.to_string(),
            bootstrap_css: DEFAULT_BOOTSTRAP_CSS_URL.to_string(),
            bootstrap_js: DEFAULT_BOOTSTRAP_JS_URL.to_string(),
            react: DEFAULT_REACT_URL.to_string(),
            react_dom: DEFAULT_REACT_DOM_URL.to_string(),
            babel: DEFAULT_BABEL_URL.to_string(),
            vue: DEFAULT_VUE_URL.to_string(),
        }
    }
}

impl PreviewAssets {
    /// Defaults with `CODEPEEK_*_URL` overrides applied
    pub fn from_env() -> Self {
        let url = |var: &str, default: &str| env::var(var).unwrap_or_else(|_| default.to_string());

        Self {
            tailwind: url("CODEPEEK_TAILWIND_URL", DEFAULT_TAILWIND_URL),
            bootstrap_css: url("CODEPEEK_BOOTSTRAP_CSS_URL", DEFAULT_BOOTSTRAP_CSS_URL),
            bootstrap_js: url("CODEPEEK_BOOTSTRAP_JS_URL", DEFAULT_BOOTSTRAP_JS_URL),
            react: url("CODEPEEK_REACT_URL", DEFAULT_REACT_URL),
            react_dom: url("CODEPEEK_REACT_DOM_URL", DEFAULT_REACT_DOM_URL),
            babel: url("CODEPEEK_BABEL_URL", DEFAULT_BABEL_URL),
            vue: url("CODEPEEK_VUE_URL", DEFAULT_VUE_URL),
        }
    }

    fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("tailwind", self.tailwind.as_str()),
            ("bootstrap_css", self.bootstrap_css.as_str()),
            ("bootstrap_js", self.bootstrap_js.as_str()),
            ("react", self.react.as_str()),
            ("react_dom", self.react_dom.as_str()),
            ("babel", self.babel.as_str()),
            ("vue", self.vue.as_str()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct CodepeekConfig {
    /// Render previews on a dark background (`CODEPEEK_DARK_MODE`)
    pub dark_mode: bool,

    /// Level used when no `--log-level`, `-v` or `-q` flag is given
    /// (`CODEPEEK_LOG_LEVEL`); unknown names fall back to INFO
    pub log_level: Level,

    pub assets: PreviewAssets,
}

impl Default for CodepeekConfig {
    fn default() -> Self {
        let dark_mode = env::var("CODEPEEK_DARK_MODE")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_DARK_MODE);

        let log_level = env::var("CODEPEEK_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse::<Level>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            dark_mode,
            log_level,
            assets: PreviewAssets::from_env(),
        }
    }
}

impl CodepeekConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in self.assets.entries() {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::ValidationFailed(format!(
                    "asset URL for {} must be http(s), got '{}'",
                    field, url
                )));
            }
        }
        Ok(())
    }
}
