//! Preview feasibility for a detected technology set

use crate::tech::registry::signature;
use crate::tech::{DetectedTechnologies, TechId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// UI framework the preview document is bootstrapped with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiFramework {
    #[default]
    None,
    React,
    Vue,
}

impl UiFramework {
    pub fn as_str(&self) -> &'static str {
        match self {
            UiFramework::None => "none",
            UiFramework::React => "react",
            UiFramework::Vue => "vue",
        }
    }
}

impl fmt::Display for UiFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally hosted stylesheet frameworks injected into a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cdn {
    Tailwind,
    Bootstrap,
}

impl Cdn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cdn::Tailwind => "tailwind",
            Cdn::Bootstrap => "bootstrap",
        }
    }
}

impl fmt::Display for Cdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewCapability {
    pub can_preview: bool,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub framework: UiFramework,
    pub cdns: BTreeSet<Cdn>,
}

/// Derives preview feasibility, explanations, framework and CDNs
pub fn analyze(technologies: &DetectedTechnologies) -> PreviewCapability {
    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();
    let mut framework = UiFramework::None;
    let mut cdns = BTreeSet::new();

    let blocked: Vec<TechId> = technologies
        .iter()
        .filter(|id| !signature(*id).is_previewable())
        .collect();

    if !blocked.is_empty() {
        let names: Vec<&str> = blocked.iter().map(|id| id.name()).collect();
        warnings.push(format!(
            "{} code cannot be previewed in the browser.",
            names.join(", ")
        ));

        for id in &blocked {
            let sig = signature(*id);
            if sig.flags.is_backend {
                suggestions.push(format!(
                    "<strong>{}</strong>: Run this code in your IDE or server environment.",
                    sig.name
                ));
            }
            if sig.flags.needs_server {
                suggestions.push(format!(
                    "<strong>{}</strong>: Requires a Node.js server. Use <code>npx create-next-app</code> to set up.",
                    sig.name
                ));
            }
            if sig.flags.needs_compile {
                suggestions.push(format!(
                    "<strong>{}</strong>: Requires compilation. Use the framework's CLI to build and run.",
                    sig.name
                ));
            }
        }
    }

    // Vue is checked second and overwrites React when both are present.
    if technologies.contains(TechId::React) {
        framework = UiFramework::React;
        warnings.push("React code will be transpiled using Babel (basic preview).".to_string());
    }
    if technologies.contains(TechId::Vue) {
        framework = UiFramework::Vue;
        warnings.push("Vue code will use Vue 3 CDN (basic preview).".to_string());
    }

    if technologies.contains(TechId::Tailwind) {
        cdns.insert(Cdn::Tailwind);
        suggestions.push("Tailwind CSS CDN will be included automatically.".to_string());
    }
    if technologies.contains(TechId::Bootstrap) {
        cdns.insert(Cdn::Bootstrap);
        suggestions.push("Bootstrap CSS will be included automatically.".to_string());
    }

    let can_preview = blocked.is_empty() || blocked.len() != technologies.len();

    debug!(
        can_preview,
        framework = %framework,
        blocked = blocked.len(),
        "Analyzed preview capability"
    );

    PreviewCapability {
        can_preview,
        warnings,
        suggestions,
        framework,
        cdns,
    }
}
