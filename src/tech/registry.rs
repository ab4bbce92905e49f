//! Static technology signature table.
//!
//! Each signature carries the regex patterns used to recognise a technology in a
//! code block, the flags that decide whether it can be previewed, and the badge
//! metadata shown next to a response. The table is built once on first use and
//! is never mutated afterwards; callers only get shared references through the
//! lookup functions below.

use super::TechId;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Capability flags of a technology signature
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TechFlags {
    /// Can run inside the sandboxed preview frame
    pub previewable: bool,

    /// Source must be transformed in the browser before it runs (JSX, Vue templates)
    pub needs_transpile: bool,

    /// Needs a server process to render (Next.js)
    pub needs_server: bool,

    /// Needs a build-time compiler (Angular, Svelte)
    pub needs_compile: bool,

    /// Server-side language (C#, Python, Node.js)
    pub is_backend: bool,

    /// Database query language
    pub is_database: bool,

    /// CSS framework delivered through a CDN stylesheet or script
    pub needs_cdn: bool,

    /// Only meaningful when combined with HTML markup (CSS)
    pub with_html: bool,
}

/// One entry of the registry: how a technology is recognised and displayed
///
/// Signatures are built once and handed out as `&'static` references; use
/// [`signature`], [`lookup`] or [`all_signatures`] to reach them.
#[derive(Debug, Serialize)]
pub struct TechnologySignature {
    /// Identifier of the technology
    pub id: TechId,

    /// Compiled patterns; any single match marks a block as using this technology
    #[serde(skip)]
    patterns: Vec<Regex>,

    /// Capability flags read by the preview analysis
    pub flags: TechFlags,

    /// Human readable name (e.g. "Next.js")
    pub name: &'static str,

    /// Icon class shown on the badge (e.g. "bi-filetype-jsx")
    pub icon: &'static str,

    /// Badge background as `#RRGGBB`
    pub color: &'static str,
}

impl TechnologySignature {
    /// True when any pattern matches the given code
    pub fn matches(&self, code: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(code))
    }

    /// Shorthand for `flags.previewable`
    pub fn is_previewable(&self) -> bool {
        self.flags.previewable
    }
}

struct SignatureDef {
    id: TechId,
    patterns: &'static [&'static str],
    flags: TechFlags,
    icon: &'static str,
    color: &'static str,
}

const PREVIEWABLE: TechFlags = TechFlags {
    previewable: true,
    needs_transpile: false,
    needs_server: false,
    needs_compile: false,
    is_backend: false,
    is_database: false,
    needs_cdn: false,
    with_html: false,
};

const NOT_PREVIEWABLE: TechFlags = TechFlags {
    previewable: false,
    ..PREVIEWABLE
};

const DEFINITIONS: &[SignatureDef] = &[
    SignatureDef {
        id: TechId::React,
        patterns: &[
            r#"import.*from\s+['"]react['"]"#,
            r"useState|useEffect|useContext",
            r"<\w+\s+.*/>",
            r"className=",
        ],
        flags: TechFlags {
            needs_transpile: true,
            ..PREVIEWABLE
        },
        icon: "bi-filetype-jsx",
        color: "#61DAFB",
    },
    SignatureDef {
        id: TechId::NextJs,
        patterns: &[
            r#"from\s+['"]next"#,
            r"getServerSideProps|getStaticProps",
            r"useRouter.*next/router",
            r"next/image|next/link",
        ],
        flags: TechFlags {
            needs_server: true,
            ..NOT_PREVIEWABLE
        },
        icon: "bi-triangle",
        color: "#000000",
    },
    SignatureDef {
        id: TechId::Vue,
        patterns: &[
            r"<template>",
            r"<script setup>",
            r"defineComponent|ref\(|reactive\(",
            r"v-if|v-for|v-model",
        ],
        flags: TechFlags {
            needs_transpile: true,
            ..PREVIEWABLE
        },
        icon: "bi-filetype-vue",
        color: "#4FC08D",
    },
    SignatureDef {
        id: TechId::Angular,
        patterns: &[
            r"@Component|@Injectable|@NgModule",
            r"\*ngIf|\*ngFor",
            r"\[ngClass\]|\(click\)",
        ],
        flags: TechFlags {
            needs_compile: true,
            ..NOT_PREVIEWABLE
        },
        icon: "bi-shield",
        color: "#DD0031",
    },
    SignatureDef {
        id: TechId::Svelte,
        patterns: &[r"<script>.*\$:", r"\{#if|\{#each|\{@html\}"],
        flags: TechFlags {
            needs_compile: true,
            ..NOT_PREVIEWABLE
        },
        icon: "bi-fire",
        color: "#FF3E00",
    },
    SignatureDef {
        id: TechId::Tailwind,
        patterns: &[
            r#"class=["'][^"']*(?:flex|grid|p-\d|m-\d|text-\w+|bg-\w+|rounded|shadow|hover:)[^"']*"#,
        ],
        flags: TechFlags {
            needs_cdn: true,
            ..PREVIEWABLE
        },
        icon: "bi-wind",
        color: "#06B6D4",
    },
    SignatureDef {
        id: TechId::Bootstrap,
        patterns: &[
            r#"class=["'][^"']*(?:container|row|col-|btn|form-control|card|navbar|modal)[^"']*"#,
        ],
        flags: TechFlags {
            needs_cdn: true,
            ..PREVIEWABLE
        },
        icon: "bi-bootstrap",
        color: "#7952B3",
    },
    // Only reachable through the ts/typescript language tag.
    SignatureDef {
        id: TechId::TypeScript,
        patterns: &[],
        flags: TechFlags {
            needs_transpile: true,
            ..PREVIEWABLE
        },
        icon: "bi-filetype-tsx",
        color: "#3178C6",
    },
    SignatureDef {
        id: TechId::CSharp,
        patterns: &[r"using\s+System|namespace\s+\w+|public\s+class|async\s+Task"],
        flags: TechFlags {
            is_backend: true,
            ..NOT_PREVIEWABLE
        },
        icon: "bi-filetype-cs",
        color: "#512BD4",
    },
    SignatureDef {
        id: TechId::Python,
        patterns: &[r"(?m)^import\s+\w+|^from\s+\w+\s+import|def\s+\w+\(|class\s+\w+:"],
        flags: TechFlags {
            is_backend: true,
            ..NOT_PREVIEWABLE
        },
        icon: "bi-filetype-py",
        color: "#3776AB",
    },
    SignatureDef {
        id: TechId::NodeJs,
        patterns: &[r#"require\(['"]|module\.exports|const\s+express|app\.listen"#],
        flags: TechFlags {
            is_backend: true,
            ..NOT_PREVIEWABLE
        },
        icon: "bi-filetype-js",
        color: "#339933",
    },
    SignatureDef {
        id: TechId::Sql,
        patterns: &[r"(?i)SELECT\s+.*FROM|INSERT\s+INTO|UPDATE\s+.*SET|CREATE\s+TABLE"],
        flags: TechFlags {
            is_database: true,
            ..NOT_PREVIEWABLE
        },
        icon: "bi-database",
        color: "#4479A1",
    },
    SignatureDef {
        id: TechId::Html,
        patterns: &[r"(?i)<html|<head|<body|<!DOCTYPE"],
        flags: PREVIEWABLE,
        icon: "bi-filetype-html",
        color: "#E34F26",
    },
    SignatureDef {
        id: TechId::Css,
        patterns: &[r"(?m)^[\w.#\[\]]+\s*\{[^}]+\}"],
        flags: TechFlags {
            with_html: true,
            ..PREVIEWABLE
        },
        icon: "bi-filetype-css",
        color: "#1572B6",
    },
];

static REGISTRY: OnceLock<Vec<TechnologySignature>> = OnceLock::new();

fn registry() -> &'static [TechnologySignature] {
    REGISTRY.get_or_init(|| {
        DEFINITIONS
            .iter()
            .map(|def| TechnologySignature {
                id: def.id,
                patterns: def
                    .patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("valid regex"))
                    .collect(),
                flags: def.flags,
                name: def.id.name(),
                icon: def.icon,
                color: def.color,
            })
            .collect()
    })
}

/// All signatures in registry order
///
/// Registry order matches the declaration order of [`TechId`], which is also
/// the iteration order of a detected set.
pub fn all_signatures() -> &'static [TechnologySignature] {
    registry()
}

/// Returns the signature of a technology
///
/// Every identifier has exactly one registry entry, so this never fails.
///
/// # Arguments
///
/// * `id` - Technology to look up
///
/// # Example
///
/// ```
/// use codepeek::tech::{signature, TechId};
///
/// let react = signature(TechId::React);
/// assert_eq!(react.name, "React");
/// assert!(react.is_previewable());
/// ```
pub fn signature(id: TechId) -> &'static TechnologySignature {
    registry()
        .iter()
        .find(|s| s.id == id)
        .expect("every TechId has a registry entry")
}

/// Looks up a signature by its wire name (e.g. "nextjs")
///
/// Returns `None` for names outside the registry.
pub fn lookup(wire_name: &str) -> Option<&'static TechnologySignature> {
    TechId::from_wire_name(wire_name).map(signature)
}

/// Errors from badge color handling
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color '{0}': expected #RRGGBB")]
    Malformed(String),
}

/// Picks black or white text for a `#RRGGBB` background using YIQ brightness
///
/// Backgrounds with a YIQ value of 128 or more get black text, darker ones get
/// white.
///
/// # Arguments
///
/// * `hex` - Background color, `#` followed by six hex digits
///
/// # Errors
///
/// Returns [`ColorError::Malformed`] for anything else, including 3-digit
/// shorthand.
///
/// # Example
///
/// ```
/// use codepeek::tech::contrast_color;
///
/// assert_eq!(contrast_color("#ffffff"), Ok("#000000"));
/// assert_eq!(contrast_color("#000000"), Ok("#ffffff"));
/// assert!(contrast_color("#fff").is_err());
/// ```
pub fn contrast_color(hex: &str) -> Result<&'static str, ColorError> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| ColorError::Malformed(hex.to_string()))?;

    let channel = |range: std::ops::Range<usize>| {
        u32::from_str_radix(&digits[range], 16)
            .map_err(|_| ColorError::Malformed(hex.to_string()))
    };
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;

    let yiq = (r * 299 + g * 587 + b * 114) / 1000;
    Ok(if yiq >= 128 { "#000000" } else { "#ffffff" })
}
