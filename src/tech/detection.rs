//! Technology detection over parsed code blocks.
//!
//! Two rules contribute to the result and are unioned: a language-tag rule that
//! maps a handful of tags straight to an identity, and a pattern rule that adds
//! every signature with at least one matching pattern. The result is a set, so
//! the order of blocks and signatures never changes the outcome.

use super::registry::{all_signatures, signature};
use super::TechId;
use crate::parser::CodeBlock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Language tags that imply a technology regardless of content
const LANGUAGE_TAGS: &[(&str, TechId)] = &[
    ("jsx", TechId::React),
    ("tsx", TechId::React),
    ("vue", TechId::Vue),
    ("ts", TechId::TypeScript),
    ("typescript", TechId::TypeScript),
    ("cs", TechId::CSharp),
    ("csharp", TechId::CSharp),
    ("py", TechId::Python),
    ("python", TechId::Python),
];

/// Set of technologies found in one response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectedTechnologies(BTreeSet<TechId>);

impl DetectedTechnologies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: TechId) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: TechId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identities in registry order
    pub fn iter(&self) -> impl Iterator<Item = TechId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<TechId> for DetectedTechnologies {
    fn from_iter<I: IntoIterator<Item = TechId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Identity implied by a language tag, if any
pub fn tag_technology(language: &str) -> Option<TechId> {
    let key = language.to_lowercase();
    LANGUAGE_TAGS
        .iter()
        .find(|(tag, _)| *tag == key)
        .map(|(_, id)| *id)
}

/// Detects technologies across all given code blocks
pub fn detect<'a, I>(blocks: I) -> DetectedTechnologies
where
    I: IntoIterator<Item = &'a CodeBlock>,
{
    let mut detected = DetectedTechnologies::new();

    for block in blocks {
        if let Some(id) = tag_technology(&block.language) {
            detected.insert(id);
        }

        for sig in all_signatures() {
            if sig.matches(&block.content) {
                detected.insert(sig.id);
            }
        }
    }

    debug!(
        technologies = ?detected.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
        "Detected technologies"
    );
    detected
}

/// Detected technologies whose patterns match this particular block
pub fn block_technologies(block: &CodeBlock, detected: &DetectedTechnologies) -> Vec<TechId> {
    detected
        .iter()
        .filter(|id| signature(*id).matches(&block.content))
        .collect()
}
