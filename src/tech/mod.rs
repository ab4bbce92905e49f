//! Technology registry and detection.
//!
//! Strongly-typed identifiers ([`TechId`]) index an immutable signature table
//! ([`registry`]). Detection is deterministic: a block either matches a
//! signature's patterns or carries a language tag that implies the technology.
//!
//! # Example
//!
//! ```
//! use codepeek::parser::{code_blocks, parse};
//! use codepeek::tech::{detect, TechId};
//!
//! let segments = parse("```py\nimport os\n```");
//! let detected = detect(code_blocks(&segments));
//! assert!(detected.contains(TechId::Python));
//! ```

#[macro_use]
pub mod id_enum_macro;

pub mod detection;
pub mod registry;
pub mod tech_id;

pub use detection::{block_technologies, detect, tag_technology, DetectedTechnologies};
pub use registry::{
    all_signatures, contrast_color, signature, ColorError, TechFlags, TechnologySignature,
};
pub use tech_id::TechId;
