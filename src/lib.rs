//! codepeek - code block extraction, technology detection and live preview
//! for answers produced by language models
//!
//! A markdown answer is split into prose and fenced code blocks, the code is
//! matched against a registry of technology signatures, and the result decides
//! whether the code can run inside a sandboxed browser frame. When it can, a
//! self-contained HTML document is synthesized with the right UI framework
//! runtime and CSS CDNs.
//!
//! # Core Concepts
//!
//! - **Segments**: ordered text and code pieces of an answer ([`parser`])
//! - **Signatures**: per-technology regex patterns and capability flags
//!   ([`tech::registry`])
//! - **Capability**: warnings, suggestions, framework and CDN choice derived
//!   from the detected set ([`preview::capability`])
//! - **Session**: one answer in flight at a time, with its retained preview
//!   ([`session`])
//!
//! # Example Usage
//!
//! ```
//! use codepeek::{PreviewOutcome, PreviewSession};
//!
//! let mut session = PreviewSession::default();
//! let request = session.begin_request();
//! session
//!     .complete_request(request, "```html\n<h1 class=\"text-center\">Hi</h1>\n```")
//!     .unwrap();
//!
//! match session.preview(false).unwrap() {
//!     PreviewOutcome::Ready { document, .. } => assert!(document.contains("<h1")),
//!     PreviewOutcome::Blocked { .. } => unreachable!(),
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`parser`]: fenced code block extraction
//! - [`tech`]: technology identifiers, registry and detection
//! - [`preview`]: capability analysis, framework adapters and document building
//! - [`markdown`]: lightweight prose renderer
//! - [`render`]: display markup for a parsed answer
//! - [`session`]: request tracking and preview state

pub mod cli;
pub mod config;
pub mod markdown;
pub mod parser;
pub mod preview;
pub mod render;
pub mod session;
pub mod tech;
pub mod util;

pub use config::{CodepeekConfig, ConfigError, PreviewAssets};
pub use parser::{parse, CodeBlock, Segment};
pub use preview::{analyze, Cdn, DocumentBuilder, PreviewCapability, UiFramework};
pub use session::{PreviewOutcome, PreviewSession, RequestId, ResponseAnalysis, SessionError};
pub use tech::{detect, DetectedTechnologies, TechId, TechnologySignature};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
