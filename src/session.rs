//! Request-scoped preview state
//!
//! A [`PreviewSession`] holds the analysis of the latest answer and the last
//! preview document built from it. Every retrieval is tagged with a
//! [`RequestId`]; only the most recently started request may deliver its
//! result, so a slow answer to an abandoned request can never overwrite a newer
//! one.

use crate::config::PreviewAssets;
use crate::parser::{code_blocks, parse, Segment};
use crate::preview::{
    analyze, has_previewable_code, preview_label, preview_source, DocumentBuilder,
    PreviewCapability,
};
use crate::render::{error_markup, render_response};
use crate::tech::{detect, DetectedTechnologies};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Response for request {received} arrived after request {current} was started")]
    StaleResponse {
        received: RequestId,
        current: RequestId,
    },

    #[error("Request {0} is not pending")]
    NotPending(RequestId),

    #[error("No response has been analyzed yet")]
    NoResponse,

    #[error("No previewable code found")]
    NothingToPreview,
}

/// Parse and detection results for one answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseAnalysis {
    pub request: RequestId,
    pub segments: Vec<Segment>,
    pub technologies: DetectedTechnologies,
    pub previewable: bool,
}

impl ResponseAnalysis {
    pub fn from_text(request: RequestId, text: &str) -> Self {
        let segments = parse(text);
        let technologies = detect(code_blocks(&segments));
        let previewable = has_previewable_code(&segments, &technologies);
        Self {
            request,
            segments,
            technologies,
            previewable,
        }
    }

    pub fn capability(&self) -> PreviewCapability {
        analyze(&self.technologies)
    }

    pub fn markup(&self) -> String {
        render_response(&self.segments, &self.technologies)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Everything detected is non-previewable
    Blocked {
        warnings: Vec<String>,
        suggestions: Vec<String>,
    },
    Ready {
        document: String,
        label: String,
        warnings: Vec<String>,
    },
}

#[derive(Debug, Clone)]
struct RetainedPreview {
    document: String,
    dark_mode: bool,
}

#[derive(Debug, Default)]
pub struct PreviewSession {
    assets: PreviewAssets,
    next_id: u64,
    pending: Option<RequestId>,
    latest: Option<RequestId>,
    analysis: Option<ResponseAnalysis>,
    preview: Option<RetainedPreview>,
}

impl PreviewSession {
    pub fn new(assets: PreviewAssets) -> Self {
        Self {
            assets,
            ..Self::default()
        }
    }

    /// Starts a request, discarding every result of the previous one
    pub fn begin_request(&mut self) -> RequestId {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        self.pending = Some(id);
        self.latest = Some(id);
        self.analysis = None;
        self.preview = None;
        debug!(request = %id, "Request started, previous state cleared");
        id
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn accept(&mut self, id: RequestId) -> Result<(), SessionError> {
        match self.latest {
            Some(current) if current != id => {
                warn!(received = %id, current = %current, "Discarding stale response");
                Err(SessionError::StaleResponse {
                    received: id,
                    current,
                })
            }
            _ if self.pending != Some(id) => Err(SessionError::NotPending(id)),
            _ => {
                self.pending = None;
                Ok(())
            }
        }
    }

    /// Analyzes the answer to the current request
    pub fn complete_request(
        &mut self,
        id: RequestId,
        text: &str,
    ) -> Result<&ResponseAnalysis, SessionError> {
        self.accept(id)?;
        let analysis = ResponseAnalysis::from_text(id, text);
        info!(
            request = %id,
            segments = analysis.segments.len(),
            technologies = analysis.technologies.len(),
            "Response analyzed"
        );
        Ok(&*self.analysis.insert(analysis))
    }

    /// Ends the current request with a retrieval failure, returning the alert markup
    pub fn fail_request(&mut self, id: RequestId, message: &str) -> Result<String, SessionError> {
        self.accept(id)?;
        warn!(request = %id, error = message, "Response retrieval failed");
        Ok(error_markup(message))
    }

    pub fn analysis(&self) -> Option<&ResponseAnalysis> {
        self.analysis.as_ref()
    }

    /// Builds (or refuses) a preview of the current answer
    pub fn preview(&mut self, dark_mode: bool) -> Result<PreviewOutcome, SessionError> {
        let analysis = self.analysis.as_ref().ok_or(SessionError::NoResponse)?;
        let capability = analysis.capability();

        if !capability.can_preview {
            return Ok(PreviewOutcome::Blocked {
                warnings: capability.warnings,
                suggestions: capability.suggestions,
            });
        }

        let source = preview_source(&analysis.segments).ok_or(SessionError::NothingToPreview)?;
        let document = DocumentBuilder::new(&self.assets).build(
            &source,
            capability.framework,
            &capability.cdns,
            dark_mode,
        );
        let label = preview_label(&capability);
        debug!(request = %analysis.request, label = %label, "Preview built");

        self.preview = Some(RetainedPreview {
            document: document.clone(),
            dark_mode,
        });
        Ok(PreviewOutcome::Ready {
            document,
            label,
            warnings: capability.warnings,
        })
    }

    /// Rebuilds the retained preview for a new dark-mode setting
    ///
    /// Does nothing when no preview has been built yet.
    pub fn set_dark_mode(&mut self, dark_mode: bool) -> Result<Option<&str>, SessionError> {
        if self.preview.is_none() {
            return Ok(None);
        }
        self.preview(dark_mode)?;
        Ok(self.current_document())
    }

    pub fn dark_mode(&self) -> Option<bool> {
        self.preview.as_ref().map(|p| p.dark_mode)
    }

    /// Last built document, used for "open in new tab"
    pub fn current_document(&self) -> Option<&str> {
        self.preview.as_ref().map(|p| p.document.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::document::DARK_MODE_STYLE;
    use crate::tech::TechId;

    const HTML_ANSWER: &str = "Try this:\n```html\n<button class=\"btn btn-primary\">Go</button>\n```";

    #[test]
    fn test_complete_request() {
        let mut session = PreviewSession::default();
        let id = session.begin_request();
        assert!(session.is_pending());

        let analysis = session.complete_request(id, HTML_ANSWER).unwrap();
        assert_eq!(analysis.segments.len(), 2);
        assert!(analysis.technologies.contains(TechId::Bootstrap));
        assert!(analysis.previewable);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_begin_request_clears_state_immediately() {
        let mut session = PreviewSession::default();
        let first = session.begin_request();
        session.complete_request(first, HTML_ANSWER).unwrap();
        session.preview(false).unwrap();
        assert!(session.current_document().is_some());

        session.begin_request();
        assert!(session.analysis().is_none());
        assert!(session.current_document().is_none());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut session = PreviewSession::default();
        let first = session.begin_request();
        let second = session.begin_request();

        session.complete_request(second, "```py\nimport os\n```").unwrap();
        let err = session.complete_request(first, HTML_ANSWER).unwrap_err();
        assert_eq!(
            err,
            SessionError::StaleResponse {
                received: first,
                current: second
            }
        );
        let analysis = session.analysis().unwrap();
        assert_eq!(analysis.request, second);
        assert!(analysis.technologies.contains(TechId::Python));
    }

    #[test]
    fn test_duplicate_completion_is_rejected() {
        let mut session = PreviewSession::default();
        let id = session.begin_request();
        session.complete_request(id, HTML_ANSWER).unwrap();
        assert_eq!(
            session.complete_request(id, HTML_ANSWER).unwrap_err(),
            SessionError::NotPending(id)
        );
    }

    #[test]
    fn test_fail_request() {
        let mut session = PreviewSession::default();
        let id = session.begin_request();
        let html = session.fail_request(id, "connection reset").unwrap();
        assert!(html.contains("Error: connection reset"));
        assert!(!session.is_pending());
        assert!(session.analysis().is_none());
    }

    #[test]
    fn test_preview_before_response() {
        let mut session = PreviewSession::default();
        assert_eq!(session.preview(false).unwrap_err(), SessionError::NoResponse);
    }

    #[test]
    fn test_preview_blocked_for_backend_code() {
        let mut session = PreviewSession::default();
        let id = session.begin_request();
        session.complete_request(id, "```py\nimport os\n```").unwrap();

        match session.preview(false).unwrap() {
            PreviewOutcome::Blocked {
                warnings,
                suggestions,
            } => {
                assert!(warnings[0].contains("Python"));
                assert!(suggestions[0].contains("server environment"));
            }
            other => panic!("Expected Blocked, got {:?}", other),
        }
        assert!(session.current_document().is_none());
    }

    #[test]
    fn test_nothing_to_preview() {
        let mut session = PreviewSession::default();
        let id = session.begin_request();
        session.complete_request(id, "```js\nconsole.log(1)\n```").unwrap();
        assert_eq!(
            session.preview(false).unwrap_err(),
            SessionError::NothingToPreview
        );
    }

    #[test]
    fn test_preview_ready_and_dark_mode_toggle() {
        let mut session = PreviewSession::default();
        let id = session.begin_request();
        session.complete_request(id, HTML_ANSWER).unwrap();

        match session.preview(false).unwrap() {
            PreviewOutcome::Ready { document, label, .. } => {
                assert_eq!(label, "Bootstrap");
                assert!(document.contains("bootstrap.min.css"));
                assert!(!document.contains(DARK_MODE_STYLE));
            }
            other => panic!("Expected Ready, got {:?}", other),
        }

        let dark = session.set_dark_mode(true).unwrap().unwrap().to_string();
        assert!(dark.contains(DARK_MODE_STYLE));
        assert_eq!(session.dark_mode(), Some(true));

        // Toggling again with the same value leaves the same document.
        let again = session.set_dark_mode(true).unwrap().unwrap().to_string();
        assert_eq!(dark, again);
    }

    #[test]
    fn test_dark_mode_without_preview_is_noop() {
        let mut session = PreviewSession::default();
        let id = session.begin_request();
        session.complete_request(id, HTML_ANSWER).unwrap();
        assert_eq!(session.set_dark_mode(true).unwrap(), None);
        assert!(session.current_document().is_none());
    }
}
