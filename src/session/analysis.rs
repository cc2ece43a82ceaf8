//! Analysis session state machine
//!
//! Owns the transition from "no result" to "result available" and the live
//! `AnalysisResult`. Submission is two-phase like a chat turn: `begin_submit`
//! moves the machine into Analyzing (refusing a second concurrent submit),
//! `complete_submit` installs the result or restores whatever was there
//! before. The chat session is a child of the live result and is reseeded
//! whenever a new result replaces the previous one.

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::AnalysisResult;
use crate::session::chat::ChatSession;
use crate::Result;

/// Named states of the session. Analyzing remembers the prior result so a
/// failed re-submission falls back to it instead of clearing the dashboard.
#[derive(Debug)]
enum Phase {
    Idle,
    Analyzing { previous: Option<Arc<AnalysisResult>> },
    Ready(Arc<AnalysisResult>),
}

#[derive(Debug)]
pub struct AnalysisSession {
    phase: Phase,
    chat: Option<ChatSession>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            chat: None,
        }
    }

    /// True while an analyze request is in flight (loading indicator).
    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, Phase::Analyzing { .. })
    }

    /// The live result, if the session is Ready.
    pub fn result(&self) -> Option<&Arc<AnalysisResult>> {
        match &self.phase {
            Phase::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn chat(&self) -> Option<&ChatSession> {
        self.chat.as_ref()
    }

    pub fn chat_mut(&mut self) -> Option<&mut ChatSession> {
        self.chat.as_mut()
    }

    /// Enter Analyzing. Returns false, leaving all state untouched, if a
    /// submit is already in flight; no second request may be issued.
    pub fn begin_submit(&mut self) -> bool {
        if self.is_analyzing() {
            warn!("Analyze refused: a request is already in flight");
            return false;
        }

        let previous = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Ready(result) => Some(result),
            _ => None,
        };
        self.phase = Phase::Analyzing { previous };
        true
    }

    /// Leave Analyzing with the gateway outcome.
    ///
    /// On success the new result replaces the previous one wholesale and the
    /// chat session is reseeded from its insight. On failure the prior state
    /// (Idle or the previous Ready result, chat included) is restored and
    /// the error is handed back for the caller to surface once.
    pub fn complete_submit(&mut self, outcome: Result<AnalysisResult>) -> Result<()> {
        let previous = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Analyzing { previous } => previous,
            other => {
                // Completing a submit that was never begun is a driver bug;
                // keep the state machine consistent and drop the outcome.
                warn!("complete_submit called outside Analyzing; outcome dropped");
                self.phase = other;
                return Ok(());
            }
        };

        match outcome {
            Ok(result) => {
                info!(top_cat = %result.top_cat, "Analysis ready");
                let result = Arc::new(result);
                self.chat = Some(ChatSession::seeded(result.clone()));
                self.phase = Phase::Ready(result);
                Ok(())
            }
            Err(e) => {
                warn!("Analysis failed: {}", e);
                self.phase = match previous {
                    Some(result) => Phase::Ready(result),
                    None => Phase::Idle,
                };
                Err(e)
            }
        }
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}
