//! Chat session state machine
//!
//! Scoped to one analysis result, which is the immutable context for every
//! turn. A turn is a two-phase write: the user message is appended
//! optimistically in `begin_turn`, and exactly one assistant reply lands in
//! `complete_turn` whatever the outcome. Turn tokens carry the identity of
//! the result they were issued under, so a reply that arrives after the
//! result has been replaced is recognized and discarded rather than
//! appended to the wrong history.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{AnalysisResult, ChatMessage};
use crate::Result;

/// Inline reply shown when a turn fails; the conversation keeps flowing
/// instead of raising a blocking notice.
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't reach your advisor just now. Please try asking again.";

/// Correlation token for one in-flight turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnToken {
    turn_id: Uuid,
    context_id: Uuid,
}

/// Per-turn state: composing, or one turn in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnState {
    Composing,
    Sending(TurnToken),
}

/// Conversation scoped to the current analysis result.
#[derive(Debug)]
pub struct ChatSession {
    context: Arc<AnalysisResult>,
    messages: Vec<ChatMessage>,
    turn: TurnState,
}

impl ChatSession {
    /// Start a fresh session seeded with the result's narrative insight as
    /// the opening assistant message.
    pub fn seeded(context: Arc<AnalysisResult>) -> Self {
        let opening = ChatMessage::assistant(context.ai_insight.clone());
        Self {
            context,
            messages: vec![opening],
            turn: TurnState::Composing,
        }
    }

    pub fn context(&self) -> &Arc<AnalysisResult> {
        &self.context
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while a turn is in flight (typing indicator).
    pub fn is_pending(&self) -> bool {
        matches!(self.turn, TurnState::Sending(_))
    }

    /// Open a turn: append the user message and mark the session pending.
    ///
    /// Returns `None` without touching any state for blank input or while a
    /// turn is already in flight; turns are strictly serialized.
    pub fn begin_turn(&mut self, text: &str) -> Option<TurnToken> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if self.is_pending() {
            debug!("Chat turn refused: a turn is already in flight");
            return None;
        }

        let token = TurnToken {
            turn_id: Uuid::new_v4(),
            context_id: self.context.result_id,
        };
        self.messages.push(ChatMessage::user(text));
        self.turn = TurnState::Sending(token);
        Some(token)
    }

    /// Close a turn with the gateway outcome.
    ///
    /// Appends the returned text, or the fixed fallback reply on failure,
    /// and clears the pending flag. A token that does not match the active
    /// turn belongs to a replaced context; its outcome is discarded and the
    /// current state is left untouched. Returns whether the reply landed.
    pub fn complete_turn(&mut self, token: TurnToken, outcome: Result<String>) -> bool {
        match self.turn {
            TurnState::Sending(active) if active == token => {
                let reply = match outcome {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Chat turn failed, replying with fallback: {}", e);
                        FALLBACK_REPLY.to_string()
                    }
                };
                self.messages.push(ChatMessage::assistant(reply));
                self.turn = TurnState::Composing;
                true
            }
            _ => {
                debug!("Discarding reply for stale chat turn");
                false
            }
        }
    }
}
