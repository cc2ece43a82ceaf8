//! Session state machines
//!
//! The analysis session owns the live result; the chat session is its child,
//! reseeded whenever the result is replaced.

pub mod analysis;
pub mod chat;

pub use analysis::AnalysisSession;
pub use chat::{ChatSession, TurnToken, FALLBACK_REPLY};
