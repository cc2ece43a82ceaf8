//! Savings Advisor Client
//!
//! Interactive client for the savings analysis service:
//! - Collects a financial profile (mutable form state with numeric coercion)
//! - Submits it for analysis over HTTP and holds the live result
//! - Hosts a follow-up chat session scoped to that result
//!
//! The core is the pair of session state machines (analysis, chat) plus the
//! request gateway; presentation layers drive them through [`advisor::Advisor`]
//! and render whatever the sessions expose.

pub mod advisor;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod profile;
pub mod render;
pub mod session;

pub use error::Result;

// Re-export common types
pub use advisor::Advisor;
pub use config::AdvisorConfig;
pub use gateway::{AdvisorGateway, HttpGateway};
pub use models::{AnalysisResult, ChatMessage, MessageRole, Profile};
pub use profile::{NumericField, ProfileForm};
pub use session::{AnalysisSession, ChatSession};
