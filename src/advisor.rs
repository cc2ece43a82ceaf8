//! Advisor front object
//!
//! Owns the gateway and the analysis session (with its child chat session)
//! and drives the two-phase submit of each request kind: open the state
//! machine, await the gateway, close the machine with the outcome. The
//! presentation layer raises intents through these methods and reads state
//! back through [`Advisor::session`].

use tracing::{debug, info};

use crate::gateway::AdvisorGateway;
use crate::models::ChatMessage;
use crate::profile::ProfileForm;
use crate::session::AnalysisSession;
use crate::Result;

pub struct Advisor {
    gateway: Box<dyn AdvisorGateway>,
    session: AnalysisSession,
}

impl Advisor {
    pub fn new(gateway: Box<dyn AdvisorGateway>) -> Self {
        Self {
            gateway,
            session: AnalysisSession::new(),
        }
    }

    /// Session state, for rendering.
    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    /// Mutable session access for presentation drivers that interleave the
    /// begin/complete phases themselves (event loops).
    pub fn session_mut(&mut self) -> &mut AnalysisSession {
        &mut self.session
    }

    /// Snapshot the form and run one analyze request.
    ///
    /// A submit while another is in flight is ignored without issuing a
    /// request. A failure restores the previous state and is returned for
    /// the caller to surface once; it is never fatal to the session.
    pub async fn analyze(&mut self, form: &ProfileForm) -> Result<()> {
        if !self.session.begin_submit() {
            return Ok(());
        }

        let profile = form.snapshot();
        info!(income = profile.income, currency = %profile.currency, "Analyzing profile");

        let outcome = self.gateway.analyze(&profile).await;
        self.session.complete_submit(outcome)
    }

    /// Run one chat turn against the live result.
    ///
    /// No-op (returns `None`) when no analysis is ready, the input is blank,
    /// or a turn is already pending. Otherwise resolves to the assistant
    /// reply that was appended: the returned text on success, the fallback
    /// on failure. Chat failures never escape as errors.
    pub async fn send_chat(&mut self, text: &str) -> Option<&ChatMessage> {
        let (token, context) = {
            let chat = self.session.chat_mut()?;
            let token = chat.begin_turn(text)?;
            (token, chat.context().clone())
        };

        debug!("Chat turn opened");
        let outcome = self.gateway.chat(text.trim(), &context).await;

        let chat = self.session.chat_mut()?;
        chat.complete_turn(token, outcome);
        chat.messages().last()
    }
}
