//! Conversation engine
//!
//! Drives the wizard for every chat: looks up the session slot, applies
//! the transition for the incoming input, and sends the campaign when the
//! final step completes. The chat's slot lock is held for the whole
//! round, dispatch included, so inputs from one chat are processed
//! strictly one at a time while other chats proceed in parallel.
//!
//! Every path that finishes a session, successfully or not, empties the
//! slot and drops it from the store before the reply goes back.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, error, info, warn};

use crate::access::AccessGate;
use crate::config::CampaignConfig;
use crate::mail::dispatch::{DispatchEngine, DispatchPolicy};
use crate::state::session::{Campaign, Session, SessionState, TerminalVariant};
use crate::state::store::SessionStore;
use crate::utils::errors::Result;

use super::prompts;
use super::resolver::{AttachmentResolver, FileReference};
use super::transition::{self, StepOutcome};

/// Wizard orchestrator shared by all handlers
#[derive(Clone)]
pub struct ConversationEngine {
    store: SessionStore,
    gate: AccessGate,
    dispatcher: DispatchEngine,
    resolver: Arc<dyn AttachmentResolver>,
    variant: TerminalVariant,
    max_recipients: usize,
    session_ttl: Duration,
}

impl ConversationEngine {
    pub fn new(
        store: SessionStore,
        gate: AccessGate,
        dispatcher: DispatchEngine,
        resolver: Arc<dyn AttachmentResolver>,
        campaign: &CampaignConfig,
    ) -> Self {
        Self {
            store,
            gate,
            dispatcher,
            resolver,
            variant: campaign.terminal_variant,
            max_recipients: campaign.max_recipients,
            session_ttl: Duration::minutes(campaign.session_ttl_minutes),
        }
    }

    /// Open a fresh session for the chat. Any campaign already in
    /// progress is dropped and the wizard starts over from the code step.
    pub async fn start_conversation(&self, chat_id: i64) -> String {
        loop {
            let slot = self.store.slot(chat_id).await;
            let mut cell = slot.lock().await;

            // A concurrent cancel or dispatch can swap the mapped slot
            // between lookup and lock; only write into the current one.
            let mapped = self.store.slot(chat_id).await;
            if !Arc::ptr_eq(&slot, &mapped) {
                continue;
            }

            let restarted = cell.is_some();
            *cell = Some(Session::new(chat_id, self.variant, self.session_ttl));
            info!(chat_id = chat_id, restarted = restarted, "Wizard session opened");
            return prompts::WELCOME.to_string();
        }
    }

    /// Abandon the chat's session, if any
    pub async fn cancel(&self, chat_id: i64) -> String {
        if let Some(slot) = self.store.peek(chat_id).await {
            let mut cell = slot.lock().await;
            if cell.take().is_some() {
                // Unmap while the lock is still held; a /start landing
                // in between would open its session in a dead slot.
                self.store.discard(chat_id).await;
                info!(chat_id = chat_id, "Wizard session cancelled");
            }
        }
        prompts::CANCELLED.to_string()
    }

    /// Feed a text message to the chat's wizard
    pub async fn handle_text(&self, chat_id: i64, text: &str) -> String {
        let Some(slot) = self.store.peek(chat_id).await else {
            debug!(chat_id = chat_id, "Text received with no active session");
            return prompts::NO_SESSION.to_string();
        };
        let mut cell = slot.lock().await;

        let Some(session) = cell.as_mut() else {
            return prompts::NO_SESSION.to_string();
        };
        if session.is_expired() {
            return self.expire(chat_id, &mut cell).await;
        }

        let state = session.state;
        let outcome = transition::apply_text(session, text, &self.gate, self.max_recipients);
        debug!(chat_id = chat_id, state = ?state, "Processed text input");
        self.conclude(chat_id, &mut cell, outcome).await
    }

    /// Feed a document to the chat's wizard. The file is fetched from
    /// Telegram only when the session is actually waiting for one.
    pub async fn handle_document(&self, chat_id: i64, reference: FileReference) -> String {
        let Some(slot) = self.store.peek(chat_id).await else {
            debug!(chat_id = chat_id, "Document received with no active session");
            return prompts::NO_SESSION.to_string();
        };
        let mut cell = slot.lock().await;

        let Some(session) = cell.as_mut() else {
            return prompts::NO_SESSION.to_string();
        };
        if session.is_expired() {
            return self.expire(chat_id, &mut cell).await;
        }

        let wants_attachment = session.state == SessionState::AwaitingTerminalInput
            && session.variant == TerminalVariant::SingleWithAttachment;
        if !wants_attachment {
            session.touch(self.session_ttl);
            return transition::reprompt_for(session).to_string();
        }

        match self.resolver.resolve(&reference).await {
            Ok(attachment) => {
                info!(
                    chat_id = chat_id,
                    filename = %attachment.filename,
                    bytes = attachment.content.len(),
                    "Attachment resolved"
                );
                let outcome = transition::apply_document(session, attachment);
                self.conclude(chat_id, &mut cell, outcome).await
            }
            Err(e) => {
                warn!(chat_id = chat_id, error = %e, "Attachment resolution failed");
                session.touch(self.session_ttl);
                prompts::RESOLVE_FAILED.to_string()
            }
        }
    }

    /// Remind the chat what the wizard expects, for updates it cannot
    /// consume (stickers, photos, voice notes)
    pub async fn handle_unsupported(&self, chat_id: i64) -> String {
        let Some(slot) = self.store.peek(chat_id).await else {
            return prompts::NO_SESSION.to_string();
        };
        let mut cell = slot.lock().await;

        let Some(session) = cell.as_mut() else {
            return prompts::NO_SESSION.to_string();
        };
        if session.is_expired() {
            return self.expire(chat_id, &mut cell).await;
        }

        session.touch(self.session_ttl);
        transition::reprompt_for(session).to_string()
    }

    /// Drop an idle session discovered during input handling
    async fn expire(&self, chat_id: i64, cell: &mut Option<Session>) -> String {
        info!(chat_id = chat_id, "Session expired mid-conversation");
        cell.take();
        self.store.discard(chat_id).await;
        prompts::SESSION_EXPIRED.to_string()
    }

    /// Turn a transition outcome into the reply, dispatching and tearing
    /// the session down when the wizard finished.
    async fn conclude(
        &self,
        chat_id: i64,
        cell: &mut Option<Session>,
        outcome: Result<StepOutcome>,
    ) -> String {
        match outcome {
            Ok(StepOutcome::Advanced { prompt }) | Ok(StepOutcome::Rejected { prompt }) => {
                if let Some(session) = cell.as_mut() {
                    session.touch(self.session_ttl);
                }
                prompt
            }
            Ok(StepOutcome::Ready { campaign }) => {
                cell.take();
                info!(
                    chat_id = chat_id,
                    recipients = campaign.recipient_count(),
                    "Wizard complete; dispatching campaign"
                );
                let reply = self.run_dispatch(&campaign).await;
                self.store.discard(chat_id).await;
                reply
            }
            Err(e) => {
                error!(
                    chat_id = chat_id,
                    error = %e,
                    severity = %e.severity(),
                    "Wizard transition failed; destroying session"
                );
                cell.take();
                self.store.discard(chat_id).await;
                prompts::WIZARD_FAILED.to_string()
            }
        }
    }

    async fn run_dispatch(&self, campaign: &Campaign) -> String {
        match self.variant {
            TerminalVariant::SingleWithAttachment => {
                let outcome = self.dispatcher.dispatch_single(campaign).await;
                if outcome.sent {
                    prompts::SINGLE_SENT.to_string()
                } else {
                    prompts::single_failed(outcome.error.as_deref().unwrap_or("unknown error"))
                }
            }
            TerminalVariant::BulkRecipients => {
                let report = self.dispatcher.dispatch_bulk(campaign).await;
                if report.all_sent() {
                    prompts::bulk_sent(report.sent_count())
                } else {
                    match self.dispatcher.policy() {
                        DispatchPolicy::AbortOnFirstFailure => prompts::bulk_aborted(
                            report.sent_count(),
                            campaign.recipient_count(),
                            report.first_error().unwrap_or("unknown error"),
                        ),
                        DispatchPolicy::ContinueOnError => {
                            prompts::bulk_partial(report.sent_count(), report.failed_count())
                        }
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for ConversationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationEngine")
            .field("variant", &self.variant)
            .field("max_recipients", &self.max_recipients)
            .finish_non_exhaustive()
    }
}
