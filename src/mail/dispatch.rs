//! Campaign dispatch engine
//!
//! Fans a completed campaign out to its recipients, one fully assembled
//! message per address, in list order. Failure handling is a pluggable
//! policy; the stock policy stops the run at the first failed send and
//! leaves the remaining recipients untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::mail::composer;
use crate::mail::transport::MailTransport;
use crate::state::session::Campaign;
use crate::utils::errors::DispatchResult;
use crate::utils::logging::log_relay_result;

/// What to do with the rest of the list after a failed send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Stop at the first failure; remaining recipients are not attempted
    AbortOnFirstFailure,
    /// Record the failure and keep sending
    ContinueOnError,
}

/// Per-recipient delivery result
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub recipient: String,
    pub sent: bool,
    pub error: Option<String>,
}

impl DispatchOutcome {
    fn delivered(recipient: String) -> Self {
        Self {
            recipient,
            sent: true,
            error: None,
        }
    }

    fn failed(recipient: String, detail: String) -> Self {
        Self {
            recipient,
            sent: false,
            error: Some(detail),
        }
    }
}

/// Ordered record of one dispatch run. Covers only attempted recipients;
/// under the abort policy that can be a prefix of the campaign list.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    pub fn sent_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.sent).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.sent).count()
    }

    pub fn all_sent(&self) -> bool {
        self.failed_count() == 0
    }

    /// Detail of the first failed send, if any
    pub fn first_error(&self) -> Option<&str> {
        self.outcomes
            .iter()
            .find(|o| !o.sent)
            .and_then(|o| o.error.as_deref())
    }
}

/// Sends campaign messages through the relay seam
#[derive(Clone)]
pub struct DispatchEngine {
    transport: Arc<dyn MailTransport>,
    policy: DispatchPolicy,
}

impl DispatchEngine {
    pub fn new(transport: Arc<dyn MailTransport>, policy: DispatchPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Send the single-variant campaign to its one recipient
    pub async fn dispatch_single(&self, campaign: &Campaign) -> DispatchOutcome {
        let dispatch_id = Uuid::new_v4();
        let recipient = campaign.reply_to.clone();
        info!(
            dispatch_id = %dispatch_id,
            recipient = %recipient,
            has_attachment = campaign.attachment.is_some(),
            "Dispatching single campaign message"
        );

        let outcome = match self.send_one(campaign, &recipient).await {
            Ok(()) => DispatchOutcome::delivered(recipient),
            Err(e) => DispatchOutcome::failed(recipient, e.to_string()),
        };
        log_relay_result(&outcome.recipient, outcome.sent, outcome.error.as_deref());
        outcome
    }

    /// Send the bulk-variant campaign to each recipient in order
    pub async fn dispatch_bulk(&self, campaign: &Campaign) -> DispatchReport {
        let dispatch_id = Uuid::new_v4();
        let total = campaign.recipient_count();
        info!(
            dispatch_id = %dispatch_id,
            recipients = total,
            policy = ?self.policy,
            "Dispatching bulk campaign"
        );

        let mut report = DispatchReport::default();
        for recipient in &campaign.recipients {
            match self.send_one(campaign, recipient).await {
                Ok(()) => {
                    log_relay_result(recipient, true, None);
                    report.outcomes.push(DispatchOutcome::delivered(recipient.clone()));
                }
                Err(e) => {
                    let detail = e.to_string();
                    log_relay_result(recipient, false, Some(&detail));
                    report
                        .outcomes
                        .push(DispatchOutcome::failed(recipient.clone(), detail));

                    if self.policy == DispatchPolicy::AbortOnFirstFailure {
                        warn!(
                            dispatch_id = %dispatch_id,
                            attempted = report.outcomes.len(),
                            total = total,
                            "Aborting bulk dispatch after first failure"
                        );
                        break;
                    }
                }
            }
        }

        info!(
            dispatch_id = %dispatch_id,
            sent = report.sent_count(),
            failed = report.failed_count(),
            total = total,
            "Bulk dispatch finished"
        );
        report
    }

    /// Compose and relay one message off the async runtime threads
    async fn send_one(&self, campaign: &Campaign, recipient: &str) -> DispatchResult<()> {
        let message = composer::compose(campaign, recipient)?;
        let transport = Arc::clone(&self.transport);
        tokio::task::spawn_blocking(move || transport.deliver(&message)).await?
    }
}

impl std::fmt::Debug for DispatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchEngine")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
