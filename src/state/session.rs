//! Wizard session model
//!
//! This module defines the per-chat conversation session: the wizard state
//! machine position, the campaign fields collected so far, and the expiry
//! bookkeeping used by the store sweeper. A finished session is projected
//! into an immutable [`Campaign`] for dispatch.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::errors::{MailBuddyError, Result};

/// Wizard steps, in collection order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for a serial access code
    AwaitingCode,
    /// Waiting for the sender display name
    AwaitingFromName,
    /// Waiting for the sender email address
    AwaitingFromEmail,
    /// Waiting for the reply-to email address
    AwaitingReplyTo,
    /// Waiting for the subject line
    AwaitingSubject,
    /// Waiting for the HTML body
    AwaitingBody,
    /// Waiting for the variant-specific final input
    AwaitingTerminalInput,
}

/// Which final input the wizard collects before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalVariant {
    /// Optional file attachment; the message goes to the reply-to contact
    SingleWithAttachment,
    /// Comma-separated recipient list, one message per recipient
    BulkRecipients,
}

/// Attachment bytes fetched from Telegram, ready for composition
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedAttachment {
    pub filename: String,
    pub content: Vec<u8>,
}

impl std::fmt::Debug for ResolvedAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedAttachment")
            .field("filename", &self.filename)
            .field("content_len", &self.content.len())
            .finish()
    }
}

/// Per-chat conversation session
#[derive(Debug, Clone)]
pub struct Session {
    /// Chat this session belongs to
    pub chat_id: i64,
    /// Current wizard step
    pub state: SessionState,
    /// Terminal input variant this session collects
    pub variant: TerminalVariant,
    /// Sender display name
    pub from_name: Option<String>,
    /// Sender email address
    pub from_email: Option<String>,
    /// Reply-to email address
    pub reply_to: Option<String>,
    /// Subject line
    pub subject: Option<String>,
    /// HTML body
    pub body_html: Option<String>,
    /// Resolved attachment, single variant only
    pub attachment: Option<ResolvedAttachment>,
    /// Recipient list, bulk variant only
    pub recipients: Vec<String>,
    /// When this session was created
    pub created_at: DateTime<Utc>,
    /// When this session expires unless refreshed
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session at the access-code step
    pub fn new(chat_id: i64, variant: TerminalVariant, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            chat_id,
            state: SessionState::AwaitingCode,
            variant,
            from_name: None,
            from_email: None,
            reply_to: None,
            subject: None,
            body_html: None,
            attachment: None,
            recipients: Vec::new(),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Push the expiry forward; called on every processed input
    pub fn touch(&mut self, ttl: Duration) {
        self.expires_at = Utc::now() + ttl;
    }

    /// Check if the session has idled past its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Project the collected fields into a dispatchable campaign.
    ///
    /// Consumes the attachment and recipient list. Fails if a required
    /// field was never collected, which indicates a wizard bug rather
    /// than bad user input.
    pub fn build_campaign(&mut self) -> Result<Campaign> {
        fn take(slot: &mut Option<String>, chat_id: i64, field: &'static str) -> Result<String> {
            slot.take()
                .ok_or(MailBuddyError::IncompleteSession { chat_id, field })
        }

        let chat_id = self.chat_id;
        let from_name = take(&mut self.from_name, chat_id, "from_name")?;
        let from_email = take(&mut self.from_email, chat_id, "from_email")?;
        let reply_to = take(&mut self.reply_to, chat_id, "reply_to")?;
        let subject = take(&mut self.subject, chat_id, "subject")?;
        let body_html = take(&mut self.body_html, chat_id, "body_html")?;

        let (recipients, attachment) = match self.variant {
            // The single variant addresses the reply-to contact directly.
            TerminalVariant::SingleWithAttachment => {
                (vec![reply_to.clone()], self.attachment.take())
            }
            TerminalVariant::BulkRecipients => (std::mem::take(&mut self.recipients), None),
        };

        Ok(Campaign {
            from_name,
            from_email,
            reply_to,
            subject,
            body_html,
            recipients,
            attachment,
        })
    }
}

/// Immutable projection of a completed session
#[derive(Debug, Clone)]
pub struct Campaign {
    pub from_name: String,
    pub from_email: String,
    pub reply_to: String,
    pub subject: String,
    pub body_html: String,
    /// Delivery targets; exactly one entry for the single variant
    pub recipients: Vec<String>,
    pub attachment: Option<ResolvedAttachment>,
}

impl Campaign {
    /// Number of delivery targets
    pub fn recipient_count(&self) -> usize {
        self.recipients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_session(variant: TerminalVariant) -> Session {
        let mut session = Session::new(42, variant, Duration::minutes(30));
        session.state = SessionState::AwaitingTerminalInput;
        session.from_name = Some("Ada".to_string());
        session.from_email = Some("ada@example.com".to_string());
        session.reply_to = Some("replies@example.com".to_string());
        session.subject = Some("Hello".to_string());
        session.body_html = Some("<p>Hi</p>".to_string());
        session
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(42, TerminalVariant::SingleWithAttachment, Duration::minutes(30));
        assert_eq!(session.chat_id, 42);
        assert_eq!(session.state, SessionState::AwaitingCode);
        assert!(session.from_name.is_none());
        assert!(session.attachment.is_none());
        assert!(session.recipients.is_empty());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_expiry() {
        let mut session = Session::new(42, TerminalVariant::BulkRecipients, Duration::minutes(30));
        assert!(!session.is_expired());

        session.expires_at = Utc::now() - Duration::hours(1);
        assert!(session.is_expired());

        session.touch(Duration::minutes(30));
        assert!(!session.is_expired());
    }

    #[test]
    fn test_single_campaign_targets_reply_to() {
        let mut session = filled_session(TerminalVariant::SingleWithAttachment);
        session.attachment = Some(ResolvedAttachment {
            filename: "report.pdf".to_string(),
            content: vec![1, 2, 3],
        });

        let campaign = session.build_campaign().unwrap();
        assert_eq!(campaign.recipients, vec!["replies@example.com".to_string()]);
        assert_eq!(campaign.recipient_count(), 1);
        assert_eq!(campaign.attachment.unwrap().filename, "report.pdf");
        // The attachment moves out of the session on projection.
        assert!(session.attachment.is_none());
    }

    #[test]
    fn test_bulk_campaign_carries_recipients_in_order() {
        let mut session = filled_session(TerminalVariant::BulkRecipients);
        session.recipients = vec![
            "a@example.com".to_string(),
            "b@example.com".to_string(),
            "c@example.com".to_string(),
        ];

        let campaign = session.build_campaign().unwrap();
        assert_eq!(campaign.recipient_count(), 3);
        assert_eq!(campaign.recipients[0], "a@example.com");
        assert_eq!(campaign.recipients[2], "c@example.com");
        assert!(campaign.attachment.is_none());
    }

    #[test]
    fn test_incomplete_session_is_rejected() {
        let mut session = filled_session(TerminalVariant::SingleWithAttachment);
        session.subject = None;

        let err = session.build_campaign().unwrap_err();
        match err {
            MailBuddyError::IncompleteSession { chat_id, field } => {
                assert_eq!(chat_id, 42);
                assert_eq!(field, "subject");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
