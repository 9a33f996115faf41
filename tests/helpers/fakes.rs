//! Scripted stand-ins for the relay transport and attachment resolver

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lettre::Message;

use MailBuddy::conversation::resolver::{AttachmentResolver, FileReference};
use MailBuddy::mail::transport::MailTransport;
use MailBuddy::state::session::ResolvedAttachment;
use MailBuddy::utils::errors::{DispatchError, DispatchResult, ResolveError, ResolveResult};

/// One message the fake relay accepted
#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: String,
    pub rendered: String,
}

/// Relay fake that records accepted messages and fails on demand
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMail>>,
    fail_for: Vec<String>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Self::failing_for(&[])
    }

    pub fn failing_for(recipients: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_for: recipients.iter().map(|r| r.to_string()).collect(),
        })
    }

    /// Accepted messages, in delivery order
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Envelope recipients of accepted messages, in delivery order
    pub fn recipients(&self) -> Vec<String> {
        self.sent().into_iter().map(|mail| mail.recipient).collect()
    }
}

impl MailTransport for RecordingTransport {
    fn deliver(&self, message: &Message) -> DispatchResult<()> {
        let recipient = message.envelope().to()[0].to_string();
        if self.fail_for.contains(&recipient) {
            return Err(DispatchError::Rejected(format!(
                "mailbox {recipient} unavailable"
            )));
        }

        let rendered = String::from_utf8_lossy(&message.formatted()).into_owned();
        self.sent.lock().unwrap().push(SentMail { recipient, rendered });
        Ok(())
    }
}

/// Resolver fake returning a scripted attachment, or failing every call
pub struct StubResolver {
    attachment: Option<ResolvedAttachment>,
}

impl StubResolver {
    pub fn with_file(filename: &str, content: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            attachment: Some(ResolvedAttachment {
                filename: filename.to_string(),
                content: content.to_vec(),
            }),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { attachment: None })
    }
}

#[async_trait]
impl AttachmentResolver for StubResolver {
    async fn resolve(&self, reference: &FileReference) -> ResolveResult<ResolvedAttachment> {
        match &self.attachment {
            Some(attachment) => {
                let mut attachment = attachment.clone();
                if let Some(name) = &reference.name {
                    attachment.filename = name.clone();
                }
                Ok(attachment)
            }
            None => Err(ResolveError::Lookup(teloxide::RequestError::Api(
                teloxide::ApiError::Unknown("scripted resolver failure".to_string()),
            ))),
        }
    }
}
