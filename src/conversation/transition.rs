//! Wizard step transitions
//!
//! Pure transition functions over the session state machine. Every user
//! input maps to exactly one outcome: the wizard advances, stays put with
//! a corrective prompt, or completes into a dispatchable campaign. No
//! I/O happens here; rejected input never mutates the session.

use crate::access::AccessGate;
use crate::state::session::{Campaign, ResolvedAttachment, Session, SessionState, TerminalVariant};
use crate::utils::errors::Result;

use super::prompts;

/// Terminal text input that finishes the single variant without a file
pub const SKIP_TOKEN: &str = "skip";

/// Result of feeding one input to the wizard
#[derive(Debug)]
pub enum StepOutcome {
    /// Input accepted; the wizard moved to the next step
    Advanced { prompt: String },
    /// Input rejected; the wizard stayed at the current step
    Rejected { prompt: String },
    /// All fields collected; the session projected into a campaign
    Ready { campaign: Campaign },
}

/// Shallow email shape check: an "@" and a "." anywhere in the text.
/// Deliverability is the relay's problem, not the wizard's.
pub fn looks_like_email(text: &str) -> bool {
    text.contains('@') && text.contains('.')
}

/// Split a raw recipient line on commas, trimming entries and dropping
/// empty ones. Order is preserved; duplicates are kept.
pub fn split_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Feed one text input to the session
pub fn apply_text(
    session: &mut Session,
    text: &str,
    gate: &AccessGate,
    max_recipients: usize,
) -> Result<StepOutcome> {
    let outcome = match session.state {
        SessionState::AwaitingCode => {
            if gate.validate(text) {
                session.state = SessionState::AwaitingFromName;
                advanced(prompts::ASK_FROM_NAME)
            } else {
                rejected(prompts::CODE_REJECTED)
            }
        }

        SessionState::AwaitingFromName => {
            if text.trim().is_empty() {
                rejected(prompts::EMPTY_FROM_NAME)
            } else {
                session.from_name = Some(text.to_string());
                session.state = SessionState::AwaitingFromEmail;
                advanced(prompts::ASK_FROM_EMAIL)
            }
        }

        SessionState::AwaitingFromEmail => {
            if looks_like_email(text) {
                session.from_email = Some(text.to_string());
                session.state = SessionState::AwaitingReplyTo;
                advanced(prompts::ASK_REPLY_TO)
            } else {
                rejected(prompts::INVALID_EMAIL)
            }
        }

        SessionState::AwaitingReplyTo => {
            if looks_like_email(text) {
                session.reply_to = Some(text.to_string());
                session.state = SessionState::AwaitingSubject;
                advanced(prompts::ASK_SUBJECT)
            } else {
                rejected(prompts::INVALID_EMAIL)
            }
        }

        SessionState::AwaitingSubject => {
            session.subject = Some(text.to_string());
            session.state = SessionState::AwaitingBody;
            advanced(prompts::ASK_BODY)
        }

        SessionState::AwaitingBody => {
            session.body_html = Some(text.to_string());
            session.state = SessionState::AwaitingTerminalInput;
            match session.variant {
                TerminalVariant::SingleWithAttachment => advanced(prompts::ASK_ATTACHMENT),
                TerminalVariant::BulkRecipients => advanced(prompts::ASK_RECIPIENTS),
            }
        }

        SessionState::AwaitingTerminalInput => match session.variant {
            TerminalVariant::SingleWithAttachment => {
                if text.trim().eq_ignore_ascii_case(SKIP_TOKEN) {
                    return Ok(StepOutcome::Ready {
                        campaign: session.build_campaign()?,
                    });
                }
                rejected(prompts::ATTACHMENT_OR_SKIP)
            }
            TerminalVariant::BulkRecipients => {
                let recipients = split_recipients(text);
                if recipients.is_empty() {
                    rejected(prompts::EMPTY_RECIPIENTS)
                } else if recipients.len() > max_recipients {
                    return Ok(StepOutcome::Rejected {
                        prompt: prompts::too_many_recipients(recipients.len(), max_recipients),
                    });
                } else {
                    session.recipients = recipients;
                    return Ok(StepOutcome::Ready {
                        campaign: session.build_campaign()?,
                    });
                }
            }
        },
    };

    Ok(outcome)
}

/// Feed a resolved document to the session. Only the single variant at
/// the terminal step accepts one; anywhere else the wizard re-prompts.
pub fn apply_document(session: &mut Session, attachment: ResolvedAttachment) -> Result<StepOutcome> {
    if session.state == SessionState::AwaitingTerminalInput
        && session.variant == TerminalVariant::SingleWithAttachment
    {
        session.attachment = Some(attachment);
        return Ok(StepOutcome::Ready {
            campaign: session.build_campaign()?,
        });
    }

    Ok(StepOutcome::Rejected {
        prompt: reprompt_for(session).to_string(),
    })
}

/// The current step's expected-input reminder
pub fn reprompt_for(session: &Session) -> &'static str {
    match session.state {
        SessionState::AwaitingCode => prompts::ASK_CODE,
        SessionState::AwaitingFromName => prompts::ASK_FROM_NAME,
        SessionState::AwaitingFromEmail => prompts::ASK_FROM_EMAIL,
        SessionState::AwaitingReplyTo => prompts::ASK_REPLY_TO,
        SessionState::AwaitingSubject => prompts::ASK_SUBJECT,
        SessionState::AwaitingBody => prompts::ASK_BODY,
        SessionState::AwaitingTerminalInput => match session.variant {
            TerminalVariant::SingleWithAttachment => prompts::ATTACHMENT_OR_SKIP,
            TerminalVariant::BulkRecipients => prompts::ASK_RECIPIENTS,
        },
    }
}

fn advanced(prompt: &str) -> StepOutcome {
    StepOutcome::Advanced {
        prompt: prompt.to_string(),
    }
}

fn rejected(prompt: &str) -> StepOutcome {
    StepOutcome::Rejected {
        prompt: prompt.to_string(),
    }
}
