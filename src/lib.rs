//! MailBuddy Telegram Bot
//!
//! A Telegram bot that walks operators through composing an email campaign
//! step by step, gated behind a serial access code, and dispatches the
//! finished campaign over SMTP. This library provides the wizard state
//! machine, session storage, message composition and the dispatch engine.

#![allow(non_snake_case)]

pub mod access;
pub mod config;
pub mod conversation;
pub mod handlers;
pub mod mail;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{MailBuddyError, Result};

// Re-export main components for easy access
pub use access::AccessGate;
pub use conversation::ConversationEngine;
pub use mail::{DispatchEngine, SmtpRelayTransport};
pub use state::{SessionStore, SessionSweeper};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
