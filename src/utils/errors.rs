//! Error handling for MailBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for MailBuddy application
#[derive(Error, Debug)]
pub enum MailBuddyError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Attachment error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Incomplete session for chat {chat_id}: missing {field}")]
    IncompleteSession { chat_id: i64, field: &'static str },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning a Telegram file reference into attachment bytes
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("file lookup failed: {0}")]
    Lookup(#[from] teloxide::RequestError),

    #[error("file download failed: {0}")]
    Download(#[from] teloxide::DownloadError),
}

/// Errors raised while composing or relaying a campaign message
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("invalid attachment content type: {0}")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),

    #[error("failed to assemble message: {0}")]
    Compose(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("relay rejected message: {0}")]
    Rejected(String),

    #[error("relay worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Result type alias for MailBuddy operations
pub type Result<T> = std::result::Result<T, MailBuddyError>;

/// Result type alias for attachment resolution
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

/// Result type alias for dispatch operations
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;

impl MailBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            MailBuddyError::Telegram(_) => true,
            MailBuddyError::Resolve(_) => true,
            MailBuddyError::Dispatch(_) => false,
            MailBuddyError::Config(_) => false,
            MailBuddyError::IncompleteSession { .. } => false,
            MailBuddyError::InvalidInput(_) => true,
            MailBuddyError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MailBuddyError::Config(_) => ErrorSeverity::Critical,
            MailBuddyError::IncompleteSession { .. } => ErrorSeverity::Error,
            MailBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            MailBuddyError::Resolve(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
