//! State management module
//!
//! This module handles per-chat wizard sessions and their storage

pub mod session;
pub mod store;

// Re-export commonly used state components
pub use session::{Campaign, ResolvedAttachment, Session, SessionState, TerminalVariant};
pub use store::{SessionSlot, SessionStore, SessionSweeper};
