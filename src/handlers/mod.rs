//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Message handlers for wizard text and document input
//! - The Telegram-backed attachment resolver

pub mod commands;
pub mod files;
pub mod messages;

// Re-export commonly used handler functions
pub use commands::*;
pub use files::*;
pub use messages::*;
