//! Command handlers
//!
//! Handles the /start, /cancel and /help commands. The wizard itself
//! lives in the conversation engine; these handlers gate commands to
//! private chats and relay the engine's reply.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::debug;

use crate::conversation::{prompts, ConversationEngine};
use crate::utils::errors::Result;
use crate::utils::logging::log_command;

/// Handle /start command, opening a fresh wizard session
pub async fn handle_start(bot: Bot, msg: Message, engine: Arc<ConversationEngine>) -> Result<()> {
    let chat_id = msg.chat.id;
    debug!(chat_id = ?chat_id, "Processing /start command");

    if !chat_id.is_user() {
        bot.send_message(chat_id, prompts::PRIVATE_ONLY).await?;
        return Ok(());
    }

    log_command(chat_id.0, "/start");
    let reply = engine.start_conversation(chat_id.0).await;
    bot.send_message(chat_id, reply).await?;

    Ok(())
}

/// Handle /cancel command, abandoning the wizard session
pub async fn handle_cancel(bot: Bot, msg: Message, engine: Arc<ConversationEngine>) -> Result<()> {
    let chat_id = msg.chat.id;
    debug!(chat_id = ?chat_id, "Processing /cancel command");

    if !chat_id.is_user() {
        bot.send_message(chat_id, prompts::PRIVATE_ONLY).await?;
        return Ok(());
    }

    log_command(chat_id.0, "/cancel");
    let reply = engine.cancel(chat_id.0).await;
    bot.send_message(chat_id, reply).await?;

    Ok(())
}

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    let chat_id = msg.chat.id;
    log_command(chat_id.0, "/help");

    bot.send_message(chat_id, prompts::HELP).await?;

    Ok(())
}
