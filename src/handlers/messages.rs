//! Message handlers
//!
//! Routes non-command messages into the wizard: text goes through the
//! transition table, documents through attachment handling, and anything
//! else gets the current step's reminder. Group chat noise is ignored.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::debug;

use crate::conversation::{ConversationEngine, FileReference};
use crate::utils::errors::Result;

/// Handle an incoming non-command message
pub async fn handle_message(bot: Bot, msg: Message, engine: Arc<ConversationEngine>) -> Result<()> {
    let chat_id = msg.chat.id;

    // The wizard only runs in private chats.
    if !chat_id.is_user() {
        debug!(chat_id = ?chat_id, "Ignoring group message");
        return Ok(());
    }

    let reply = if let Some(document) = msg.document() {
        let reference = FileReference {
            token: document.file.id.clone(),
            name: document.file_name.clone(),
        };
        engine.handle_document(chat_id.0, reference).await
    } else if let Some(text) = msg.text() {
        engine.handle_text(chat_id.0, text).await
    } else {
        engine.handle_unsupported(chat_id.0).await
    };

    bot.send_message(chat_id, reply).await?;

    Ok(())
}
