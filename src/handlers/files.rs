//! Telegram attachment resolver
//!
//! Resolves a document reference into bytes through the Bot API: look
//! the file up to learn its download path, then stream it into memory.
//! Attachments ride inside the campaign message, so nothing touches disk.

use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use tracing::debug;

use crate::conversation::resolver::{AttachmentResolver, FileReference};
use crate::state::session::ResolvedAttachment;
use crate::utils::errors::ResolveResult;

/// Fallback filename for attachments Telegram reports without a name
const UNNAMED_ATTACHMENT: &str = "attachment";

/// Bot API backed attachment resolver
#[derive(Debug, Clone)]
pub struct TelegramFileResolver {
    bot: Bot,
}

impl TelegramFileResolver {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl AttachmentResolver for TelegramFileResolver {
    async fn resolve(&self, reference: &FileReference) -> ResolveResult<ResolvedAttachment> {
        let file = self.bot.get_file(reference.token.clone()).await?;
        debug!(
            path = %file.path,
            size = file.meta.size,
            "Downloading attachment from Telegram"
        );

        let mut content = Vec::with_capacity(file.meta.size as usize);
        self.bot.download_file(&file.path, &mut content).await?;

        let filename = reference
            .name
            .clone()
            .unwrap_or_else(|| UNNAMED_ATTACHMENT.to_string());

        Ok(ResolvedAttachment { filename, content })
    }
}
