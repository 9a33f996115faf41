//! Attachment resolution seam
//!
//! The wizard only ever sees a lightweight file reference from Telegram.
//! Turning that reference into bytes requires network calls, so the
//! capability sits behind a trait; the engine asks for resolution only
//! when the session is actually waiting for an attachment.

use async_trait::async_trait;

use crate::state::session::ResolvedAttachment;
use crate::utils::errors::ResolveResult;

/// Opaque handle to a file the user sent
#[derive(Debug, Clone)]
pub struct FileReference {
    /// Transport-level file identifier
    pub token: String,
    /// Original filename, when the transport knows it
    pub name: Option<String>,
}

/// Fetches attachment bytes for a file reference
#[async_trait]
pub trait AttachmentResolver: Send + Sync {
    async fn resolve(&self, reference: &FileReference) -> ResolveResult<ResolvedAttachment>;
}
