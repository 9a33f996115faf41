//! Conversation module
//!
//! The campaign wizard: prompts, step transitions, attachment resolution
//! and the engine that ties them to the session store.

pub mod engine;
pub mod prompts;
pub mod resolver;
pub mod transition;

pub use engine::ConversationEngine;
pub use resolver::{AttachmentResolver, FileReference};
pub use transition::{StepOutcome, SKIP_TOKEN};
