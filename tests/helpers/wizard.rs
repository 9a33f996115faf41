//! Builders that wire a conversation engine around the fakes

use std::sync::Arc;

use MailBuddy::access::AccessGate;
use MailBuddy::config::CampaignConfig;
use MailBuddy::conversation::ConversationEngine;
use MailBuddy::mail::dispatch::{DispatchEngine, DispatchPolicy};
use MailBuddy::state::session::TerminalVariant;
use MailBuddy::state::SessionStore;

use super::fakes::{RecordingTransport, StubResolver};

/// The one access code every test gate accepts
pub const TEST_CODE: &str = "serial-99";

pub fn campaign_config(variant: TerminalVariant, policy: DispatchPolicy) -> CampaignConfig {
    CampaignConfig {
        terminal_variant: variant,
        dispatch_policy: policy,
        max_recipients: 1000,
        session_ttl_minutes: 30,
        sweep_interval_seconds: 300,
    }
}

pub fn build_engine(
    variant: TerminalVariant,
    policy: DispatchPolicy,
    transport: Arc<RecordingTransport>,
    resolver: Arc<StubResolver>,
) -> ConversationEngine {
    build_engine_with_config(campaign_config(variant, policy), transport, resolver)
}

pub fn build_engine_with_config(
    config: CampaignConfig,
    transport: Arc<RecordingTransport>,
    resolver: Arc<StubResolver>,
) -> ConversationEngine {
    ConversationEngine::new(
        SessionStore::new(),
        AccessGate::new([TEST_CODE]),
        DispatchEngine::new(transport, config.dispatch_policy),
        resolver,
        &config,
    )
}

/// Drive a fresh session through the shared fields, stopping at the
/// terminal step
pub async fn drive_to_terminal(engine: &ConversationEngine, chat_id: i64) {
    engine.start_conversation(chat_id).await;
    let inputs = [
        TEST_CODE,
        "Ada Lovelace",
        "ada@example.com",
        "replies@example.com",
        "Monthly update",
        "<p>Hello subscribers</p>",
    ];
    for input in inputs {
        engine.handle_text(chat_id, input).await;
    }
}
