//! MailBuddy Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use teloxide::utils::command::BotCommands as TeloxideBotCommands;
use tracing::{error, info, warn};

use MailBuddy::{
    access::AccessGate,
    config::Settings,
    conversation::ConversationEngine,
    handlers::{
        commands::{handle_cancel, handle_help, handle_start},
        files::TelegramFileResolver,
        messages::handle_message,
    },
    mail::{DispatchEngine, SmtpRelayTransport},
    state::{SessionStore, SessionSweeper},
    utils::errors::ErrorSeverity,
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer alive
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", MailBuddy::info());

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Wire up the wizard
    let gate = AccessGate::new(settings.access.codes.clone());
    info!(codes = gate.len(), "Access gate loaded");

    let store = SessionStore::new();
    let transport = Arc::new(SmtpRelayTransport::new(settings.smtp.clone()));
    let dispatch_engine = DispatchEngine::new(transport, settings.campaign.dispatch_policy);
    let resolver = Arc::new(TelegramFileResolver::new(bot.clone()));
    let engine = Arc::new(ConversationEngine::new(
        store.clone(),
        gate,
        dispatch_engine,
        resolver,
        &settings.campaign,
    ));

    info!(
        variant = ?settings.campaign.terminal_variant,
        policy = ?settings.campaign.dispatch_policy,
        max_recipients = settings.campaign.max_recipients,
        "Campaign wizard configured"
    );

    // Start the idle-session sweeper
    let sweep_interval = std::time::Duration::from_secs(settings.campaign.sweep_interval_seconds);
    let mut sweeper = SessionSweeper::new(store, sweep_interval);
    sweeper.start();

    info!("Setting up bot handlers...");
    let handler = create_handler();

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("MailBuddy is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("MailBuddy has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry().branch(
        Update::filter_message()
            .branch(
                // Handle commands
                dptree::entry()
                    .filter_command::<BotCommands>()
                    .endpoint(handle_commands),
            )
            .branch(
                // Handle wizard input
                dptree::endpoint(handle_messages),
            ),
    )
}

#[derive(TeloxideBotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "MailBuddy Bot Commands")]
enum BotCommands {
    #[command(description = "Start a new email campaign")]
    Start,
    #[command(description = "Cancel the campaign in progress")]
    Cancel,
    #[command(description = "Show help information")]
    Help,
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: BotCommands,
    engine: Arc<ConversationEngine>,
) -> HandlerResult {
    let result = match cmd {
        BotCommands::Start => handle_start(bot, msg, engine).await,
        BotCommands::Cancel => handle_cancel(bot, msg, engine).await,
        BotCommands::Help => handle_help(bot, msg).await,
    };

    if let Err(e) = result {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, engine: Arc<ConversationEngine>) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, engine).await {
        match e.severity() {
            ErrorSeverity::Info | ErrorSeverity::Warning => {
                warn!(error = %e, severity = %e.severity(), "Error handling message")
            }
            _ => error!(error = %e, severity = %e.severity(), "Error handling message"),
        }
        if !e.is_recoverable() {
            return Err(e.into());
        }
    }

    Ok(())
}
