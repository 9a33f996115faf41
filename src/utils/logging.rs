//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the MailBuddy application.

use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard owns the background log writer; keep it alive for the
/// lifetime of the process or file output stops flushing.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "mailbuddy.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log received bot commands with structured data
pub fn log_command(chat_id: i64, command: &str) {
    info!(
        chat_id = chat_id,
        command = command,
        "Command received"
    );
}

/// Log per-recipient relay results
pub fn log_relay_result(recipient: &str, success: bool, detail: Option<&str>) {
    if success {
        info!(
            recipient = recipient,
            "Message accepted by relay"
        );
    } else {
        error!(
            recipient = recipient,
            detail = detail,
            "Message rejected by relay"
        );
    }
}
