//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};
use crate::mail::dispatch::DispatchPolicy;
use crate::state::session::TerminalVariant;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub smtp: SmtpConfig,
    pub access: AccessConfig,
    pub campaign: CampaignConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
}

/// SMTP relay configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub timeout_seconds: u64,
}

/// Access gate configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessConfig {
    pub codes: Vec<String>,
}

/// Campaign wizard configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CampaignConfig {
    pub terminal_variant: TerminalVariant,
    pub dispatch_policy: DispatchPolicy,
    pub max_recipients: usize,
    pub session_ttl_minutes: i64,
    pub sweep_interval_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("MAILBUDDY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::MailBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            smtp: SmtpConfig {
                host: "smtp.gmail.com".to_string(),
                port: 587,
                username: String::new(),
                password: String::new(),
                timeout_seconds: 30,
            },
            access: AccessConfig { codes: vec![] },
            campaign: CampaignConfig {
                terminal_variant: TerminalVariant::SingleWithAttachment,
                dispatch_policy: DispatchPolicy::AbortOnFirstFailure,
                max_recipients: 1000,
                session_ttl_minutes: 30,
                sweep_interval_seconds: 300,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "./logs".to_string(),
            },
        }
    }
}
