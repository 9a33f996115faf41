//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{MailBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_smtp_config(&settings.smtp)?;
    validate_access_config(&settings.access)?;
    validate_campaign_config(&settings.campaign)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(MailBuddyError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate SMTP relay configuration
fn validate_smtp_config(config: &super::SmtpConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(MailBuddyError::Config(
            "SMTP host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(MailBuddyError::Config(
            "SMTP port must be greater than 0".to_string()
        ));
    }

    if config.username.is_empty() || config.password.is_empty() {
        return Err(MailBuddyError::Config(
            "SMTP credentials are required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(MailBuddyError::Config(
            "SMTP timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate access gate configuration
fn validate_access_config(config: &super::AccessConfig) -> Result<()> {
    if config.codes.is_empty() {
        return Err(MailBuddyError::Config(
            "At least one access code must be configured".to_string()
        ));
    }

    if config.codes.iter().any(|code| code.is_empty()) {
        return Err(MailBuddyError::Config(
            "Access codes cannot be empty".to_string()
        ));
    }

    Ok(())
}

/// Validate campaign wizard configuration
fn validate_campaign_config(config: &super::CampaignConfig) -> Result<()> {
    if config.max_recipients == 0 {
        return Err(MailBuddyError::Config(
            "Max recipients must be greater than 0".to_string()
        ));
    }

    if config.session_ttl_minutes <= 0 {
        return Err(MailBuddyError::Config(
            "Session TTL must be greater than 0".to_string()
        ));
    }

    if config.sweep_interval_seconds == 0 {
        return Err(MailBuddyError::Config(
            "Sweep interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(MailBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(MailBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "123456:TEST".to_string();
        settings.smtp.username = "relay-user".to_string();
        settings.smtp.password = "relay-pass".to_string();
        settings.access.codes = vec!["code-1".to_string()];
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_default_settings_fail_on_missing_token() {
        let result = validate_settings(&Settings::default());
        assert!(matches!(result, Err(MailBuddyError::Config(msg)) if msg.contains("token")));
    }

    #[test]
    fn test_empty_access_code_rejected() {
        let mut settings = valid_settings();
        settings.access.codes.push(String::new());
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_zero_smtp_timeout_rejected() {
        let mut settings = valid_settings();
        settings.smtp.timeout_seconds = 0;
        assert!(validate_settings(&settings).is_err());
    }
}
