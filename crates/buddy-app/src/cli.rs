//! CLI argument definitions for the Learning Buddy terminal client.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use buddy_core::config::BuddyConfig;

/// Learning Buddy: chat with your learning assistant from the terminal.
#[derive(Parser, Debug)]
#[command(name = "buddy", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Base URL of the learning backend.
    #[arg(short = 'u', long = "api-url")]
    pub api_url: Option<String>,

    /// Account email to chat as.
    #[arg(short = 'e', long = "email")]
    pub email: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Message sent automatically once the chat opens.
    #[arg(short = 'm', long = "message")]
    pub message: Option<String>,

    /// Ask for a summary of your learning progress when the chat opens.
    #[arg(long = "summarize", conflicts_with = "message")]
    pub summarize: bool,

    /// Write the resolved settings back to the configuration file.
    #[arg(long = "save-config")]
    pub save_config: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > BUDDY_CONFIG env var > ~/.learning-buddy/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("BUDDY_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the backend base URL.
    ///
    /// Priority: --api-url flag > BUDDY_API_URL env var > config file value.
    pub fn resolve_api_url(&self, config_url: &str) -> String {
        pick(
            self.api_url.as_deref(),
            std::env::var("BUDDY_API_URL").ok(),
            config_url,
        )
    }

    /// Resolve the account email.
    ///
    /// Priority: --email flag > BUDDY_EMAIL env var > config file value.
    pub fn resolve_email(&self, config_email: &str) -> String {
        pick(
            self.email.as_deref(),
            std::env::var("BUDDY_EMAIL").ok(),
            config_email,
        )
    }

    /// Apply flag and env overrides on top of a loaded configuration.
    pub fn apply(&self, config: &mut BuddyConfig) {
        config.general.log_level = self.resolve_log_level(&config.general.log_level);
        config.api.base_url = self.resolve_api_url(&config.api.base_url);
        config.user.default_email = self.resolve_email(&config.user.default_email);
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        pick(self.log_level.as_deref(), None, config_level)
    }
}

fn pick(flag: Option<&str>, env: Option<String>, config: &str) -> String {
    flag.map(str::to_string)
        .or_else(|| env.filter(|v| !v.is_empty()))
        .unwrap_or_else(|| config.to_string())
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home)
            .join(".learning-buddy")
            .join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".learning-buddy")
            .join("config.toml");
    }
    PathBuf::from("config.toml")
}
