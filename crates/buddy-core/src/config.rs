use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the Learning Buddy client.
///
/// Loaded from `~/.learning-buddy/config.toml` by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuddyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub user: UserConfig,
}

impl BuddyConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BuddyConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the learning backend (no trailing slash required).
    pub base_url: String,
    /// Per-request timeout in seconds. 0 disables the timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 0,
        }
    }
}

/// Active user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Account email used when none is given on the command line.
    pub default_email: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            default_email: "dina.wijaya1@example.com".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuddyError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = BuddyConfig::default();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 0);
        assert_eq!(config.user.default_email, "dina.wijaya1@example.com");
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
[general]
log_level = "debug"

[api]
base_url = "https://buddy.example.com"
timeout_secs = 15

[user]
default_email = "budi@example.com"
"#;
        let file = create_temp_config(content);
        let config = BuddyConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.api.base_url, "https://buddy.example.com");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.user.default_email, "budi@example.com");
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let content = r#"
[api]
base_url = "http://10.0.0.2:9000"
"#;
        let file = create_temp_config(content);
        let config = BuddyConfig::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.api.timeout_secs, 0);
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.user.default_email, "dina.wijaya1@example.com");
    }

    #[test]
    fn test_load_invalid_toml_is_config_error() {
        let file = create_temp_config("[api\nbase_url = ");
        let err = BuddyConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, BuddyError::Config(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = BuddyConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = BuddyConfig::default();
        config.api.timeout_secs = 5;
        config.save(&path).unwrap();

        let reloaded = BuddyConfig::load(&path).unwrap();
        assert_eq!(reloaded.api.timeout_secs, 5);
        assert_eq!(reloaded.api.base_url, config.api.base_url);
        assert_eq!(reloaded.user.default_email, config.user.default_email);
    }
}
