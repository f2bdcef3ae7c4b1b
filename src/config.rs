/// Application configuration
///
/// Read once at startup from `$CROWDFUND_CONFIG` or `~/.crowdfund/config.json`.
/// Every field has a default, so a missing file is not an error.

use crate::error::{CrowdfundError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "CROWDFUND_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Label printed after target amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins if set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Argon2 cost parameters used for new password hashes
    #[serde(default)]
    pub password_policy: PasswordPolicy,
}

/// Argon2 cost parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,

    #[serde(default = "default_iterations")]
    pub iterations: u32,

    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_currency() -> String {
    "EGP".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_memory_kib() -> u32 {
    argon2::Params::DEFAULT_M_COST
}

fn default_iterations() -> u32 {
    argon2::Params::DEFAULT_T_COST
}

fn default_parallelism() -> u32 {
    argon2::Params::DEFAULT_P_COST
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            log_level: default_log_level(),
            password_policy: PasswordPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Where the config file is looked up
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        dirs::home_dir().map(|home| home.join(".crowdfund").join("config.json"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file means defaults. A file that exists but can't be read
    /// or parsed is an error, so the caller can report it.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.currency.trim().is_empty() {
            return Err(CrowdfundError::Config("currency must not be empty".to_string()));
        }

        // argon2 rejects out-of-range costs; surface that as a config problem
        argon2::Params::new(
            self.password_policy.memory_kib,
            self.password_policy.iterations,
            self.password_policy.parallelism,
            None,
        )
        .map_err(|e| CrowdfundError::Config(format!("password_policy: {}", e)))?;

        Ok(())
    }
}
