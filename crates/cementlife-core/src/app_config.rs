use std::path::PathBuf;

use crate::checkout::BankTransferDetails;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Base URLs of the two region-lookup endpoint families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionEndpointsConfig {
    pub primary_url: String,
    pub fallback_url: String,
    pub timeout_secs: u64,
}

#[derive(Clone)]
pub struct AppConfig {
    /// Only commands that touch the order table need a database.
    pub database_url: Option<String>,
    pub env: Environment,
    pub log_level: String,
    /// `None` means the built-in catalog is used.
    pub catalog_path: Option<PathBuf>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub regions: RegionEndpointsConfig,
    pub user_agent: String,
    pub bank_transfer: Option<BankTransferDetails>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("catalog_path", &self.catalog_path)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("regions", &self.regions)
            .field("user_agent", &self.user_agent)
            .field(
                "bank_transfer",
                &self.bank_transfer.as_ref().map(|bank| {
                    format!("{} / {} / [redacted]", bank.bank_name, bank.account_holder)
                }),
            )
            .finish()
    }
}
