use crate::app_config::{AppConfig, Environment, RegionEndpointsConfig};
use crate::checkout::BankTransferDetails;
use crate::ConfigError;

const DEFAULT_REGIONS_PRIMARY_URL: &str = "https://provinces.open-api.vn";
const DEFAULT_REGIONS_FALLBACK_URL: &str = "https://esgoo.net";
const DEFAULT_USER_AGENT: &str = "cementlife/0.1 (storefront)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = optional("DATABASE_URL");
    let env = parse_environment(&or_default("CEMENTLIFE_ENV", "development"))?;
    let log_level = or_default("CEMENTLIFE_LOG_LEVEL", "info");
    let catalog_path = optional("CEMENTLIFE_CATALOG_PATH").map(PathBuf::from);

    let db_max_connections = parse_u32("CEMENTLIFE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("CEMENTLIFE_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "CEMENTLIFE_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs = parse_u64("CEMENTLIFE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let regions = RegionEndpointsConfig {
        primary_url: or_default("CEMENTLIFE_REGIONS_PRIMARY_URL", DEFAULT_REGIONS_PRIMARY_URL),
        fallback_url: or_default(
            "CEMENTLIFE_REGIONS_FALLBACK_URL",
            DEFAULT_REGIONS_FALLBACK_URL,
        ),
        timeout_secs: parse_u64("CEMENTLIFE_REGIONS_TIMEOUT_SECS", "10")?,
    };
    let user_agent = or_default("CEMENTLIFE_USER_AGENT", DEFAULT_USER_AGENT);

    let bank_transfer = match (
        optional("CEMENTLIFE_BANK_NAME"),
        optional("CEMENTLIFE_BANK_ACCOUNT_NUMBER"),
        optional("CEMENTLIFE_BANK_ACCOUNT_HOLDER"),
    ) {
        (Some(bank_name), Some(account_number), Some(account_holder)) => {
            Some(BankTransferDetails {
                bank_name,
                account_number,
                account_holder,
            })
        }
        (None, None, None) => None,
        _ => {
            return Err(ConfigError::InvalidEnvVar {
                var: "CEMENTLIFE_BANK_NAME".to_string(),
                reason: "bank name, account number and account holder must be set together"
                    .to_string(),
            })
        }
    };

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        catalog_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        regions,
        user_agent,
        bank_transfer,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CEMENTLIFE_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
