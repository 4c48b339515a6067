mod file_config;

pub use file_config::FileConfig;

use crate::auth::PermissionTable;
use crate::server::RequestsLoggingLevel;
use anyhow::Result;
use clap::ValueEnum;
use std::collections::HashMap;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
}

#[derive(Debug)]
pub struct AppConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub permission_table: PermissionTable,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let raw_keys = file.api_keys.unwrap_or_else(builtin_api_keys);
        let permission_table = PermissionTable::from_entries(raw_keys)?;

        Ok(Self {
            port,
            logging_level,
            permission_table,
        })
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

/// Demo permission table used when the config file carries no `[api_keys]`.
fn builtin_api_keys() -> HashMap<String, Vec<String>> {
    let mut keys = HashMap::new();
    keys.insert(
        "my-super-secret-token-1".to_string(),
        vec!["/books".to_string()],
    );
    keys.insert(
        "my-super-secret-token-2".to_string(),
        vec!["/books/{id}".to_string()],
    );
    keys.insert("another-valid-key".to_string(), vec!["*".to_string()]);
    keys
}
