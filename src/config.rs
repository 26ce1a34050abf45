use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Everything the driver needs, read once at startup. No module-level
/// globals; the struct is handed to the router state.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub client_id: String,
    pub tenant_id: String,
    pub client_secret: String,
    pub hostname: String,
    pub site_relative_path: String,
    pub folder_path: String,
    pub bind_addr: String,
    pub summary_sheet: String,
    pub key_column: String,
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let client_id = std::env::var("CLIENT_ID")
            .map_err(|e| anyhow::anyhow!("Failed to load CLIENT_ID: {}", e))?;
        let tenant_id = std::env::var("TENANT_ID")
            .map_err(|e| anyhow::anyhow!("Failed to load TENANT_ID: {}", e))?;
        let client_secret = std::env::var("CLIENT_SECRET")
            .map_err(|e| anyhow::anyhow!("Failed to load CLIENT_SECRET: {}", e))?;

        Ok(Config {
            client_id,
            tenant_id,
            client_secret,
            hostname: env_or("SHAREPOINT_HOSTNAME", "m365x50834976.sharepoint.com"),
            site_relative_path: env_or("SITE_RELATIVE_PATH", "/sites/100thYear"),
            folder_path: env_or("FOLDER_PATH", "data"),
            bind_addr: env_or("BIND_ADDR", "127.0.0.1:3000"),
            summary_sheet: env_or("SUMMARY_SHEET", "Summary"),
            key_column: env_or("KEY_COLUMN", "Month of Nivedan"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
