use bytes::Bytes;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::error::AppError;

const GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SiteResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DriveList {
    value: Vec<Drive>,
}

#[derive(Debug, Deserialize)]
struct Drive {
    id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DriveItem {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct ChildrenResponse {
    value: Vec<DriveItem>,
}

/// Thin Microsoft Graph client holding a client-credentials bearer token.
/// Token acquisition failure is fatal for the whole run; every other call
/// surfaces a Transport error the driver may skip past per file.
pub struct GraphClient {
    http: Client,
    access_token: String,
}

impl GraphClient {
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let http = Client::new();
        let token_url = format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/token",
            config.tenant_id
        );
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("scope", "https://graph.microsoft.com/.default"),
        ];

        let response = http
            .post(&token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Auth(format!("Failed to request access token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Auth(format!(
                "Could not obtain access token. Status: {}, body: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Auth(format!("Malformed token response: {}", e)))?;

        Ok(Self {
            http,
            access_token: token.access_token,
        })
    }

    pub async fn site_id(
        &self,
        hostname: &str,
        site_relative_path: &str,
    ) -> Result<String, AppError> {
        let url = format!("{}/sites/{}:{}", GRAPH_BASE, hostname, site_relative_path);
        let site: SiteResponse = self.get_json(&url, "site ID").await?;
        Ok(site.id)
    }

    pub async fn drive_id(&self, site_id: &str) -> Result<String, AppError> {
        let url = format!("{}/sites/{}/drives", GRAPH_BASE, site_id);
        let drives: DriveList = self.get_json(&url, "drive ID").await?;
        drives
            .value
            .into_iter()
            .next()
            .map(|drive| drive.id)
            .ok_or_else(|| AppError::Transport("Site has no document drives".to_string()))
    }

    /// Children of a drive folder, in the order the API returned them.
    pub async fn list_children(
        &self,
        drive_id: &str,
        folder_path: &str,
    ) -> Result<Vec<DriveItem>, AppError> {
        let url = format!(
            "{}/drives/{}/root:/{}:/children",
            GRAPH_BASE, drive_id, folder_path
        );
        let children: ChildrenResponse = self.get_json(&url, "folder listing").await?;
        Ok(children.value)
    }

    pub async fn download_item(
        &self,
        drive_id: &str,
        item_id: &str,
    ) -> Result<Bytes, AppError> {
        let url = format!("{}/drives/{}/items/{}/content", GRAPH_BASE, drive_id, item_id);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to download file: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Transport(format!(
                "Failed to download file. Status: {}",
                response.status()
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read file bytes: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to fetch {}: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Transport(format!(
                "Error fetching {}: {} {}",
                what, status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("Malformed {} response: {}", what, e)))
    }
}
