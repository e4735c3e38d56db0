//! Client configuration: where the API lives and which receipts are accepted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "http://localhost:5678";
const DEFAULT_FILE_BASE_URL: &str = "http://localhost:5678/public";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the bills REST API
    pub api_base_url: String,
    /// Base URL under which uploaded receipts are served (in-memory store only)
    pub file_base_url: String,
    /// Receipt file extensions accepted by the new bill form, lowercase
    pub allowed_extensions: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            file_base_url: DEFAULT_FILE_BASE_URL.to_string(),
            allowed_extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
        }
    }
}

impl ClientConfig {
    /// Parse a JSON config document, filling unspecified keys with defaults
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let mut config: ClientConfig =
            serde_json::from_str(raw).context("Invalid client configuration")?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        config.file_base_url = config.file_base_url.trim_end_matches('/').to_string();
        config.allowed_extensions = config
            .allowed_extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        Ok(config)
    }

    /// Whether a file name carries one of the allowed extensions
    pub fn accepts_file_name(&self, file_name: &str) -> bool {
        let Some((stem, extension)) = file_name.rsplit_once('.') else {
            return false;
        };
        if stem.is_empty() {
            return false;
        }
        let extension = extension.to_ascii_lowercase();
        self.allowed_extensions.iter().any(|allowed| *allowed == extension)
    }
}
