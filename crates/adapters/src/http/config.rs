use serde::{Deserialize, Serialize};

/// Where the remote image service lives and how to authenticate with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteServiceConfig {
    pub api_endpoint: String,
    pub api_key: String,
    /// Sent verbatim as the `Authorization` header when present.
    pub access_token: Option<String>,
    pub surface_id: String,
    pub upload_path: String,
    pub remove_background_path: String,
    pub change_background_path: String,
    pub timeout_secs: u64,
}

impl RemoteServiceConfig {
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for RemoteServiceConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "http://127.0.0.1:8080/api/v1".to_string(),
            api_key: String::new(),
            access_token: None,
            surface_id: "photo-flow".to_string(),
            upload_path: "asset".to_string(),
            remove_background_path: "providers/remove-background".to_string(),
            change_background_path: "providers/change-background".to_string(),
            timeout_secs: 30,
        }
    }
}
