use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use photo_flow_adapters::RemoteServiceConfig;
use photo_flow_domain::{
    AdjustConfig, ChangeBackgroundConfig, Feature, RemoveBackgroundConfig,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: RemoteServiceConfig,
    /// Enabled features in exposure order.
    pub features: Vec<Feature>,
    pub event_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: RemoteServiceConfig::default(),
            features: vec![
                Feature::RemoveBackground(RemoveBackgroundConfig::default()),
                Feature::ChangeBackground(ChangeBackgroundConfig::default()),
                Feature::Adjust(AdjustConfig::default()),
            ],
            event_capacity: 64,
        }
    }
}

impl AppConfig {
    /// Reads a TOML file, or falls back to the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn with_credentials(mut self, api_key: Option<String>, access_token: Option<String>) -> Self {
        if let Some(api_key) = api_key {
            self.service.api_key = api_key;
        }
        if access_token.is_some() {
            self.service.access_token = access_token;
        }
        self
    }
}
