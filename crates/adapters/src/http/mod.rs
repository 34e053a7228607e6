mod config;
mod wire;

use std::time::Duration;

use async_trait::async_trait;
use photo_flow_application::{ApplicationError, RemoteOperationClient, UploadSource};
use photo_flow_domain::AssetId;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use tracing::debug;

pub use config::RemoteServiceConfig;
use wire::{
    AssetRef, ChangeBackgroundRequest, CompositeMetadata, OperationResponse,
    RemoveBackgroundRequest, UploadResponse, UrlUploadRequest,
};

const USER_AGENT: &str = concat!("photo-flow/", env!("CARGO_PKG_VERSION"));

/// [`RemoteOperationClient`] speaking JSON over HTTP.
pub struct HttpRemoteClient {
    http: reqwest::Client,
    config: RemoteServiceConfig,
}

impl HttpRemoteClient {
    pub fn new(config: RemoteServiceConfig) -> Result<Self, ApplicationError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| ApplicationError::InvalidInput(error.to_string()))?;
        Ok(Self { http, config })
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let request = self
            .http
            .post(self.config.url_for(path))
            .header("x-api-key", &self.config.api_key);
        match &self.config.access_token {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        }
    }

    async fn run_operation(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<String, ApplicationError> {
        let response = request
            .send()
            .await
            .map_err(|error| ApplicationError::RemoteOperationFailed(error.to_string()))?;
        let response = success_or(response, ApplicationError::RemoteOperationFailed)?;
        let body: OperationResponse = response
            .json()
            .await
            .map_err(|error| ApplicationError::RemoteOperationFailed(error.to_string()))?;
        debug!(path, output = %body.output_url, "remote operation finished");
        Ok(body.output_url)
    }
}

#[async_trait]
impl RemoteOperationClient for HttpRemoteClient {
    async fn upload(&self, source: UploadSource) -> Result<AssetId, ApplicationError> {
        let request = self.post(&self.config.upload_path);
        let request = match &source {
            UploadSource::Url(url) => request.json(&UrlUploadRequest {
                surface_id: &self.config.surface_id,
                url,
            }),
            UploadSource::Bytes { data, content_type } => request
                .header(CONTENT_TYPE, content_type.as_str())
                .body(data.clone()),
        };

        let response = request
            .send()
            .await
            .map_err(|error| ApplicationError::UploadFailed(error.to_string()))?;
        let response = success_or(response, ApplicationError::UploadFailed)?;
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|error| ApplicationError::UploadFailed(error.to_string()))?;
        debug!(asset = %body.id, "asset uploaded");
        Ok(AssetId::new(body.id)?)
    }

    async fn remove_background(&self, asset: &AssetId) -> Result<String, ApplicationError> {
        let path = &self.config.remove_background_path;
        let request = self.post(path).json(&RemoveBackgroundRequest {
            surface_id: &self.config.surface_id,
            assets: [AssetRef {
                id: asset.as_str(),
            }],
        });
        self.run_operation(path, request).await
    }

    async fn change_background(
        &self,
        foreground: &AssetId,
        background: &AssetId,
    ) -> Result<String, ApplicationError> {
        let path = &self.config.change_background_path;
        let request = self.post(path).json(&ChangeBackgroundRequest {
            assets: [
                AssetRef {
                    id: foreground.as_str(),
                },
                AssetRef {
                    id: background.as_str(),
                },
            ],
            metadata: CompositeMetadata {
                foreground_image_id: foreground.as_str(),
                background_image_id: background.as_str(),
            },
        });
        self.run_operation(path, request).await
    }

    async fn probe(&self, result_url: &str) -> Result<bool, ApplicationError> {
        let response = self
            .http
            .head(result_url)
            .send()
            .await
            .map_err(|error| ApplicationError::RemoteOperationFailed(error.to_string()))?;
        Ok(response.status().is_success())
    }
}

fn success_or(
    response: Response,
    error: fn(String) -> ApplicationError,
) -> Result<Response, ApplicationError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(error(format!("status {status}")))
    }
}
