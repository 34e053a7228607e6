use async_trait::async_trait;
use photo_flow_domain::{AssetId, Feature, ResultHandle};

use crate::{ApplicationError, WorkflowEvent};

/// Content handed to the remote service for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    Url(String),
    Bytes {
        data: Vec<u8>,
        content_type: String,
    },
}

/// Remote image-processing service. Result locations are urls whose last
/// path segment names the produced asset.
#[async_trait]
pub trait RemoteOperationClient: Send + Sync {
    async fn upload(&self, source: UploadSource) -> Result<AssetId, ApplicationError>;

    async fn remove_background(&self, asset: &AssetId) -> Result<String, ApplicationError>;

    async fn change_background(
        &self,
        foreground: &AssetId,
        background: &AssetId,
    ) -> Result<String, ApplicationError>;

    /// Whether a previously returned result url can still be fetched.
    async fn probe(&self, result_url: &str) -> Result<bool, ApplicationError>;
}

pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: WorkflowEvent);
}

/// Builds the visual control of a feature. Called once per feature kind.
pub trait ControlPresenter: Send + Sync {
    fn build_control(&self, feature: &Feature) -> Result<(), ApplicationError>;
}

/// The on-screen image the workflow edits.
pub trait ImageSurface: Send + Sync {
    /// Url of the image being edited, which changes on upload.
    fn source_url(&self) -> String;

    fn replace_source(&self, url: &str);

    /// Puts back the image the surface was created with.
    fn restore_initial(&self);

    fn show_result(&self, handle: &ResultHandle);

    fn apply_filter(&self, filter: &str);

    fn clear_filter(&self);
}
