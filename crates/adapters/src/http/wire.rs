use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UrlUploadRequest<'a> {
    pub surface_id: &'a str,
    pub url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssetRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoveBackgroundRequest<'a> {
    pub surface_id: &'a str,
    pub assets: [AssetRef<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompositeMetadata<'a> {
    pub foreground_image_id: &'a str,
    pub background_image_id: &'a str,
}

/// Assets are ordered foreground first.
#[derive(Debug, Serialize)]
pub(crate) struct ChangeBackgroundRequest<'a> {
    pub assets: [AssetRef<'a>; 2],
    pub metadata: CompositeMetadata<'a>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OperationResponse {
    pub output_url: String,
}
