use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::DomainError;

/// Opaque identifier the remote service assigns to an uploaded or derived asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::EmptyAssetId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AssetId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The (asset id, result url) pair produced by a successful remote transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultHandle {
    pub asset_id: AssetId,
    pub result_url: String,
}

impl ResultHandle {
    /// Builds a handle from a result location whose final path segment is the
    /// asset id, e.g. `https://cdn.example/results/abc123`.
    pub fn from_location(location: &str) -> Result<Self, DomainError> {
        let parsed = Url::parse(location).map_err(|error| DomainError::InvalidUrl {
            url: location.to_string(),
            reason: error.to_string(),
        })?;
        let segment = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| DomainError::MalformedResultLocation(location.to_string()))?;

        Ok(Self {
            asset_id: AssetId::new(segment)?,
            result_url: location.to_string(),
        })
    }
}

/// Normalized identity of the image being edited. Cache key for background
/// removal results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceIdentity(String);

impl SourceIdentity {
    pub fn from_url(raw: &str) -> Result<Self, DomainError> {
        // Object URLs have no stable path to strip; they identify themselves.
        if raw.starts_with("blob:") {
            return Ok(Self(raw.to_string()));
        }
        normalize_asset_url(raw).map(Self)
    }

    /// A displayed url still belongs to this identity while its normalized
    /// form extends it. Host case, default ports and query strings do not
    /// count as a different source.
    pub fn matches(&self, current_url: &str) -> bool {
        match Self::from_url(current_url) {
            Ok(current) => current.0.starts_with(&self.0),
            Err(_) => current_url.starts_with(&self.0),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SourceIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized identity of a background image used for compositing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BackgroundKey(String);

impl BackgroundKey {
    pub fn from_url(raw: &str) -> Result<Self, DomainError> {
        normalize_asset_url(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BackgroundKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduces a url to origin + path. Relative references keep their path and
/// lose query and fragment.
pub fn normalize_asset_url(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        Ok(mut parsed) => {
            let origin = parsed.origin();
            if origin.is_tuple() {
                return Ok(format!("{}{}", origin.ascii_serialization(), parsed.path()));
            }
            parsed.set_query(None);
            parsed.set_fragment(None);
            Ok(parsed.to_string())
        }
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = trimmed
                .split(|c| c == '?' || c == '#')
                .next()
                .unwrap_or_default();
            if path.is_empty() {
                return Err(DomainError::InvalidUrl {
                    url: raw.to_string(),
                    reason: "empty path".to_string(),
                });
            }
            Ok(path.to_string())
        }
        Err(error) => Err(DomainError::InvalidUrl {
            url: raw.to_string(),
            reason: error.to_string(),
        }),
    }
}
