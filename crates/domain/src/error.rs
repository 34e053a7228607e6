use thiserror::Error;

use crate::AdjustmentKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("asset id must not be empty")]
    EmptyAssetId,
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("result location {0:?} has no asset id segment")]
    MalformedResultLocation(String),
    #[error("adjustment {0} must be finite")]
    NonFiniteAdjustment(AdjustmentKind),
    #[error("adjustment {kind} value {value} outside {min}..={max}")]
    AdjustmentOutOfRange {
        kind: AdjustmentKind,
        value: f32,
        min: f32,
        max: f32,
    },
}
