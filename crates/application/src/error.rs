use photo_flow_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("remote operation failed: {0}")]
    RemoteOperationFailed(String),
    #[error("cached result is no longer reachable: {0}")]
    StaleReferenceProbeFailed(String),
    #[error("presentation error: {0}")]
    Presentation(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("io error: {0}")]
    Io(String),
}
