mod cache;
mod error;
mod events;
mod ports;
mod service;
mod use_cases;

#[cfg(test)]
mod testing;

pub use cache::{AssetTransformCache, Lookup};
pub use error::ApplicationError;
pub use events::WorkflowEvent;
pub use ports::{ControlPresenter, EventPublisher, ImageSurface, RemoteOperationClient, UploadSource};
pub use service::WorkflowService;
pub use use_cases::{
    AdjustCommand, AdvanceFeatureCommand, ChangeBackgroundCommand, CommitAdjustmentsCommand,
    RefreshCommand, RemoveBackgroundCommand, ResetSessionCommand, SessionSnapshotQuery,
    SourceUploadedCommand,
};
