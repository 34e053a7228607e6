mod adjustment;
mod asset;
mod error;
mod feature;
mod sequencer;
mod session;

pub use adjustment::{AdjustmentKind, AdjustmentStack};
pub use asset::{normalize_asset_url, AssetId, BackgroundKey, ResultHandle, SourceIdentity};
pub use error::DomainError;
pub use feature::{
    AdjustConfig, ChangeBackgroundConfig, Feature, FeatureKind, RemoveBackgroundConfig,
    SliderConfig,
};
pub use sequencer::{FeatureSequencer, Transition};
pub use session::{PreludeState, PresentState, RemoveBgEntry, Session};
