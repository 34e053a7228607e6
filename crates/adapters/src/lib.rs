pub mod events;
pub mod filter;
pub mod http;
pub mod presenters;
pub mod surface;

pub use events::BroadcastEventBus;
pub use filter::ImageFilterRenderer;
pub use http::{HttpRemoteClient, RemoteServiceConfig};
pub use presenters::{
    present_control, present_event, present_feature_row, present_session,
    LoggingControlPresenter,
};
pub use surface::{InMemorySurface, SurfaceSnapshot};
