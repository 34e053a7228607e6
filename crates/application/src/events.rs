use photo_flow_domain::{FeatureKind, ResultHandle};
use serde::Serialize;

/// Signals published to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkflowEvent {
    BusyStart,
    BusyEnd,
    ResultChanged {
        feature: FeatureKind,
        handle: ResultHandle,
    },
    OperationFailed {
        reason: String,
    },
    RefreshRequested,
    /// Retire the panel of `retired` (if any) and show the one of `exposed`.
    FeatureExposed {
        retired: Option<FeatureKind>,
        exposed: FeatureKind,
    },
    FilterChanged {
        filter: String,
    },
}

impl WorkflowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BusyStart => "busy_start",
            Self::BusyEnd => "busy_end",
            Self::ResultChanged { .. } => "result_changed",
            Self::OperationFailed { .. } => "operation_failed",
            Self::RefreshRequested => "refresh_requested",
            Self::FeatureExposed { .. } => "feature_exposed",
            Self::FilterChanged { .. } => "filter_changed",
        }
    }
}
