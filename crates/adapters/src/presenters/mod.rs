use std::sync::Arc;

use parking_lot::Mutex;
use photo_flow_application::{ApplicationError, ControlPresenter, WorkflowEvent};
use photo_flow_domain::{Feature, FeatureKind, Session};
use tracing::info;

pub fn present_feature_row(index: usize, feature: &Feature) -> String {
    format!("{}\t{}\t{}", index, feature.kind(), feature.label())
}

pub fn present_control(feature: &Feature) -> String {
    match feature {
        Feature::RemoveBackground(config) => format!("[{}]", config.label),
        Feature::ChangeBackground(config) => format!(
            "[{}] {} background option(s)",
            config.label,
            config.backgrounds.len()
        ),
        Feature::Adjust(config) => {
            let sliders: Vec<String> = config
                .sliders
                .iter()
                .map(|slider| {
                    let (min, max) = slider.kind.range();
                    format!(
                        "{} {}..{} (neutral {})",
                        slider.label,
                        min,
                        max,
                        slider.kind.neutral_value()
                    )
                })
                .collect();
            format!("[{}] {}", config.label, sliders.join(", "))
        }
    }
}

pub fn present_event(event: &WorkflowEvent) -> String {
    match event {
        WorkflowEvent::BusyStart => "busy".to_string(),
        WorkflowEvent::BusyEnd => "idle".to_string(),
        WorkflowEvent::ResultChanged { feature, handle } => format!(
            "{} result {} at {}",
            feature, handle.asset_id, handle.result_url
        ),
        WorkflowEvent::OperationFailed { reason } => format!("failed: {reason}"),
        WorkflowEvent::RefreshRequested => "refresh requested".to_string(),
        WorkflowEvent::FeatureExposed { retired, exposed } => match retired {
            Some(retired) => format!("showing {exposed} (was {retired})"),
            None => format!("showing {exposed}"),
        },
        WorkflowEvent::FilterChanged { filter } => format!("filter {filter}"),
    }
}

pub fn present_session(session: &Session) -> String {
    let present = session.present();
    let foreground = present
        .remove_bg()
        .map(|entry| entry.handle.asset_id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let shown = session
        .prelude()
        .asset_id()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string());
    let filter = session.prelude().adjustments().css_filter();
    format!(
        "foreground={} composites={} shown={} filter={}",
        foreground,
        present.change_bg_len(),
        shown,
        if filter.is_empty() { "none" } else { filter.as_str() }
    )
}

/// Builds controls by describing them in the log. Keeps the built kinds
/// for inspection.
#[derive(Debug, Clone, Default)]
pub struct LoggingControlPresenter {
    built: Arc<Mutex<Vec<FeatureKind>>>,
}

impl LoggingControlPresenter {
    pub fn built(&self) -> Vec<FeatureKind> {
        self.built.lock().clone()
    }
}

impl ControlPresenter for LoggingControlPresenter {
    fn build_control(&self, feature: &Feature) -> Result<(), ApplicationError> {
        if let Feature::Adjust(config) = feature {
            if config.sliders.is_empty() {
                return Err(ApplicationError::Presentation(
                    "adjust control needs at least one slider".to_string(),
                ));
            }
        }
        info!(feature = %feature.kind(), control = %present_control(feature), "control built");
        self.built.lock().push(feature.kind());
        Ok(())
    }
}
