use anyhow::{Context, Result};
use photo_flow_application::{
    AdjustCommand, AdvanceFeatureCommand, ChangeBackgroundCommand, CommitAdjustmentsCommand,
    RemoveBackgroundCommand, SessionSnapshotQuery, WorkflowService,
};
use photo_flow_domain::{AdjustmentKind, AdjustmentStack, FeatureKind, Session};
use tracing::info;

/// Inputs for one unattended pass over the configured features.
#[derive(Debug, Clone, Default)]
pub struct RunPlan {
    pub background: Option<String>,
    pub hue: Option<f32>,
    pub saturation: Option<f32>,
}

impl RunPlan {
    pub fn adjustments(&self) -> Vec<(AdjustmentKind, f32)> {
        [
            (AdjustmentKind::Hue, self.hue),
            (AdjustmentKind::Saturation, self.saturation),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|value| (kind, value)))
        .collect()
    }

    pub fn adjustment_stack(&self) -> Result<AdjustmentStack> {
        let mut stack = AdjustmentStack::new();
        for (kind, value) in self.adjustments() {
            stack
                .set(kind, value)
                .with_context(|| format!("invalid {kind} value"))?;
        }
        Ok(stack)
    }
}

/// Exposes each feature in turn and runs it, moving on once it produced its
/// result.
pub async fn drive(service: &WorkflowService, plan: &RunPlan) -> Result<Session> {
    let mut step = service.advance_feature(AdvanceFeatureCommand)?;
    while let Some(transition) = step {
        match transition.exposed {
            FeatureKind::RemoveBackground => {
                service.remove_background(RemoveBackgroundCommand).await?;
            }
            FeatureKind::ChangeBackground => {
                service
                    .change_background(ChangeBackgroundCommand {
                        background_url: plan.background.clone(),
                    })
                    .await?;
            }
            FeatureKind::Adjust => {
                for (kind, value) in plan.adjustments() {
                    service.adjust(AdjustCommand { kind, value })?;
                }
                service.commit_adjustments(CommitAdjustmentsCommand);
            }
        }
        info!(feature = %transition.exposed, "feature done");
        step = service.advance_feature(AdvanceFeatureCommand)?;
    }
    Ok(service.session(SessionSnapshotQuery))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use photo_flow_adapters::{InMemorySurface, LoggingControlPresenter};
    use photo_flow_application::{
        ApplicationError, EventPublisher, RemoteOperationClient, UploadSource, WorkflowEvent,
    };
    use photo_flow_domain::{
        AdjustConfig, AssetId, ChangeBackgroundConfig, Feature, RemoveBackgroundConfig,
    };

    use super::*;

    #[derive(Default)]
    struct StubRemote {
        next_id: AtomicUsize,
    }

    impl StubRemote {
        fn location(&self, prefix: &str) -> String {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            format!("https://cdn.example/results/{prefix}-{id}")
        }
    }

    #[async_trait]
    impl RemoteOperationClient for StubRemote {
        async fn upload(&self, _source: UploadSource) -> Result<AssetId, ApplicationError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(AssetId::new(format!("up-{id}"))?)
        }

        async fn remove_background(&self, _asset: &AssetId) -> Result<String, ApplicationError> {
            Ok(self.location("fg"))
        }

        async fn change_background(
            &self,
            _foreground: &AssetId,
            _background: &AssetId,
        ) -> Result<String, ApplicationError> {
            Ok(self.location("cb"))
        }

        async fn probe(&self, _result_url: &str) -> Result<bool, ApplicationError> {
            Ok(true)
        }
    }

    #[derive(Clone, Default)]
    struct CollectedEvents(Arc<Mutex<Vec<WorkflowEvent>>>);

    impl EventPublisher for CollectedEvents {
        fn publish(&self, event: WorkflowEvent) {
            self.0.lock().push(event);
        }
    }

    fn service(events: CollectedEvents) -> WorkflowService {
        WorkflowService::new(
            vec![
                Feature::RemoveBackground(RemoveBackgroundConfig::default()),
                Feature::ChangeBackground(ChangeBackgroundConfig {
                    backgrounds: vec!["https://assets.example/bg/sky.png".to_string()],
                    ..ChangeBackgroundConfig::default()
                }),
                Feature::Adjust(AdjustConfig::default()),
            ],
            Box::new(StubRemote::default()),
            Box::new(events),
            Box::new(LoggingControlPresenter::default()),
            Box::new(InMemorySurface::new("https://page.example/cat.jpg")),
        )
    }

    #[tokio::test]
    async fn drives_every_feature_once() {
        let events = CollectedEvents::default();
        let service = service(events.clone());
        let plan = RunPlan {
            hue: Some(45.0),
            ..RunPlan::default()
        };

        let session = drive(&service, &plan).await.expect("drive");

        assert_eq!(session.present().active_index(), Some(2));
        assert!(session.present().remove_bg().is_some());
        assert_eq!(session.present().change_bg_len(), 1);
        assert_eq!(
            session.present().adjustments().get(&AdjustmentKind::Hue),
            Some(&45.0)
        );
        let results = events
            .0
            .lock()
            .iter()
            .filter(|event| matches!(event, WorkflowEvent::ResultChanged { .. }))
            .count();
        assert_eq!(results, 2);
    }

    #[tokio::test]
    async fn out_of_range_adjustment_stops_the_run() {
        let service = service(CollectedEvents::default());
        let plan = RunPlan {
            saturation: Some(400.0),
            ..RunPlan::default()
        };

        assert!(drive(&service, &plan).await.is_err());
        assert!(service
            .session(SessionSnapshotQuery)
            .present()
            .adjustments()
            .is_empty());
    }

    #[test]
    fn plan_builds_stack_in_filter_order() {
        let plan = RunPlan {
            hue: Some(-30.0),
            saturation: Some(150.0),
            ..RunPlan::default()
        };
        let stack = plan.adjustment_stack().expect("stack");
        assert_eq!(stack.css_filter(), "hue-rotate(-30deg) saturate(150%)");
    }
}
