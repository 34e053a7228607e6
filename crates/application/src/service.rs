use std::future::Future;

use parking_lot::Mutex;
use photo_flow_domain::{
    Feature, FeatureKind, FeatureSequencer, ResultHandle, Session, Transition,
};
use tracing::{debug, info, warn};

use crate::{
    AdjustCommand, AdvanceFeatureCommand, ApplicationError, AssetTransformCache,
    ChangeBackgroundCommand, CommitAdjustmentsCommand, ControlPresenter, EventPublisher,
    ImageSurface, RefreshCommand, RemoteOperationClient, RemoveBackgroundCommand,
    ResetSessionCommand, SessionSnapshotQuery, SourceUploadedCommand, WorkflowEvent,
};

/// Entry point for the presentation layer. Owns the session of one widget.
///
/// Lock order is sequencer before session. Neither lock is held across an
/// `.await`.
pub struct WorkflowService {
    remote: Box<dyn RemoteOperationClient>,
    events: Box<dyn EventPublisher>,
    controls: Box<dyn ControlPresenter>,
    surface: Box<dyn ImageSurface>,
    sequencer: Mutex<FeatureSequencer>,
    session: Mutex<Session>,
}

impl WorkflowService {
    pub fn new(
        features: Vec<Feature>,
        remote: Box<dyn RemoteOperationClient>,
        events: Box<dyn EventPublisher>,
        controls: Box<dyn ControlPresenter>,
        surface: Box<dyn ImageSurface>,
    ) -> Self {
        Self {
            remote,
            events,
            controls,
            surface,
            sequencer: Mutex::new(FeatureSequencer::new(features)),
            session: Mutex::new(Session::new()),
        }
    }

    pub fn features(&self) -> Vec<Feature> {
        self.sequencer.lock().features().to_vec()
    }

    pub fn session(&self, _query: SessionSnapshotQuery) -> Session {
        self.session.lock().clone()
    }

    pub fn advance_feature(
        &self,
        _command: AdvanceFeatureCommand,
    ) -> Result<Option<Transition>, ApplicationError> {
        let step = {
            let mut sequencer = self.sequencer.lock();
            let mut session = self.session.lock();
            sequencer
                .advance(&mut session)
                .map(|transition| (transition, sequencer.features()[transition.index].clone()))
        };
        match step {
            Some((transition, feature)) => {
                self.expose(transition, &feature)?;
                Ok(Some(transition))
            }
            None => {
                debug!("last feature already active");
                Ok(None)
            }
        }
    }

    /// Clears every committed and live value and starts over at the first
    /// feature.
    pub fn reset_session(
        &self,
        _command: ResetSessionCommand,
    ) -> Result<Option<Transition>, ApplicationError> {
        let step = {
            let mut sequencer = self.sequencer.lock();
            let mut session = self.session.lock();
            sequencer
                .restart(&mut session)
                .map(|transition| (transition, sequencer.features()[transition.index].clone()))
        };
        self.surface.clear_filter();
        info!("session reset");
        self.expose_step(step)
    }

    /// Restart button: back to the initial image and the first feature.
    /// Committed results survive so returning to them is a cache hit.
    pub fn request_refresh(
        &self,
        _command: RefreshCommand,
    ) -> Result<Option<Transition>, ApplicationError> {
        self.events.publish(WorkflowEvent::RefreshRequested);
        let step = {
            let mut sequencer = self.sequencer.lock();
            let mut session = self.session.lock();
            session.clear_live_adjustments();
            sequencer
                .reset(&mut session)
                .map(|transition| (transition, sequencer.features()[transition.index].clone()))
        };
        self.surface.restore_initial();
        self.surface.clear_filter();
        self.expose_step(step)
    }

    /// A new source image replaced the old one. With more than one feature
    /// enabled, background removal starts right away.
    pub async fn source_uploaded(
        &self,
        command: SourceUploadedCommand,
    ) -> Result<Option<ResultHandle>, ApplicationError> {
        self.surface.replace_source(&command.source_url);
        self.reset_session(ResetSessionCommand)?;
        if self.sequencer.lock().len() <= 1 {
            return Ok(None);
        }
        self.remove_background(RemoveBackgroundCommand)
            .await
            .map(Some)
    }

    pub async fn remove_background(
        &self,
        _command: RemoveBackgroundCommand,
    ) -> Result<ResultHandle, ApplicationError> {
        let source_url = self.surface.source_url();
        self.run_remote(FeatureKind::RemoveBackground, async {
            AssetTransformCache::new(self.remote.as_ref())
                .remove_background(&self.session, &source_url)
                .await
                .map(|lookup| lookup.into_handle())
        })
        .await
    }

    pub async fn change_background(
        &self,
        command: ChangeBackgroundCommand,
    ) -> Result<ResultHandle, ApplicationError> {
        let source_url = self.surface.source_url();
        self.run_remote(FeatureKind::ChangeBackground, async {
            let background_url = self.resolve_background(command.background_url)?;
            AssetTransformCache::new(self.remote.as_ref())
                .change_background(&self.session, &source_url, &background_url)
                .await
                .map(|lookup| lookup.into_handle())
        })
        .await
    }

    /// Moves a slider. The value only lands in the live stack.
    pub fn adjust(&self, command: AdjustCommand) -> Result<String, ApplicationError> {
        let filter = self
            .session
            .lock()
            .touch_adjustment(command.kind, command.value)?;
        self.surface.apply_filter(&filter);
        self.events.publish(WorkflowEvent::FilterChanged {
            filter: filter.clone(),
        });
        Ok(filter)
    }

    pub fn commit_adjustments(&self, _command: CommitAdjustmentsCommand) {
        let mut session = self.session.lock();
        session.commit_adjustments();
        debug!(
            adjustments = session.present().adjustments().len(),
            "adjustments committed"
        );
    }

    fn resolve_background(&self, requested: Option<String>) -> Result<String, ApplicationError> {
        if let Some(url) = requested {
            return Ok(url);
        }
        let sequencer = self.sequencer.lock();
        match sequencer.find(FeatureKind::ChangeBackground) {
            Some(Feature::ChangeBackground(config)) => config
                .default_background()
                .map(str::to_string)
                .ok_or_else(|| {
                    ApplicationError::InvalidInput("no background options configured".to_string())
                }),
            _ => Err(ApplicationError::InvalidInput(
                "change background is not enabled".to_string(),
            )),
        }
    }

    /// Brackets a remote-call-bearing operation with busy signals and turns
    /// its failure into a single `OperationFailed` event.
    async fn run_remote<F>(
        &self,
        feature: FeatureKind,
        operation: F,
    ) -> Result<ResultHandle, ApplicationError>
    where
        F: Future<Output = Result<ResultHandle, ApplicationError>>,
    {
        self.events.publish(WorkflowEvent::BusyStart);
        let outcome = operation.await;
        match &outcome {
            Ok(handle) => {
                self.surface.show_result(handle);
                self.session.lock().show_asset(handle.asset_id.clone());
                info!(%feature, asset = %handle.asset_id, "result ready");
                self.events.publish(WorkflowEvent::ResultChanged {
                    feature,
                    handle: handle.clone(),
                });
            }
            Err(error) => {
                warn!(%feature, %error, "operation failed");
                self.events.publish(WorkflowEvent::OperationFailed {
                    reason: error.to_string(),
                });
            }
        }
        self.events.publish(WorkflowEvent::BusyEnd);
        outcome
    }

    fn expose_step(
        &self,
        step: Option<(Transition, Feature)>,
    ) -> Result<Option<Transition>, ApplicationError> {
        match step {
            Some((transition, feature)) => {
                self.expose(transition, &feature)?;
                Ok(Some(transition))
            }
            None => Ok(None),
        }
    }

    fn expose(&self, transition: Transition, feature: &Feature) -> Result<(), ApplicationError> {
        if transition.first_exposure {
            self.controls.build_control(feature)?;
            self.sequencer.lock().mark_constructed(transition.exposed);
        } else if transition.exposed == FeatureKind::Adjust {
            self.surface.clear_filter();
        }

        info!(
            index = transition.index,
            feature = %transition.exposed,
            "feature exposed"
        );
        if transition.is_swap() {
            self.events.publish(WorkflowEvent::FeatureExposed {
                retired: transition.retired,
                exposed: transition.exposed,
            });
        }
        Ok(())
    }
}
