use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use photo_flow_domain::{AssetId, Feature, FeatureKind, ResultHandle};

use crate::{
    ApplicationError, ControlPresenter, EventPublisher, ImageSurface, RemoteOperationClient,
    UploadSource, WorkflowEvent,
};

#[derive(Default)]
struct RemoteState {
    next_id: AtomicUsize,
    uploads: Mutex<Vec<UploadSource>>,
    removals: Mutex<Vec<AssetId>>,
    composites: Mutex<Vec<(AssetId, AssetId)>>,
    unreachable: AtomicBool,
    probe_errors: AtomicBool,
    upload_errors: AtomicBool,
    removal_errors: AtomicBool,
    composite_errors: AtomicBool,
    yield_in_removals: AtomicBool,
    locations: Mutex<Vec<String>>,
    location_override: Mutex<Option<String>>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeRemote {
    state: Arc<RemoteState>,
}

impl FakeRemote {
    fn next_id(&self) -> usize {
        self.state.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn location(&self, prefix: &str) -> String {
        let location = match self.state.location_override.lock().clone() {
            Some(location) => location,
            None => format!("https://cdn.example/results/{prefix}-{}", self.next_id()),
        };
        self.state.locations.lock().push(location.clone());
        location
    }

    pub(crate) fn set_reachable(&self, reachable: bool) {
        self.state.unreachable.store(!reachable, Ordering::SeqCst);
    }

    pub(crate) fn fail_probes(&self, fail: bool) {
        self.state.probe_errors.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_uploads(&self, fail: bool) {
        self.state.upload_errors.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_removals(&self, fail: bool) {
        self.state.removal_errors.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_composites(&self, fail: bool) {
        self.state.composite_errors.store(fail, Ordering::SeqCst);
    }

    /// Makes every removal hand control back to the runtime once before it
    /// produces its location, so concurrent callers interleave.
    pub(crate) fn yield_in_removals(&self, enabled: bool) {
        self.state.yield_in_removals.store(enabled, Ordering::SeqCst);
    }

    /// Every location handed out, in the order the remote produced them.
    pub(crate) fn locations(&self) -> Vec<String> {
        self.state.locations.lock().clone()
    }

    pub(crate) fn override_locations(&self, location: &str) {
        *self.state.location_override.lock() = Some(location.to_string());
    }

    pub(crate) fn uploads(&self) -> Vec<UploadSource> {
        self.state.uploads.lock().clone()
    }

    pub(crate) fn upload_count(&self) -> usize {
        self.state.uploads.lock().len()
    }

    pub(crate) fn removal_count(&self) -> usize {
        self.state.removals.lock().len()
    }

    pub(crate) fn composite_count(&self) -> usize {
        self.state.composites.lock().len()
    }
}

#[async_trait]
impl RemoteOperationClient for FakeRemote {
    async fn upload(&self, source: UploadSource) -> Result<AssetId, ApplicationError> {
        if self.state.upload_errors.load(Ordering::SeqCst) {
            return Err(ApplicationError::UploadFailed("status 503".to_string()));
        }
        self.state.uploads.lock().push(source);
        Ok(AssetId::new(format!("up-{}", self.next_id()))?)
    }

    async fn remove_background(&self, asset: &AssetId) -> Result<String, ApplicationError> {
        if self.state.removal_errors.load(Ordering::SeqCst) {
            return Err(ApplicationError::RemoteOperationFailed(
                "status 500".to_string(),
            ));
        }
        if self.state.yield_in_removals.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
        self.state.removals.lock().push(asset.clone());
        Ok(self.location("fg"))
    }

    async fn change_background(
        &self,
        foreground: &AssetId,
        background: &AssetId,
    ) -> Result<String, ApplicationError> {
        if self.state.composite_errors.load(Ordering::SeqCst) {
            return Err(ApplicationError::RemoteOperationFailed(
                "status 502".to_string(),
            ));
        }
        self.state
            .composites
            .lock()
            .push((foreground.clone(), background.clone()));
        Ok(self.location("cb"))
    }

    async fn probe(&self, _result_url: &str) -> Result<bool, ApplicationError> {
        if self.state.probe_errors.load(Ordering::SeqCst) {
            return Err(ApplicationError::RemoteOperationFailed(
                "connection reset".to_string(),
            ));
        }
        Ok(!self.state.unreachable.load(Ordering::SeqCst))
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingEvents {
    events: Arc<Mutex<Vec<WorkflowEvent>>>,
}

impl RecordingEvents {
    pub(crate) fn take(&self) -> Vec<WorkflowEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventPublisher for RecordingEvents {
    fn publish(&self, event: WorkflowEvent) {
        self.events.lock().push(event);
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeControls {
    built: Arc<Mutex<Vec<FeatureKind>>>,
    fail_next: Arc<AtomicBool>,
}

impl FakeControls {
    pub(crate) fn built(&self) -> Vec<FeatureKind> {
        self.built.lock().clone()
    }

    /// The next build attempt fails; later ones succeed again.
    pub(crate) fn fail_next_build(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl ControlPresenter for FakeControls {
    fn build_control(&self, feature: &Feature) -> Result<(), ApplicationError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ApplicationError::Presentation(format!(
                "no room for {} controls",
                feature.kind()
            )));
        }
        self.built.lock().push(feature.kind());
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SurfaceState {
    pub(crate) initial: String,
    pub(crate) source: String,
    pub(crate) shown: Option<String>,
    pub(crate) filter: String,
}

#[derive(Clone, Default)]
pub(crate) struct FakeSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl FakeSurface {
    pub(crate) fn with_source(url: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(SurfaceState {
                initial: url.to_string(),
                source: url.to_string(),
                ..SurfaceState::default()
            })),
        }
    }

    pub(crate) fn state(&self) -> SurfaceState {
        self.state.lock().clone()
    }

    /// Simulates the page swapping the image without telling the engine.
    pub(crate) fn swap_source_externally(&self, url: &str) {
        self.state.lock().source = url.to_string();
    }
}

impl ImageSurface for FakeSurface {
    fn source_url(&self) -> String {
        self.state.lock().source.clone()
    }

    fn replace_source(&self, url: &str) {
        let mut state = self.state.lock();
        state.source = url.to_string();
        state.shown = None;
    }

    fn restore_initial(&self) {
        let mut state = self.state.lock();
        state.source = state.initial.clone();
        state.shown = None;
    }

    fn show_result(&self, handle: &ResultHandle) {
        self.state.lock().shown = Some(handle.result_url.clone());
    }

    fn apply_filter(&self, filter: &str) {
        self.state.lock().filter = filter.to_string();
    }

    fn clear_filter(&self) {
        self.state.lock().filter.clear();
    }
}
