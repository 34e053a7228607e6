use std::sync::Arc;

use parking_lot::Mutex;
use photo_flow_application::ImageSurface;
use photo_flow_domain::ResultHandle;
use tracing::debug;

/// What a headless surface currently displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    pub initial_url: String,
    pub source_url: String,
    /// Result currently shown in place of the source, if any.
    pub result_url: Option<String>,
    pub filter: String,
}

impl SurfaceSnapshot {
    pub fn displayed_url(&self) -> &str {
        self.result_url.as_deref().unwrap_or(&self.source_url)
    }
}

/// [`ImageSurface`] that keeps its state in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemorySurface {
    state: Arc<Mutex<SurfaceSnapshot>>,
}

impl InMemorySurface {
    pub fn new(initial_url: impl Into<String>) -> Self {
        let initial_url = initial_url.into();
        Self {
            state: Arc::new(Mutex::new(SurfaceSnapshot {
                source_url: initial_url.clone(),
                initial_url,
                ..SurfaceSnapshot::default()
            })),
        }
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        self.state.lock().clone()
    }
}

impl ImageSurface for InMemorySurface {
    fn source_url(&self) -> String {
        self.state.lock().source_url.clone()
    }

    fn replace_source(&self, url: &str) {
        let mut state = self.state.lock();
        state.source_url = url.to_string();
        state.result_url = None;
        debug!(source = url, "surface source replaced");
    }

    fn restore_initial(&self) {
        let mut state = self.state.lock();
        state.source_url = state.initial_url.clone();
        state.result_url = None;
    }

    fn show_result(&self, handle: &ResultHandle) {
        self.state.lock().result_url = Some(handle.result_url.clone());
        debug!(result = %handle.result_url, "surface showing result");
    }

    fn apply_filter(&self, filter: &str) {
        self.state.lock().filter = filter.to_string();
    }

    fn clear_filter(&self) {
        self.state.lock().filter.clear();
    }
}
