use parking_lot::Mutex;
use photo_flow_domain::{BackgroundKey, RemoveBgEntry, ResultHandle, Session, SourceIdentity};
use tracing::{debug, info};

use crate::{ApplicationError, RemoteOperationClient, UploadSource};

/// Where a result came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Committed earlier and confirmed reachable.
    Hit(ResultHandle),
    /// Produced by the remote service during this call.
    Computed(ResultHandle),
}

impl Lookup {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    pub fn handle(&self) -> &ResultHandle {
        match self {
            Self::Hit(handle) | Self::Computed(handle) => handle,
        }
    }

    pub fn into_handle(self) -> ResultHandle {
        match self {
            Self::Hit(handle) | Self::Computed(handle) => handle,
        }
    }
}

struct Foreground {
    lookup: Lookup,
    /// Set when the removal was recomputed and still has to be committed.
    staged: Option<RemoveBgEntry>,
}

/// Memoizes remote transforms inside the session.
///
/// The session lock is only taken for reads and commits, never across a
/// remote call. Two concurrent misses for the same key both reach the remote
/// service and the later commit wins.
pub struct AssetTransformCache<'a> {
    remote: &'a dyn RemoteOperationClient,
}

impl<'a> AssetTransformCache<'a> {
    pub fn new(remote: &'a dyn RemoteOperationClient) -> Self {
        Self { remote }
    }

    pub async fn remove_background(
        &self,
        session: &Mutex<Session>,
        source_url: &str,
    ) -> Result<Lookup, ApplicationError> {
        let foreground = self.resolve_foreground(session, source_url).await?;
        if let Some(entry) = foreground.staged {
            info!(source = %entry.source, asset = %entry.handle.asset_id, "committed background removal");
            session.lock().commit_remove_background(entry);
        }
        Ok(foreground.lookup)
    }

    /// A cached composite is only trusted when the foreground it was built
    /// from came out of the cache as well. A recomputed foreground is only
    /// committed together with the composite built from it.
    pub async fn change_background(
        &self,
        session: &Mutex<Session>,
        source_url: &str,
        background_url: &str,
    ) -> Result<Lookup, ApplicationError> {
        let foreground = self.resolve_foreground(session, source_url).await?;
        let key = BackgroundKey::from_url(background_url)?;

        if foreground.lookup.is_hit() {
            let cached = session.lock().present().change_bg(&key).cloned();
            if let Some(handle) = cached {
                debug!(background = %key, asset = %handle.asset_id, "background change cache hit");
                return Ok(Lookup::Hit(handle));
            }
        }

        let background = self
            .remote
            .upload(UploadSource::Url(key.as_str().to_string()))
            .await?;
        let location = self
            .remote
            .change_background(&foreground.lookup.handle().asset_id, &background)
            .await?;
        let handle = parse_location(&location)?;

        {
            let mut session = session.lock();
            if let Some(entry) = foreground.staged {
                info!(source = %entry.source, asset = %entry.handle.asset_id, "committed background removal");
                session.commit_remove_background(entry);
            }
            session.commit_change_background(key.clone(), handle.clone());
        }
        info!(background = %key, asset = %handle.asset_id, "committed background change");
        Ok(Lookup::Computed(handle))
    }

    /// Finds or computes the foreground without committing it.
    async fn resolve_foreground(
        &self,
        session: &Mutex<Session>,
        source_url: &str,
    ) -> Result<Foreground, ApplicationError> {
        let cached = {
            let mut session = session.lock();
            session.invalidate_if_source_changed(source_url);
            session.present().remove_bg().cloned()
        };

        if let Some(entry) = cached {
            if self.is_reachable(&entry.handle).await {
                debug!(source = %entry.source, asset = %entry.handle.asset_id, "background removal cache hit");
                return Ok(Foreground {
                    lookup: Lookup::Hit(entry.handle),
                    staged: None,
                });
            }
        }

        let source = SourceIdentity::from_url(source_url)?;
        let asset = self
            .remote
            .upload(UploadSource::Url(source.as_str().to_string()))
            .await?;
        let location = self.remote.remove_background(&asset).await?;
        let handle = parse_location(&location)?;

        Ok(Foreground {
            lookup: Lookup::Computed(handle.clone()),
            staged: Some(RemoveBgEntry { source, handle }),
        })
    }

    async fn is_reachable(&self, handle: &ResultHandle) -> bool {
        let stale = match self.remote.probe(&handle.result_url).await {
            Ok(true) => return true,
            Ok(false) => ApplicationError::StaleReferenceProbeFailed(handle.result_url.clone()),
            Err(error) => error,
        };
        debug!(error = %stale, "cached result failed its probe, recomputing");
        false
    }
}

fn parse_location(location: &str) -> Result<ResultHandle, ApplicationError> {
    ResultHandle::from_location(location).map_err(|error| {
        ApplicationError::RemoteOperationFailed(format!("unusable result location: {error}"))
    })
}
