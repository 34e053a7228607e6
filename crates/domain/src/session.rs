use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::{
    AdjustmentKind, AdjustmentStack, AssetId, BackgroundKey, DomainError, ResultHandle,
    SourceIdentity,
};

/// Committed background-removal result and the source it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveBgEntry {
    pub source: SourceIdentity,
    pub handle: ResultHandle,
}

/// Committed, cache-backed results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresentState {
    /// `None` until the first capability is exposed.
    pub(crate) active_index: Option<usize>,
    pub(crate) remove_bg: Option<RemoveBgEntry>,
    pub(crate) change_bg: HashMap<BackgroundKey, ResultHandle>,
    pub(crate) adjustments: BTreeMap<AdjustmentKind, f32>,
}

impl PresentState {
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn remove_bg(&self) -> Option<&RemoveBgEntry> {
        self.remove_bg.as_ref()
    }

    pub fn change_bg(&self, key: &BackgroundKey) -> Option<&ResultHandle> {
        self.change_bg.get(key)
    }

    pub fn change_bg_len(&self) -> usize {
        self.change_bg.len()
    }

    pub fn adjustments(&self) -> &BTreeMap<AdjustmentKind, f32> {
        &self.adjustments
    }
}

/// What is on screen right now, including provisional slider values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreludeState {
    pub(crate) asset_id: Option<AssetId>,
    pub(crate) adjustments: AdjustmentStack,
}

impl PreludeState {
    pub fn asset_id(&self) -> Option<&AssetId> {
        self.asset_id.as_ref()
    }

    pub fn adjustments(&self) -> &AdjustmentStack {
        &self.adjustments
    }
}

/// State of one editing interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    present: PresentState,
    prelude: PreludeState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn present(&self) -> &PresentState {
        &self.present
    }

    pub fn prelude(&self) -> &PreludeState {
        &self.prelude
    }

    pub(crate) fn set_active_index(&mut self, index: Option<usize>) {
        self.present.active_index = index;
    }

    pub fn reset(&mut self) {
        self.present = PresentState::default();
        self.prelude = PreludeState::default();
    }

    /// Drops every committed result when the source image no longer matches
    /// the one background removal ran against. The active index survives.
    pub fn invalidate_if_source_changed(&mut self, current_source_url: &str) -> bool {
        let Some(entry) = &self.present.remove_bg else {
            return false;
        };
        if entry.source.matches(current_source_url) {
            return false;
        }

        debug!(
            previous = %entry.source,
            current = current_source_url,
            "source image changed, clearing committed results"
        );
        self.present.remove_bg = None;
        self.present.change_bg.clear();
        self.present.adjustments.clear();
        self.prelude = PreludeState::default();
        true
    }

    /// Stores a fresh foreground. Composites derived from the previous
    /// foreground are dropped with it.
    pub fn commit_remove_background(&mut self, entry: RemoveBgEntry) {
        self.present.change_bg.clear();
        self.present.remove_bg = Some(entry);
    }

    pub fn commit_change_background(&mut self, key: BackgroundKey, handle: ResultHandle) {
        self.present.change_bg.insert(key, handle);
    }

    /// Records which asset is materialized on the surface.
    pub fn show_asset(&mut self, asset_id: AssetId) {
        self.prelude.asset_id = Some(asset_id);
    }

    /// Updates the live stack and returns the filter to apply.
    pub fn touch_adjustment(
        &mut self,
        kind: AdjustmentKind,
        value: f32,
    ) -> Result<String, DomainError> {
        self.prelude.adjustments.set(kind, value)?;
        Ok(self.prelude.adjustments.css_filter())
    }

    pub fn commit_adjustments(&mut self) {
        self.present.adjustments = self.prelude.adjustments.values().clone();
    }

    pub fn discard_adjustments(&mut self) {
        self.present.adjustments.clear();
        self.prelude.adjustments.clear();
    }

    pub fn clear_live_adjustments(&mut self) {
        self.prelude.adjustments.clear();
    }
}
