use std::collections::HashSet;

use crate::{Feature, FeatureKind, Session};

/// Outcome of one step of the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub index: usize,
    /// Control that was visible before this step, if any.
    pub retired: Option<FeatureKind>,
    pub exposed: FeatureKind,
    /// True while no control for `exposed` has been built yet.
    pub first_exposure: bool,
}

impl Transition {
    /// Features sharing a kind share one control, so stepping between them
    /// changes nothing on screen.
    pub fn is_swap(&self) -> bool {
        self.retired != Some(self.exposed)
    }
}

/// Exposes the enabled features one at a time, in order.
#[derive(Debug, Clone, Default)]
pub struct FeatureSequencer {
    features: Vec<Feature>,
    constructed: HashSet<FeatureKind>,
}

impl FeatureSequencer {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            constructed: HashSet::new(),
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn current(&self, session: &Session) -> Option<&Feature> {
        session
            .present()
            .active_index()
            .and_then(|index| self.features.get(index))
    }

    pub fn find(&self, kind: FeatureKind) -> Option<&Feature> {
        self.features.iter().find(|feature| feature.kind() == kind)
    }

    /// Moves to the next feature. Returns `None` once the last feature is
    /// active, leaving the session untouched.
    pub fn advance(&mut self, session: &mut Session) -> Option<Transition> {
        let current = session.present().active_index();
        let next = current.map_or(0, |index| index + 1);
        let feature = self.features.get(next)?;

        let exposed = feature.kind();
        let retired = current.and_then(|index| self.features.get(index)).map(Feature::kind);
        let first_exposure = !self.constructed.contains(&exposed);
        session.set_active_index(Some(next));

        Some(Transition {
            index: next,
            retired,
            exposed,
            first_exposure,
        })
    }

    /// Records that the control for `kind` exists. Until then every exposure
    /// of that kind reports `first_exposure`.
    pub fn mark_constructed(&mut self, kind: FeatureKind) {
        self.constructed.insert(kind);
    }

    /// Rewinds to the start and re-exposes the first feature. Built controls
    /// are kept for reuse.
    pub fn reset(&mut self, session: &mut Session) -> Option<Transition> {
        self.rewind(session, |session| session.set_active_index(None))
    }

    /// Like [`reset`](Self::reset), but the whole session is cleared first.
    pub fn restart(&mut self, session: &mut Session) -> Option<Transition> {
        self.rewind(session, Session::reset)
    }

    fn rewind(
        &mut self,
        session: &mut Session,
        clear: impl FnOnce(&mut Session),
    ) -> Option<Transition> {
        let shown = self.current(session).map(Feature::kind);
        clear(session);
        self.advance(session).map(|transition| Transition {
            retired: shown,
            ..transition
        })
    }
}
