use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Section that is above the fold on the detail page.
pub const PRIMARY_SECTION: &str = "overview";

/// Detail-page sections in display order.
pub const DETAIL_SECTIONS: [&str; 4] = [PRIMARY_SECTION, "customize", "specs", "features"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SectionState {
    Unregistered,
    Registered,
    /// Terminal: content stays mounted once shown.
    Visible,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum VisibilityEvent {
    Register(String),
    EnteredViewport(String),
}

/// Per-section reveal progress. Visible sections never leave this map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevealState {
    sections: BTreeMap<String, SectionState>,
}

impl RevealState {
    /// State with `primary` already visible, independent of any viewport signal.
    pub fn with_primary(primary: &str) -> Self {
        let mut sections = BTreeMap::new();
        sections.insert(primary.to_string(), SectionState::Visible);
        Self { sections }
    }

    pub fn state_of(&self, section: &str) -> SectionState {
        self.sections
            .get(section)
            .copied()
            .unwrap_or(SectionState::Unregistered)
    }

    pub fn is_visible(&self, section: &str) -> bool {
        self.state_of(section) == SectionState::Visible
    }

    pub fn visible_sections(&self) -> impl Iterator<Item = &str> {
        self.sections_in(SectionState::Visible)
    }

    /// Registered sections still waiting for their viewport signal.
    pub fn pending_sections(&self) -> impl Iterator<Item = &str> {
        self.sections_in(SectionState::Registered)
    }

    fn sections_in(&self, wanted: SectionState) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .filter(move |(_, state)| **state == wanted)
            .map(|(id, _)| id.as_str())
    }
}

/// Pure transition function for section visibility.
///
/// Viewport signals for sections that were never registered are ignored.
pub fn apply_visibility_event(mut state: RevealState, event: &VisibilityEvent) -> RevealState {
    match event {
        VisibilityEvent::Register(id) => {
            state
                .sections
                .entry(id.clone())
                .or_insert(SectionState::Registered);
        }
        VisibilityEvent::EnteredViewport(id) => {
            if let Some(section) = state.sections.get_mut(id) {
                *section = SectionState::Visible;
            }
        }
    }
    state
}

/// Owns a [`RevealState`] for one page and feeds it viewport events.
#[derive(Debug, Clone, Default)]
pub struct RevealCoordinator {
    state: RevealState,
}

impl RevealCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary(primary: &str) -> Self {
        Self {
            state: RevealState::with_primary(primary),
        }
    }

    /// Coordinator for the detail page: all sections registered, overview shown.
    pub fn for_detail_page() -> Self {
        let mut coordinator = Self::with_primary(PRIMARY_SECTION);
        for section in DETAIL_SECTIONS {
            coordinator.register(section);
        }
        coordinator
    }

    pub fn register(&mut self, section: &str) {
        self.apply(VisibilityEvent::Register(section.to_string()));
    }

    pub fn entered_viewport(&mut self, section: &str) {
        self.apply(VisibilityEvent::EnteredViewport(section.to_string()));
    }

    pub fn apply(&mut self, event: VisibilityEvent) {
        self.state = apply_visibility_event(std::mem::take(&mut self.state), &event);
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    pub fn is_visible(&self, section: &str) -> bool {
        self.state.is_visible(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn visible(state: &RevealState) -> BTreeSet<String> {
        state.visible_sections().map(str::to_string).collect()
    }

    #[test]
    fn register_then_enter_makes_section_visible() {
        let state = apply_visibility_event(
            RevealState::default(),
            &VisibilityEvent::Register("specs".into()),
        );
        assert_eq!(state.state_of("specs"), SectionState::Registered);
        let state = apply_visibility_event(state, &VisibilityEvent::EnteredViewport("specs".into()));
        assert_eq!(state.state_of("specs"), SectionState::Visible);
    }

    #[test]
    fn registering_a_visible_section_is_a_no_op() {
        let mut coordinator = RevealCoordinator::new();
        coordinator.register("features");
        coordinator.entered_viewport("features");
        coordinator.register("features");
        assert!(coordinator.is_visible("features"));
    }

    #[test]
    fn unregistered_viewport_signal_is_ignored() {
        let state = apply_visibility_event(
            RevealState::default(),
            &VisibilityEvent::EnteredViewport("ghost".into()),
        );
        assert_eq!(state.state_of("ghost"), SectionState::Unregistered);
    }

    #[test]
    fn primary_section_starts_visible() {
        let coordinator = RevealCoordinator::for_detail_page();
        assert!(coordinator.is_visible(PRIMARY_SECTION));
        let pending: Vec<_> = coordinator.state().pending_sections().collect();
        assert_eq!(pending, vec!["customize", "features", "specs"]);
    }

    #[test]
    fn visible_set_never_shrinks() {
        let events = [
            VisibilityEvent::Register("customize".into()),
            VisibilityEvent::EnteredViewport("customize".into()),
            VisibilityEvent::Register("specs".into()),
            VisibilityEvent::Register("customize".into()),
            VisibilityEvent::EnteredViewport("nowhere".into()),
            VisibilityEvent::EnteredViewport("specs".into()),
            VisibilityEvent::Register("features".into()),
        ];
        let mut state = RevealState::with_primary(PRIMARY_SECTION);
        for event in &events {
            let before = visible(&state);
            state = apply_visibility_event(state, event);
            assert!(visible(&state).is_superset(&before), "shrank on {event:?}");
        }
        assert_eq!(visible(&state).len(), 3);
    }
}
