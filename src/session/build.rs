//! Build (authoring) session controller.
//!
//! Holds the three screen layouts through the history store, the active
//! screen, and the theme selection. Publishing is gated on all three screens
//! being built; an ungated draft save is always available.

use anyhow::Result;
use tracing::{debug, info};

use crate::catalog::VadId;
use crate::history::HistoryStore;
use crate::models::{BuildBundle, Layout, Screen, ThemeConfig, ThemeMode};
use crate::selection;
use crate::services::BundleStore;

/// Result of a publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Bundle persisted; the caller should open the presentation view.
    Published,
    /// One or more screens have no layout yet. Nothing was persisted and
    /// nothing should navigate; the UI surfaces this only as a disabled
    /// affordance.
    Incomplete,
}

/// Authoring-mode state for one project.
pub struct BuildSession {
    project_id: String,
    theme: ThemeConfig,
    active: Screen,
    history: HistoryStore,
}

impl BuildSession {
    /// Creates a fresh session: no layouts, empty histories, light theme,
    /// Home screen active.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            theme: ThemeConfig::default(),
            active: Screen::Home,
            history: HistoryStore::new(),
        }
    }

    /// Project this session edits.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Currently active (visible/editable) screen.
    #[must_use]
    pub fn active_screen(&self) -> Screen {
        self.active
    }

    /// Switches the active screen. Histories are untouched: each screen
    /// keeps its own past/future for the session's whole lifetime.
    pub fn set_active_screen(&mut self, screen: Screen) {
        self.active = screen;
    }

    /// Current theme selection.
    #[must_use]
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    /// Switches the theme to the preset for a display mode.
    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme = ThemeConfig::preset(mode);
    }

    /// Current layout of a screen.
    #[must_use]
    pub fn layout(&self, screen: Screen) -> &Layout {
        self.history.current(screen)
    }

    /// Records an edit emitted by the editing surface for a screen.
    ///
    /// Not for undo/redo-induced editor output; those layouts are already
    /// current after [`Self::undo`]/[`Self::redo`] and must not re-enter
    /// history.
    pub fn apply_edit(&mut self, screen: Screen, serialized: String) {
        debug!(screen = %screen, bytes = serialized.len(), "Layout edit committed");
        self.history.commit(screen, serialized);
    }

    /// Undoes the latest edit on a screen. No-op when there is none.
    pub fn undo(&mut self, screen: Screen) -> bool {
        self.history.undo(screen)
    }

    /// Re-applies the latest undone edit on a screen. No-op when there is none.
    pub fn redo(&mut self, screen: Screen) -> bool {
        self.history.redo(screen)
    }

    /// Whether undo is available for a screen (drives the toolbar affordance).
    #[must_use]
    pub fn can_undo(&self, screen: Screen) -> bool {
        self.history.can_undo(screen)
    }

    /// Whether redo is available for a screen.
    #[must_use]
    pub fn can_redo(&self, screen: Screen) -> bool {
        self.history.can_redo(screen)
    }

    /// Whether a screen has been built (has at least one committed layout).
    #[must_use]
    pub fn is_screen_built(&self, screen: Screen) -> bool {
        self.layout(screen).is_some()
    }

    /// Drivers currently placed on the Inputs screen, re-derived from its
    /// layout (catalog order, no duplicates).
    #[must_use]
    pub fn selected_vads(&self) -> Vec<VadId> {
        selection::detect(self.layout(Screen::Inputs).as_deref())
    }

    /// Whether all three screens are built and the session may publish.
    #[must_use]
    pub fn can_publish(&self) -> bool {
        Screen::ALL.iter().all(|s| self.is_screen_built(*s))
    }

    /// Snapshot of the current session state as a bundle.
    #[must_use]
    pub fn to_bundle(&self) -> BuildBundle {
        BuildBundle::new(
            self.project_id.clone(),
            self.theme.clone(),
            self.layout(Screen::Home).clone(),
            self.layout(Screen::Inputs).clone(),
            self.layout(Screen::Results).clone(),
        )
    }

    /// Persists the current state as a draft, complete or not.
    pub fn save(&self, store: &dyn BundleStore) -> Result<()> {
        let bundle = self.to_bundle();
        store.save(&bundle)?;
        info!(project_id = %self.project_id, "Draft saved");
        Ok(())
    }

    /// Publishes the session if every screen is built.
    ///
    /// With any screen missing this is a silent refusal: nothing is
    /// persisted and no presentation session should be opened.
    pub fn publish(&self, store: &dyn BundleStore) -> Result<PublishOutcome> {
        if !self.can_publish() {
            debug!(project_id = %self.project_id, "Publish refused: screens incomplete");
            return Ok(PublishOutcome::Incomplete);
        }

        store.save(&self.to_bundle())?;
        info!(project_id = %self.project_id, "Published");
        Ok(PublishOutcome::Published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;

    fn layout_json(marker: &str) -> String {
        format!(r#"{{"ROOT":{{"type":{{"resolvedName":"Container"}},"props":{{"id":"{marker}"}}}}}}"#)
    }

    fn built_session() -> BuildSession {
        let mut session = BuildSession::new("p1");
        session.apply_edit(Screen::Home, layout_json("h"));
        session.apply_edit(Screen::Inputs, layout_json("i"));
        session.apply_edit(Screen::Results, layout_json("r"));
        session
    }

    #[test]
    fn test_new_session_is_blank() {
        let session = BuildSession::new("p1");
        assert_eq!(session.active_screen(), Screen::Home);
        assert!(!session.can_publish());
        assert!(session.selected_vads().is_empty());
        for screen in Screen::ALL {
            assert!(!session.is_screen_built(screen));
        }
    }

    #[test]
    fn test_publish_gated_on_all_screens() {
        let store = MemoryStore::new();
        let mut session = BuildSession::new("p1");
        session.apply_edit(Screen::Home, layout_json("h"));
        session.apply_edit(Screen::Inputs, layout_json("i"));

        assert!(!session.can_publish());
        let outcome = session.publish(&store).unwrap();
        assert_eq!(outcome, PublishOutcome::Incomplete);
        // Nothing persisted by the refused publish.
        assert!(store.load("p1").unwrap().is_none());

        session.apply_edit(Screen::Results, layout_json("r"));
        assert!(session.can_publish());
        assert_eq!(session.publish(&store).unwrap(), PublishOutcome::Published);
        let bundle = store.load("p1").unwrap().unwrap();
        assert!(bundle.is_complete());
    }

    #[test]
    fn test_save_is_not_gated() {
        let store = MemoryStore::new();
        let mut session = BuildSession::new("p1");
        session.apply_edit(Screen::Home, layout_json("h"));

        session.save(&store).unwrap();
        let draft = store.load("p1").unwrap().unwrap();
        assert!(draft.home_layout.is_some());
        assert!(draft.inputs_layout.is_none());
    }

    #[test]
    fn test_undo_affects_publish_gate() {
        let store = MemoryStore::new();
        let mut session = built_session();
        assert!(session.can_publish());

        // Undo the only Results edit; its layout is blank again.
        assert!(session.undo(Screen::Results));
        assert!(!session.can_publish());
        assert_eq!(session.publish(&store).unwrap(), PublishOutcome::Incomplete);

        assert!(session.redo(Screen::Results));
        assert!(session.can_publish());
    }

    #[test]
    fn test_switching_screens_keeps_histories() {
        let mut session = built_session();
        session.apply_edit(Screen::Home, layout_json("h2"));

        session.set_active_screen(Screen::Results);
        session.set_active_screen(Screen::Home);

        assert!(session.can_undo(Screen::Home));
        assert!(session.undo(Screen::Home));
        assert_eq!(session.layout(Screen::Home).as_deref(), Some(layout_json("h").as_str()));
    }

    #[test]
    fn test_selected_vads_follow_inputs_layout() {
        let mut session = BuildSession::new("p1");
        assert!(session.selected_vads().is_empty());

        session.apply_edit(
            Screen::Inputs,
            r#"{"n1":{"type":{"resolvedName":"VadBlock"},"props":{"vad":"avoided_revenue_loss"}}}"#
                .into(),
        );
        assert_eq!(session.selected_vads(), vec![VadId::AvoidedRevenueLoss]);

        // Undoing the edit re-derives an empty selection.
        session.undo(Screen::Inputs);
        assert!(session.selected_vads().is_empty());
    }

    #[test]
    fn test_theme_mode_switch() {
        let mut session = BuildSession::new("p1");
        assert_eq!(session.theme().mode, ThemeMode::Light);
        session.set_theme_mode(ThemeMode::Dark);
        assert_eq!(session.theme(), &ThemeConfig::dark());
    }
}
