//! Published build bundle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Layout, Screen, ThemeConfig};

/// The unit of persistence: everything a presentation session needs.
///
/// `project_id` is the join key between a build session and a presentation
/// session; a presentation session refuses to render a bundle whose id does
/// not match the requested one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildBundle {
    /// Identifier of the project this bundle was published for.
    pub project_id: String,
    /// Theme selected in the build session.
    pub theme: ThemeConfig,
    /// Serialized Home screen layout.
    pub home_layout: Layout,
    /// Serialized Inputs screen layout.
    pub inputs_layout: Layout,
    /// Serialized Results screen layout.
    pub results_layout: Layout,
    /// When this bundle was persisted.
    pub published_at: DateTime<Utc>,
}

impl BuildBundle {
    /// Creates a bundle from the current build state, stamped with now.
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        theme: ThemeConfig,
        home_layout: Layout,
        inputs_layout: Layout,
        results_layout: Layout,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            theme,
            home_layout,
            inputs_layout,
            results_layout,
            published_at: Utc::now(),
        }
    }

    /// Returns the stored layout for a screen.
    #[must_use]
    pub fn layout(&self, screen: Screen) -> &Layout {
        match screen {
            Screen::Home => &self.home_layout,
            Screen::Inputs => &self.inputs_layout,
            Screen::Results => &self.results_layout,
        }
    }

    /// True when all three screens carry a layout.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Screen::ALL.iter().all(|s| self.layout(*s).is_some())
    }
}
