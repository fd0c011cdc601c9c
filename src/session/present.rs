//! Presentation (viewer) session controller.
//!
//! Opens a published bundle and drives the read-only three-screen flow:
//! Home, Inputs (typed driver values), Results (latest evaluation). A
//! missing, malformed, or mismatched bundle puts the session into a
//! terminal not-found state that blocks all further interaction.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::{debug, info};

use crate::catalog::{self, VadId};
use crate::engine::{EvalResults, Evaluator};
use crate::models::inputs::{FieldInput, FieldValue, InputTable};
use crate::models::{BuildBundle, Screen};
use crate::selection;
use crate::services::BundleStore;

/// Viewer-mode session state.
pub enum PresentSession {
    /// No bundle matched the requested project. Terminal.
    NotFound,
    /// Bundle loaded; the flow is interactive.
    Ready(Box<Presentation>),
}

impl PresentSession {
    /// Opens a presentation for a project.
    ///
    /// Storage errors propagate; an absent or mismatched bundle yields
    /// [`Self::NotFound`] rather than an error.
    pub fn open(store: &dyn BundleStore, project_id: &str) -> Result<Self> {
        match store.load(project_id)? {
            Some(bundle) => {
                info!(project_id, "Presentation opened");
                Ok(Self::Ready(Box::new(Presentation::new(bundle))))
            }
            None => {
                info!(project_id, "No published bundle found");
                Ok(Self::NotFound)
            }
        }
    }
}

/// Interactive state of a ready presentation.
pub struct Presentation {
    bundle: BuildBundle,
    selected: Vec<VadId>,
    inputs: InputTable,
    results: Option<EvalResults>,
    active: Screen,
}

impl Presentation {
    fn new(bundle: BuildBundle) -> Self {
        let selected = selection::detect(bundle.inputs_layout.as_deref());
        let inputs = default_inputs(&selected);
        Self {
            bundle,
            selected,
            inputs,
            results: None,
            active: Screen::Home,
        }
    }

    /// The published bundle backing this presentation.
    #[must_use]
    pub fn bundle(&self) -> &BuildBundle {
        &self.bundle
    }

    /// Drivers detected on the published Inputs layout, catalog order.
    #[must_use]
    pub fn selected_vads(&self) -> &[VadId] {
        &self.selected
    }

    /// Screen the viewer is currently on.
    #[must_use]
    pub fn active_screen(&self) -> Screen {
        self.active
    }

    /// Navigates the viewer to a screen.
    ///
    /// Leaving the Inputs screen discards everything typed there; the next
    /// visit starts from a fresh table keyed to the same selection.
    pub fn set_active_screen(&mut self, screen: Screen) {
        if self.active == Screen::Inputs && screen != Screen::Inputs {
            self.inputs = default_inputs(&self.selected);
        }
        self.active = screen;
    }

    /// Current input table (driver key → field index → value/unit).
    #[must_use]
    pub fn inputs(&self) -> &InputTable {
        &self.inputs
    }

    /// Records a typed value for one field of one driver.
    pub fn set_field_value(&mut self, vad: VadId, field_index: u32, value: FieldValue) {
        if let Some(fields) = self.inputs.get_mut(vad.key()) {
            if let Some(field) = fields.get_mut(&field_index) {
                field.value = value;
            }
        }
    }

    /// Records the unit picked for one field of one driver.
    pub fn set_field_unit(&mut self, vad: VadId, field_index: u32, unit: impl Into<String>) {
        if let Some(fields) = self.inputs.get_mut(vad.key()) {
            if let Some(field) = fields.get_mut(&field_index) {
                field.unit = unit.into();
            }
        }
    }

    /// Latest evaluation results, if any calculation ran.
    #[must_use]
    pub fn results(&self) -> Option<&EvalResults> {
        self.results.as_ref()
    }

    /// Runs the evaluator over the current inputs and navigates to Results.
    pub fn calculate(&mut self, evaluator: &dyn Evaluator) -> &EvalResults {
        debug!(drivers = self.inputs.len(), "Calculating");
        let results = evaluator.evaluate(&self.inputs);
        self.set_active_screen(Screen::Results);
        self.results.insert(results)
    }
}

/// Builds a fresh input table keyed to a selection, with empty values and
/// each field's catalog default unit.
fn default_inputs(selected: &[VadId]) -> InputTable {
    selected
        .iter()
        .map(|id| {
            let fields: BTreeMap<u32, FieldInput> = catalog::input_fields(*id)
                .iter()
                .map(|f| {
                    (
                        f.field_index,
                        FieldInput::new(FieldValue::default(), f.default_unit),
                    )
                })
                .collect();
            (id.key().to_string(), fields)
        })
        .collect()
}
