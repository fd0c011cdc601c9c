//! Shared test fixtures: serialized layouts and published bundles.

#![allow(dead_code)]

use valuecraft::catalog::VadId;
use valuecraft::models::{BuildBundle, ThemeConfig};
use valuecraft::services::BundleStore;

/// A minimal Home layout: one container with a title block.
pub fn home_layout() -> String {
    r#"{
        "ROOT": {"type": {"resolvedName": "Container"}, "props": {"padding": 24}, "nodes": ["t1"]},
        "t1": {"type": {"resolvedName": "TitleBlock"}, "props": {"text": "Value Assessment"}}
    }"#
    .to_string()
}

/// An Inputs layout carrying driver blocks for the given drivers.
pub fn inputs_layout(drivers: &[VadId]) -> String {
    let mut nodes = vec![
        r#""ROOT": {"type": {"resolvedName": "Container"}, "props": {}}"#.to_string(),
    ];
    for (i, id) in drivers.iter().enumerate() {
        nodes.push(format!(
            r#""vad-{i}": {{"type": {{"resolvedName": "VadBlock"}}, "props": {{"vad": "{}", "title": "{}"}}}}"#,
            id.key(),
            id.display_name()
        ));
    }
    format!("{{{}}}", nodes.join(","))
}

/// A Results layout with one result card.
pub fn results_layout() -> String {
    r#"{
        "ROOT": {"type": {"resolvedName": "Container"}, "props": {}},
        "r1": {"type": {"resolvedName": "ResultCard"}, "props": {"label": "Total Annual Value"}}
    }"#
    .to_string()
}

/// A complete bundle for a project, selecting the given drivers.
pub fn complete_bundle(project_id: &str, drivers: &[VadId]) -> BuildBundle {
    BuildBundle::new(
        project_id,
        ThemeConfig::light(),
        Some(home_layout()),
        Some(inputs_layout(drivers)),
        Some(results_layout()),
    )
}

/// Publishes a complete bundle into a store.
pub fn publish_bundle(store: &dyn BundleStore, project_id: &str, drivers: &[VadId]) {
    store
        .save(&complete_bundle(project_id, drivers))
        .expect("failed to save fixture bundle");
}
