//! End-to-end tests across the build and presentation sessions.

use valuecraft::catalog::VadId;
use valuecraft::engine::LocalEngine;
use valuecraft::models::inputs::FieldValue;
use valuecraft::models::{Screen, ThemeMode};
use valuecraft::services::{BundleStore, MemoryStore};
use valuecraft::session::{BuildSession, PresentSession, PublishOutcome};

mod fixtures;
use fixtures::{home_layout, inputs_layout, results_layout};

fn open_ready(store: &MemoryStore, project_id: &str) -> valuecraft::session::Presentation {
    match PresentSession::open(store, project_id).unwrap() {
        PresentSession::Ready(p) => *p,
        PresentSession::NotFound => panic!("expected a published bundle for {project_id}"),
    }
}

#[test]
fn test_author_flow_from_blank_to_published() {
    let store = MemoryStore::new();
    let mut build = BuildSession::new("studio-42");
    build.set_theme_mode(ThemeMode::Dark);

    build.apply_edit(Screen::Home, home_layout());
    build.set_active_screen(Screen::Inputs);
    build.apply_edit(
        Screen::Inputs,
        inputs_layout(&[VadId::ReducedElectricity, VadId::AvoidedRevenueLoss]),
    );
    build.set_active_screen(Screen::Results);
    build.apply_edit(Screen::Results, results_layout());

    assert_eq!(
        build.selected_vads(),
        vec![VadId::ReducedElectricity, VadId::AvoidedRevenueLoss]
    );
    assert_eq!(build.publish(&store).unwrap(), PublishOutcome::Published);

    let presentation = open_ready(&store, "studio-42");
    assert_eq!(presentation.bundle().theme.mode, ThemeMode::Dark);
    assert_eq!(
        presentation.selected_vads(),
        &[VadId::ReducedElectricity, VadId::AvoidedRevenueLoss]
    );
}

#[test]
fn test_publish_gating_does_not_touch_store_or_navigate() {
    let store = MemoryStore::new();
    let mut build = BuildSession::new("p1");
    build.apply_edit(Screen::Home, home_layout());
    build.apply_edit(Screen::Results, results_layout());
    // Inputs screen never edited.

    assert_eq!(build.publish(&store).unwrap(), PublishOutcome::Incomplete);
    assert!(store.load("p1").unwrap().is_none());
    assert!(matches!(
        PresentSession::open(&store, "p1").unwrap(),
        PresentSession::NotFound
    ));
}

#[test]
fn test_undo_in_builder_changes_published_selection() {
    let store = MemoryStore::new();
    let mut build = BuildSession::new("p1");
    build.apply_edit(Screen::Home, home_layout());
    build.apply_edit(Screen::Results, results_layout());
    build.apply_edit(Screen::Inputs, inputs_layout(&[VadId::ReducedMaintenance]));
    build.apply_edit(
        Screen::Inputs,
        inputs_layout(&[VadId::ReducedMaintenance, VadId::IncreasedTicketSales]),
    );

    // Undo drops the second driver before publishing.
    assert!(build.undo(Screen::Inputs));
    assert_eq!(build.publish(&store).unwrap(), PublishOutcome::Published);

    let presentation = open_ready(&store, "p1");
    assert_eq!(presentation.selected_vads(), &[VadId::ReducedMaintenance]);
}

#[test]
fn test_viewer_flow_types_and_calculates() {
    let store = MemoryStore::new();
    let mut build = BuildSession::new("p1");
    build.apply_edit(Screen::Home, home_layout());
    build.apply_edit(
        Screen::Inputs,
        inputs_layout(&[VadId::ReducedElectricity, VadId::ReducedMaintenance]),
    );
    build.apply_edit(Screen::Results, results_layout());
    build.publish(&store).unwrap();

    let mut presentation = open_ready(&store, "p1");
    presentation.set_active_screen(Screen::Inputs);
    presentation.set_field_value(
        VadId::ReducedElectricity,
        0,
        FieldValue::Text("1000000".into()),
    );
    presentation.set_field_value(VadId::ReducedMaintenance, 0, FieldValue::Number(12_000.0));

    let results = presentation.calculate(&LocalEngine);
    assert_eq!(results.drivers["reduced_electricity"], 75_000.0);
    assert_eq!(results.drivers["reduced_maintenance"], 7_000.0);
    assert_eq!(results.total_annual_value, 82_000.0);
    assert_eq!(presentation.active_screen(), Screen::Results);
}

#[test]
fn test_presentation_refuses_mismatched_project() {
    let store = MemoryStore::new();
    let mut build = BuildSession::new("p1");
    build.apply_edit(Screen::Home, home_layout());
    build.apply_edit(Screen::Inputs, inputs_layout(&[VadId::ReducedElectricity]));
    build.apply_edit(Screen::Results, results_layout());
    build.publish(&store).unwrap();

    assert!(matches!(
        PresentSession::open(&store, "someone-else").unwrap(),
        PresentSession::NotFound
    ));
}

#[test]
fn test_draft_save_round_trips_incomplete_state() {
    let store = MemoryStore::new();
    let mut build = BuildSession::new("p1");
    build.apply_edit(Screen::Home, home_layout());
    build.save(&store).unwrap();

    let draft = store.load("p1").unwrap().unwrap();
    assert_eq!(draft.home_layout.as_deref(), Some(home_layout().as_str()));
    assert!(draft.inputs_layout.is_none());
    assert!(!draft.is_complete());
}
