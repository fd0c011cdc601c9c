//! Integration tests for the driver selection detector.

use valuecraft::catalog::VadId;
use valuecraft::selection::detect;

mod fixtures;
use fixtures::inputs_layout;

#[test]
fn test_detect_none_and_empty_are_empty() {
    assert_eq!(detect(None), Vec::<VadId>::new());
    assert_eq!(detect(Some("")), Vec::<VadId>::new());
}

#[test]
fn test_detect_returns_catalog_order_regardless_of_layout_order() {
    // Layout lists drivers in reverse catalog order.
    let layout = inputs_layout(&[
        VadId::EmbodiedCarbonReduction,
        VadId::AvoidedRevenueLoss,
        VadId::ReducedElectricity,
    ]);

    assert_eq!(
        detect(Some(&layout)),
        vec![
            VadId::ReducedElectricity,
            VadId::AvoidedRevenueLoss,
            VadId::EmbodiedCarbonReduction,
        ]
    );
}

#[test]
fn test_detect_subset_of_catalog_without_duplicates() {
    let layout = inputs_layout(&[
        VadId::ReducedMaintenance,
        VadId::ReducedMaintenance,
        VadId::IncreasedTicketSales,
    ]);

    let detected = detect(Some(&layout));
    assert_eq!(
        detected,
        vec![VadId::ReducedMaintenance, VadId::IncreasedTicketSales]
    );
    for id in &detected {
        assert!(VadId::ALL.contains(id));
    }
}

#[test]
fn test_detect_all_drivers() {
    let layout = inputs_layout(&VadId::ALL);
    assert_eq!(detect(Some(&layout)), VadId::ALL.to_vec());
}

#[test]
fn test_detect_is_idempotent() {
    let layout = inputs_layout(&[VadId::IncreasedRecyclability, VadId::ReducedElectricity]);
    assert_eq!(detect(Some(&layout)), detect(Some(&layout)));
}

#[test]
fn test_detect_ignores_non_driver_blocks_and_garbage() {
    assert!(detect(Some("not even json")).is_empty());

    let layout = r#"{
        "ROOT": {"type": {"resolvedName": "Container"}, "props": {}},
        "t1": {"type": {"resolvedName": "TitleBlock"}, "props": {"text": "Reduced Electricity Consumption"}}
    }"#;
    assert!(detect(Some(layout)).is_empty());
}
