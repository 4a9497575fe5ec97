//! Tests for the ScenarioBuilder workflow API.

use encimera_types::{AppliedAddon, MeasurementKey};
use test_harness::{HarnessError, ScenarioBuilder};

#[test]
fn choose_shape_creates_pieces() {
    let mut s = ScenarioBuilder::new();
    s.stage_material("cuarzo-blanco")
        .unwrap()
        .choose_shape("u")
        .unwrap();
    assert_eq!(s.piece_count(), 3);
    assert_eq!(s.layout().placements.len(), 3);
}

#[test]
fn new_builder_loads_standard_addons() {
    let s = ScenarioBuilder::new();
    assert_eq!(
        s.session.addons.len(),
        test_harness::helpers::standard_addons().len()
    );
}

#[test]
fn shape_without_material_is_reported_as_ignored() {
    let mut s = ScenarioBuilder::new();
    let err = s.choose_shape("lineal").unwrap_err();
    assert!(matches!(err, HarnessError::Ignored { .. }));
    assert_eq!(s.errors().len(), 1);
}

#[test]
fn unknown_shape_is_a_dispatch_error() {
    let mut s = ScenarioBuilder::new();
    s.stage_material("cuarzo-blanco").unwrap();
    let err = s.choose_shape("isla").unwrap_err();
    assert!(matches!(err, HarnessError::DispatchError { .. }));
}

#[test]
fn join_all_closes_every_junction() {
    let mut s = ScenarioBuilder::new();
    s.stage_material("cuarzo-blanco")
        .unwrap()
        .choose_shape("u")
        .unwrap()
        .join_all()
        .unwrap();
    assert!(s.session.assembly().is_valid());
    assert!(s.state().pieces[0].applied_addons.is_empty());
}

#[test]
fn addon_measurements_are_merged() {
    let mut s = ScenarioBuilder::new();
    s.stage_material("cuarzo-blanco")
        .unwrap()
        .choose_shape("lineal")
        .unwrap()
        .add_addon(
            0,
            AppliedAddon::new("FREGADERO").with_measurement(MeasurementKey::LengthMl, 0.8),
        )
        .unwrap()
        .set_addon_measurement(0, 0, MeasurementKey::WidthMm, 450.0)
        .unwrap();
    let addon = &s.state().pieces[0].applied_addons[0];
    assert_eq!(addon.measurements.len(), 2);
    assert_eq!(addon.measurements[&MeasurementKey::LengthMl], 0.8);
}

#[test]
fn quote_lifecycle() {
    let mut s = ScenarioBuilder::new();
    s.stage_material("cuarzo-blanco")
        .unwrap()
        .choose_shape("l-izquierda")
        .unwrap()
        .join_all()
        .unwrap();
    let token = s.request_quote().unwrap();
    assert_eq!(s.last_request().map(|r| r.token), Some(token));
    s.answer_quote(token, 1234.5).unwrap();
    assert_eq!(s.state().calculation.result().map(|r| r.total), Some(1234.5));
}

#[test]
fn quote_without_joints_is_blocked() {
    let mut s = ScenarioBuilder::new();
    s.stage_material("cuarzo-blanco")
        .unwrap()
        .choose_shape("l-derecha")
        .unwrap();
    assert!(matches!(
        s.request_quote(),
        Err(HarnessError::QuoteBlocked { .. })
    ));
    assert!(s.last_request().is_none());
}

#[test]
fn history_records_every_message() {
    let mut s = ScenarioBuilder::new();
    s.stage_material("cuarzo-blanco").unwrap();
    let _ = s.measure(0, 1000.0, 600.0);
    let names: Vec<&str> = s.history().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["StageMaterial", "SetPieceMeasurements"]);
    assert!(s.history()[1].1.starts_with("ignored"));
}

#[test]
fn auto_check_flags_clamped_piece() {
    let mut s = ScenarioBuilder::new().with_auto_check();
    s.stage_material("cuarzo-blanco")
        .unwrap()
        .choose_shape("l-derecha")
        .unwrap();
    let err = s.measure(1, 500.0, 600.0).unwrap_err();
    match err {
        HarnessError::OracleFailure { oracle, .. } => assert_eq!(oracle, "no_clamped"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn config_json_replaces_shapes() {
    let mut s = ScenarioBuilder::from_config_json(
        r#"{"shapes": [{"id": "barra", "required_count": 1,
                        "default_measurements": [{"length_mm": 1500, "width_mm": 400}]}]}"#,
    )
    .unwrap();
    s.stage_material("madera-roble")
        .unwrap()
        .choose_shape("barra")
        .unwrap();
    assert_eq!(s.state().pieces[0].measurements.length_mm, 1500.0);
    assert!(s.choose_shape("lineal").is_err());
}
