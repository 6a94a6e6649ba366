// Edge-trigger behavior of the extension as seen by a polling block host
use serde_json::json;
use vehicle_data::{FieldKind, FieldValue, VehicleDataExtension, VehicleDataUpdate, VehicleField};

fn non_default_value(field: VehicleField) -> FieldValue {
    match field.kind() {
        FieldKind::Numeric => FieldValue::Number(123.25),
        FieldKind::Categorical => FieldValue::from("FAULT"),
    }
}

fn update_for(field: VehicleField, value: &FieldValue) -> VehicleDataUpdate {
    match value {
        FieldValue::Number(v) => VehicleDataUpdate::new().with_number(field, *v),
        FieldValue::Text(s) => VehicleDataUpdate::new().with_text(field, s.as_str()),
    }
}

#[test]
fn fresh_extension_reports_no_changes() {
    let mut ext = VehicleDataExtension::new();
    for field in VehicleField::ALL {
        assert!(!ext.has_changed(field), "{} reported a change", field);
    }
}

#[test]
fn each_change_is_reported_exactly_once() {
    for field in VehicleField::menu_fields() {
        let mut ext = VehicleDataExtension::new();
        let value = non_default_value(field);
        ext.update(&update_for(field, &value));

        assert!(ext.has_changed(field), "{} missed its change", field);
        assert!(!ext.has_changed(field), "{} reported twice", field);
        assert_eq!(ext.read_current(field), &value);
    }
}

#[test]
fn oscillation_between_polls_is_invisible() {
    let mut ext = VehicleDataExtension::new();
    ext.update(&VehicleDataUpdate::new().with_text(VehicleField::Prndl, "DRIVE"));
    ext.update(&VehicleDataUpdate::new().with_text(VehicleField::Prndl, "PARK"));

    assert!(!ext.has_changed(VehicleField::Prndl));
}

#[test]
fn oscillation_across_a_poll_reports_both_edges() {
    let mut ext = VehicleDataExtension::new();

    ext.update(&VehicleDataUpdate::new().with_text(VehicleField::Prndl, "DRIVE"));
    assert!(ext.has_changed(VehicleField::Prndl));

    ext.update(&VehicleDataUpdate::new().with_text(VehicleField::Prndl, "PARK"));
    assert!(ext.has_changed(VehicleField::Prndl));
    assert!(!ext.has_changed(VehicleField::Prndl));
}

#[test]
fn intermediate_values_collapse_into_one_edge() {
    let mut ext = VehicleDataExtension::new();
    for rpm in [800.0, 1500.0, 2200.0] {
        ext.update(&VehicleDataUpdate::new().with_number(VehicleField::Rpm, rpm));
    }

    assert!(ext.has_changed(VehicleField::Rpm));
    assert!(!ext.has_changed(VehicleField::Rpm));
    assert_eq!(ext.read_current(VehicleField::Rpm), &FieldValue::Number(2200.0));
}

#[test]
fn irrelevant_payloads_change_nothing() {
    let mut ext = VehicleDataExtension::new();
    let before = ext.current_snapshot().clone();

    ext.handle_notification(&json!({ "vehicleData": {} }));
    ext.handle_notification(&json!({ "vehicleData": { "odometer": 5, "fuelLevel": 0.5 } }));
    ext.handle_notification(&json!({ "somethingElse": true }));
    ext.handle_notification(&json!(null));
    ext.update(&VehicleDataUpdate::new());

    assert_eq!(ext.current_snapshot(), &before);
    for field in VehicleField::ALL {
        assert!(!ext.has_changed(field));
    }
}

#[test]
fn reads_never_consume_an_edge() {
    let mut ext = VehicleDataExtension::new();
    ext.update(&VehicleDataUpdate::new().with_number(VehicleField::AccPedalPosition, 17.0));

    for _ in 0..10 {
        assert_eq!(
            ext.read_current(VehicleField::AccPedalPosition),
            &FieldValue::Number(17.0)
        );
        assert_eq!(ext.read_current_by_id("accPedalPosition"), Some(FieldValue::Number(17.0)));
    }

    assert!(ext.has_changed(VehicleField::AccPedalPosition));
    assert!(!ext.has_changed(VehicleField::AccPedalPosition));
}

#[test]
fn polling_one_field_leaves_others_pending() {
    let mut ext = VehicleDataExtension::new();
    ext.handle_notification(&json!({
        "vehicleData": { "rpm": 900, "electronicParkBrakeStatus": "OPEN" }
    }));

    assert!(ext.has_changed(VehicleField::Rpm));
    assert_eq!(ext.pending_changes(), vec![VehicleField::ElectronicParkBrakeStatus]);
    assert!(ext.has_changed(VehicleField::ElectronicParkBrakeStatus));
    assert!(ext.pending_changes().is_empty());
}

#[test]
fn speed_scenario() {
    let mut ext = VehicleDataExtension::new();
    assert_eq!(ext.read_current(VehicleField::Speed), &FieldValue::Number(0.0));

    ext.handle_notification(&json!({ "vehicleData": { "speed": 42.5 } }));
    assert_eq!(ext.read_current(VehicleField::Speed), &FieldValue::Number(42.5));
    assert!(ext.has_changed(VehicleField::Speed));
    assert!(!ext.has_changed(VehicleField::Speed));

    ext.handle_notification(&json!({ "vehicleData": { "speed": 42.5 } }));
    assert!(!ext.has_changed(VehicleField::Speed));
}

#[test]
fn integer_and_float_payloads_compare_equal() {
    let mut ext = VehicleDataExtension::new();
    ext.handle_notification(&json!({ "vehicleData": { "rpm": 1000 } }));
    assert!(ext.has_changed(VehicleField::Rpm));

    ext.handle_notification(&json!({ "vehicleData": { "rpm": 1000.0 } }));
    assert!(!ext.has_changed(VehicleField::Rpm));
}

#[test]
fn reserved_field_never_changes() {
    let mut ext = VehicleDataExtension::new();
    let value = non_default_value(VehicleField::TurnSignal);
    ext.update(&update_for(VehicleField::TurnSignal, &value));

    assert_eq!(ext.read_current(VehicleField::TurnSignal), &FieldValue::from("OFF"));
    assert!(!ext.has_changed(VehicleField::TurnSignal));
    assert!(ext.pending_changes().is_empty());
}
