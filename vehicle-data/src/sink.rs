//! Telemetry sink
//!
//! Merges partial vehicle data updates into the current snapshot. Payloads
//! arrive already decoded into named fields; anything the sink does not
//! recognise is skipped field by field and never fails the merge.

use crate::snapshot::VehicleSnapshot;
use crate::types::{FieldKind, FieldValue, VehicleField};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key carrying the field map inside a telemetry notification
pub const VEHICLE_DATA_KEY: &str = "vehicleData";

/// A partial set of field values; `None` means "leave the field alone"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VehicleDataUpdate {
    pub rpm: Option<f64>,
    pub speed: Option<f64>,
    pub acc_pedal_position: Option<f64>,
    pub electronic_park_brake_status: Option<String>,
    pub prndl: Option<String>,
    pub turn_signal: Option<String>,
}

impl VehicleDataUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set a numeric field
    pub fn with_number(mut self, field: VehicleField, value: f64) -> Self {
        match field {
            VehicleField::Rpm => self.rpm = Some(value),
            VehicleField::Speed => self.speed = Some(value),
            VehicleField::AccPedalPosition => self.acc_pedal_position = Some(value),
            _ => log::warn!("Ignoring numeric value {} for categorical field {}", value, field),
        }
        self
    }

    /// Builder method: set a categorical field
    pub fn with_text(mut self, field: VehicleField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            VehicleField::ElectronicParkBrakeStatus => {
                self.electronic_park_brake_status = Some(value)
            }
            VehicleField::Prndl => self.prndl = Some(value),
            VehicleField::TurnSignal => self.turn_signal = Some(value),
            _ => log::warn!("Ignoring label {:?} for numeric field {}", value, field),
        }
        self
    }

    /// Value carried for `field`, if present
    pub fn get(&self, field: VehicleField) -> Option<FieldValue> {
        match field {
            VehicleField::Rpm => self.rpm.map(FieldValue::Number),
            VehicleField::Speed => self.speed.map(FieldValue::Number),
            VehicleField::AccPedalPosition => self.acc_pedal_position.map(FieldValue::Number),
            VehicleField::ElectronicParkBrakeStatus => self
                .electronic_park_brake_status
                .clone()
                .map(FieldValue::Text),
            VehicleField::Prndl => self.prndl.clone().map(FieldValue::Text),
            VehicleField::TurnSignal => self.turn_signal.clone().map(FieldValue::Text),
        }
    }

    /// Present (field, value) pairs in field order
    pub fn present(&self) -> impl Iterator<Item = (VehicleField, FieldValue)> + '_ {
        VehicleField::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// Build an update from a decoded `vehicleData` object
    ///
    /// Unknown keys and `null` values are skipped. A value of the wrong kind for
    /// its field is skipped with a warning. A non-object payload yields an
    /// empty update.
    pub fn from_json(payload: &Value) -> Self {
        let mut update = Self::new();

        let Some(object) = payload.as_object() else {
            log::warn!("Ignoring non-object vehicle data payload: {}", payload);
            return update;
        };

        for (key, value) in object {
            let field = match key.parse::<VehicleField>() {
                Ok(field) => field,
                Err(_) => {
                    log::debug!("Ignoring unknown vehicle data key: {}", key);
                    continue;
                }
            };

            match (field.kind(), value) {
                (_, Value::Null) => {}
                (FieldKind::Numeric, Value::Number(n)) => match n.as_f64() {
                    Some(v) => update = update.with_number(field, v),
                    None => log::warn!("Ignoring unrepresentable number for {}: {}", field, n),
                },
                (FieldKind::Categorical, Value::String(s)) => {
                    update = update.with_text(field, s.as_str())
                }
                (kind, other) => {
                    log::warn!("Ignoring {:?} value of wrong type for {}: {}", kind, field, other)
                }
            }
        }

        update
    }

    /// Build an update from a full telemetry notification (`{"vehicleData": {...}}`)
    ///
    /// Returns `None` when the notification carries no `vehicleData` member.
    pub fn from_notification(notification: &Value) -> Option<Self> {
        notification.get(VEHICLE_DATA_KEY).map(Self::from_json)
    }
}

/// Owns the current snapshot and applies updates to it
#[derive(Debug, Clone, Default)]
pub struct TelemetrySink {
    current: VehicleSnapshot,
}

impl TelemetrySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink starting from an explicit snapshot
    pub fn with_snapshot(current: VehicleSnapshot) -> Self {
        Self { current }
    }

    pub fn current(&self) -> &VehicleSnapshot {
        &self.current
    }

    /// Overwrite every field present in `update`, leave the rest untouched
    ///
    /// Reserved fields keep their default value. Non-finite numbers are
    /// skipped; they would never compare equal to themselves and would report
    /// a change on every poll.
    pub fn update(&mut self, update: &VehicleDataUpdate) {
        for (field, value) in update.present() {
            if field.is_reserved() {
                log::debug!("Ignoring update for reserved field {}: {}", field, value);
                continue;
            }
            if let FieldValue::Number(v) = value {
                if !v.is_finite() {
                    log::warn!("Ignoring non-finite value for {}: {}", field, v);
                    continue;
                }
            }
            log::trace!("Merged {} = {}", field, value);
            self.current.set(field, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_overwrites_present_fields_only() {
        let mut sink = TelemetrySink::new();
        sink.update(&VehicleDataUpdate::new().with_number(VehicleField::Speed, 42.5));

        assert_eq!(sink.current().get(VehicleField::Speed), &FieldValue::Number(42.5));
        assert_eq!(sink.current().get(VehicleField::Rpm), &FieldValue::Number(0.0));
        assert_eq!(sink.current().get(VehicleField::Prndl), &FieldValue::from("PARK"));
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut sink = TelemetrySink::new();
        sink.update(&VehicleDataUpdate::new());
        assert_eq!(sink.current(), &VehicleSnapshot::new());
    }

    #[test]
    fn test_non_finite_numbers_are_skipped() {
        let mut sink = TelemetrySink::new();
        sink.update(&VehicleDataUpdate::new().with_number(VehicleField::Rpm, f64::NAN));
        assert_eq!(sink.current().get(VehicleField::Rpm), &FieldValue::Number(0.0));
    }

    #[test]
    fn test_from_json_parses_known_fields() {
        let update = VehicleDataUpdate::from_json(&json!({
            "rpm": 1800,
            "prndl": "DRIVE",
            "electronicParkBrakeStatus": "OPEN",
        }));

        assert_eq!(update.rpm, Some(1800.0));
        assert_eq!(update.prndl.as_deref(), Some("DRIVE"));
        assert_eq!(update.electronic_park_brake_status.as_deref(), Some("OPEN"));
        assert_eq!(update.speed, None);
    }

    #[test]
    fn test_from_json_skips_unknown_null_and_mistyped() {
        let update = VehicleDataUpdate::from_json(&json!({
            "odometer": 12000,
            "speed": null,
            "rpm": "fast",
            "prndl": 3,
        }));
        assert!(update.is_empty());
    }

    #[test]
    fn test_from_json_non_object_is_empty() {
        assert!(VehicleDataUpdate::from_json(&json!([1, 2, 3])).is_empty());
        assert!(VehicleDataUpdate::from_json(&json!("speed")).is_empty());
    }

    #[test]
    fn test_from_notification() {
        let update = VehicleDataUpdate::from_notification(&json!({
            "vehicleData": { "speed": 42.5 }
        }))
        .unwrap();
        assert_eq!(update.speed, Some(42.5));

        assert!(VehicleDataUpdate::from_notification(&json!({ "speed": 42.5 })).is_none());
    }

    #[test]
    fn test_builder_ignores_wrong_kind() {
        let update = VehicleDataUpdate::new()
            .with_text(VehicleField::Speed, "fast")
            .with_number(VehicleField::Prndl, 1.0);
        assert!(update.is_empty());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let update: VehicleDataUpdate =
            serde_json::from_str(r#"{"accPedalPosition": 12.5, "turnSignal": "LEFT"}"#).unwrap();
        assert_eq!(update.acc_pedal_position, Some(12.5));
        assert_eq!(update.turn_signal.as_deref(), Some("LEFT"));

        let mut sink = TelemetrySink::new();
        sink.update(&update);
        assert_eq!(sink.current().get(VehicleField::AccPedalPosition), &FieldValue::Number(12.5));
        assert_eq!(sink.current().get(VehicleField::TurnSignal), &FieldValue::from("OFF"));
    }

    #[test]
    fn test_reserved_fields_keep_default() {
        let mut sink = TelemetrySink::new();
        sink.update(&VehicleDataUpdate::from_json(&json!({ "turnSignal": "LEFT", "rpm": 900 })));

        assert_eq!(sink.current().get(VehicleField::TurnSignal), &FieldValue::from("OFF"));
        assert_eq!(sink.current().get(VehicleField::Rpm), &FieldValue::Number(900.0));
    }
}
