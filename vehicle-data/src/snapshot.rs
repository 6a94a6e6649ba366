//! Fixed-key snapshot of vehicle data values

use crate::types::{FieldValue, VehicleField};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One value per [`VehicleField`], always fully populated
///
/// Values are stored by field index, so the key set can never drift between
/// two snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSnapshot {
    values: [FieldValue; VehicleField::COUNT],
}

impl VehicleSnapshot {
    /// Snapshot holding every field's default value
    pub fn new() -> Self {
        Self {
            values: VehicleField::ALL.map(VehicleField::default_value),
        }
    }

    pub fn get(&self, field: VehicleField) -> &FieldValue {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: VehicleField, value: FieldValue) {
        self.values[field.index()] = value;
    }

    /// Iterate over (field, value) pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (VehicleField, &FieldValue)> {
        VehicleField::ALL.into_iter().zip(self.values.iter())
    }
}

impl Default for VehicleSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for VehicleSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(VehicleField::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}
