//! Change tracker
//!
//! Edge detection over a sampled snapshot. Each poll compares a field's current
//! value to the value recorded at the last *reported* change for that field and
//! consumes the edge when it reports one. Values that come and go between two
//! polls are never seen.

use crate::snapshot::VehicleSnapshot;
use crate::types::VehicleField;

/// Holds the observed snapshot and answers "changed since last asked?"
#[derive(Debug, Clone)]
pub struct ChangeTracker {
    observed: VehicleSnapshot,
}

impl ChangeTracker {
    /// Start tracking from an independent copy of `current`
    pub fn new(current: &VehicleSnapshot) -> Self {
        Self {
            observed: current.clone(),
        }
    }

    pub fn observed(&self) -> &VehicleSnapshot {
        &self.observed
    }

    /// Report whether `field` differs from its observed value
    ///
    /// On a difference the observed value advances to the current one, so the
    /// same transition is reported exactly once. Other fields are never read or
    /// written.
    pub fn has_changed(&mut self, field: VehicleField, current: &VehicleSnapshot) -> bool {
        let value = current.get(field);
        if self.observed.get(field) == value {
            return false;
        }

        log::debug!(
            "Change detected on {}: {} -> {}",
            field,
            self.observed.get(field),
            value
        );
        self.observed.set(field, value.clone());
        true
    }

    /// Fields whose current value differs from the observed one
    ///
    /// Does not consume any edge.
    pub fn pending(&self, current: &VehicleSnapshot) -> Vec<VehicleField> {
        VehicleField::ALL
            .into_iter()
            .filter(|field| self.observed.get(*field) != current.get(*field))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;

    #[test]
    fn test_no_change_after_construction() {
        let current = VehicleSnapshot::new();
        let mut tracker = ChangeTracker::new(&current);
        for field in VehicleField::ALL {
            assert!(!tracker.has_changed(field, &current));
        }
    }

    #[test]
    fn test_edge_is_consumed_once() {
        let mut current = VehicleSnapshot::new();
        let mut tracker = ChangeTracker::new(&current);

        current.set(VehicleField::Prndl, FieldValue::from("DRIVE"));
        assert_eq!(tracker.pending(&current), vec![VehicleField::Prndl]);
        assert!(tracker.has_changed(VehicleField::Prndl, &current));
        assert!(!tracker.has_changed(VehicleField::Prndl, &current));
        assert!(tracker.pending(&current).is_empty());
    }

    #[test]
    fn test_fields_are_independent() {
        let mut current = VehicleSnapshot::new();
        let mut tracker = ChangeTracker::new(&current);

        current.set(VehicleField::Rpm, FieldValue::Number(750.0));
        current.set(VehicleField::Speed, FieldValue::Number(10.0));

        assert!(tracker.has_changed(VehicleField::Rpm, &current));
        assert_eq!(tracker.observed().get(VehicleField::Speed), &FieldValue::Number(0.0));
        assert!(tracker.has_changed(VehicleField::Speed, &current));
    }

    #[test]
    fn test_pending_does_not_consume() {
        let mut current = VehicleSnapshot::new();
        let mut tracker = ChangeTracker::new(&current);

        current.set(VehicleField::AccPedalPosition, FieldValue::Number(3.5));
        assert_eq!(tracker.pending(&current).len(), 1);
        assert_eq!(tracker.pending(&current).len(), 1);
        assert!(tracker.has_changed(VehicleField::AccPedalPosition, &current));
    }
}
