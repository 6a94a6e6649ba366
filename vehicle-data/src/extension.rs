//! Main extension API
//!
//! `VehicleDataExtension` is the object a block host owns for the lifetime of
//! an extension instance. It wires the telemetry sink and the change tracker
//! together and dispatches block invocations to them.

use crate::blocks::{
    cast_to_string, BlockOutput, ExtensionInfo, ARG_TEXT, ARG_VEHICLE_DATA, OP_GET_VEHICLE_DATA,
    OP_WHEN_VEHICLE_DATA_CHANGED, OP_WRITE_LOG,
};
use crate::config::ExtensionConfig;
use crate::sink::{TelemetrySink, VehicleDataUpdate};
use crate::snapshot::VehicleSnapshot;
use crate::tracker::ChangeTracker;
use crate::types::{ExtensionError, FieldValue, Result, VehicleField};
use serde_json::Value;

/// Vehicle data extension instance
#[derive(Debug, Clone)]
pub struct VehicleDataExtension {
    sink: TelemetrySink,
    tracker: ChangeTracker,
    config: ExtensionConfig,
}

impl VehicleDataExtension {
    /// Create an extension with default settings
    pub fn new() -> Self {
        Self::with_config(ExtensionConfig::default())
    }

    /// Create an extension from a configuration
    ///
    /// Initial overrides are merged before the observed snapshot is copied, so
    /// they never register as changes.
    pub fn with_config(config: ExtensionConfig) -> Self {
        let mut sink = TelemetrySink::with_snapshot(VehicleSnapshot::new());
        sink.update(&config.initial);
        let tracker = ChangeTracker::new(sink.current());

        Self {
            sink,
            tracker,
            config,
        }
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    /// Registration metadata for the block host
    pub fn info(&self) -> ExtensionInfo {
        ExtensionInfo::new(self.config.menu_default)
    }

    /// Merge a partial update into the current snapshot
    pub fn update(&mut self, update: &VehicleDataUpdate) {
        self.sink.update(update);
    }

    /// Merge a telemetry notification shaped `{"vehicleData": {...}}`
    ///
    /// Notifications without a `vehicleData` member are ignored.
    pub fn handle_notification(&mut self, notification: &Value) {
        match VehicleDataUpdate::from_notification(notification) {
            Some(update) => self.update(&update),
            None => log::warn!("Ignoring notification without vehicleData: {}", notification),
        }
    }

    /// Current value of `field`; no change-tracking side effect
    pub fn read_current(&self, field: VehicleField) -> &FieldValue {
        self.sink.current().get(field)
    }

    /// Current value of the field named `id`, or `None` if the name is unknown
    pub fn read_current_by_id(&self, id: &str) -> Option<FieldValue> {
        id.parse::<VehicleField>()
            .ok()
            .map(|field| self.read_current(field).clone())
    }

    /// Whether `field` changed since it last reported a change
    pub fn has_changed(&mut self, field: VehicleField) -> bool {
        self.tracker.has_changed(field, self.sink.current())
    }

    /// Like [`has_changed`](Self::has_changed) for a field name; unknown names
    /// report `false` and touch no state
    pub fn has_changed_by_id(&mut self, id: &str) -> bool {
        match id.parse::<VehicleField>() {
            Ok(field) => self.has_changed(field),
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    /// Fields with an unreported change, without consuming any edge
    pub fn pending_changes(&self) -> Vec<VehicleField> {
        self.tracker.pending(self.sink.current())
    }

    pub fn current_snapshot(&self) -> &VehicleSnapshot {
        self.sink.current()
    }

    pub fn observed_snapshot(&self) -> &VehicleSnapshot {
        self.tracker.observed()
    }

    /// Run a block by opcode with its argument object
    ///
    /// # Returns
    /// * `Ok(BlockOutput)` - the block's result
    /// * `Err(ExtensionError::UnknownOpcode)` - no block with that opcode
    pub fn invoke(&mut self, opcode: &str, args: &Value) -> Result<BlockOutput> {
        match opcode {
            OP_WRITE_LOG => {
                let text = cast_to_string(args.get(ARG_TEXT));
                log::info!(target: "vehicle_data::blocks", "{}", text);
                Ok(BlockOutput::Done)
            }
            OP_GET_VEHICLE_DATA => Ok(field_argument(args)
                .and_then(|id| self.read_current_by_id(&id))
                .map(BlockOutput::Value)
                .unwrap_or(BlockOutput::Empty)),
            OP_WHEN_VEHICLE_DATA_CHANGED => {
                let triggered = match field_argument(args) {
                    Some(id) => self.has_changed_by_id(&id),
                    None => false,
                };
                Ok(BlockOutput::Trigger(triggered))
            }
            _ => Err(ExtensionError::UnknownOpcode(opcode.to_string())),
        }
    }
}

impl Default for VehicleDataExtension {
    fn default() -> Self {
        Self::new()
    }
}

/// Field selector argument as a string, if supplied
fn field_argument(args: &Value) -> Option<String> {
    match args.get(ARG_VEHICLE_DATA) {
        None | Some(Value::Null) => None,
        value => Some(cast_to_string(value)),
    }
}
