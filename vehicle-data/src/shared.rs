//! Thread-safe handle for multi-threaded block hosts
//!
//! A single lock serializes telemetry updates against change polls so a poll
//! never observes a half-applied update.

use crate::blocks::{BlockOutput, ExtensionInfo};
use crate::config::ExtensionConfig;
use crate::extension::VehicleDataExtension;
use crate::sink::VehicleDataUpdate;
use crate::types::{FieldValue, Result, VehicleField};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable, lock-protected [`VehicleDataExtension`]
#[derive(Debug, Clone, Default)]
pub struct SharedVehicleData {
    inner: Arc<Mutex<VehicleDataExtension>>,
}

impl SharedVehicleData {
    pub fn new(extension: VehicleDataExtension) -> Self {
        Self {
            inner: Arc::new(Mutex::new(extension)),
        }
    }

    pub fn with_config(config: ExtensionConfig) -> Self {
        Self::new(VehicleDataExtension::with_config(config))
    }

    // Every operation leaves the snapshots consistent, so a panic in another
    // holder cannot leave torn state behind.
    fn lock(&self) -> MutexGuard<'_, VehicleDataExtension> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn info(&self) -> ExtensionInfo {
        self.lock().info()
    }

    pub fn update(&self, update: &VehicleDataUpdate) {
        self.lock().update(update);
    }

    pub fn handle_notification(&self, notification: &Value) {
        self.lock().handle_notification(notification);
    }

    pub fn read_current(&self, field: VehicleField) -> FieldValue {
        self.lock().read_current(field).clone()
    }

    pub fn has_changed(&self, field: VehicleField) -> bool {
        self.lock().has_changed(field)
    }

    pub fn invoke(&self, opcode: &str, args: &Value) -> Result<BlockOutput> {
        self.lock().invoke(opcode, args)
    }

    /// Run `f` with exclusive access to the extension
    pub fn with_extension<R>(&self, f: impl FnOnce(&mut VehicleDataExtension) -> R) -> R {
        f(&mut self.lock())
    }
}
