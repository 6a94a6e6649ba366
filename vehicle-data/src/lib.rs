//! Vehicle Data Extension Library
//!
//! Exposes live vehicle telemetry (engine RPM, speed, accelerator pedal
//! position, parking brake status, gear selector position) to a block
//! programming runtime.
//!
//! # Architecture
//!
//! - The telemetry sink merges partial, pre-decoded updates into a current
//!   snapshot
//! - The change tracker answers "did this field change since it was last
//!   asked?" as an edge trigger sampled at poll time
//! - The extension facade owns both and dispatches block invocations
//!
//! The library does NOT:
//! - Parse the transport that delivers telemetry
//! - Keep history beyond the last observed value
//! - Subscribe or push; the host polls once per tick
//!
//! # Example Usage
//!
//! ```
//! use vehicle_data::{FieldValue, VehicleDataExtension, VehicleField};
//! use serde_json::json;
//!
//! let mut ext = VehicleDataExtension::new();
//! ext.handle_notification(&json!({ "vehicleData": { "speed": 42.5 } }));
//!
//! assert_eq!(ext.read_current(VehicleField::Speed), &FieldValue::Number(42.5));
//! assert!(ext.has_changed(VehicleField::Speed));
//! assert!(!ext.has_changed(VehicleField::Speed));
//! ```

// Public modules
pub mod blocks;
pub mod config;
pub mod extension;
pub mod shared;
pub mod sink;
pub mod snapshot;
pub mod tracker;
pub mod types;

// Re-export main types for convenience
pub use blocks::{BlockOutput, BlockType, ExtensionInfo};
pub use config::ExtensionConfig;
pub use extension::VehicleDataExtension;
pub use shared::SharedVehicleData;
pub use sink::{TelemetrySink, VehicleDataUpdate};
pub use snapshot::VehicleSnapshot;
pub use tracker::ChangeTracker;
pub use types::{ExtensionError, FieldKind, FieldValue, Result, VehicleField};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: a fresh extension reports no changes
        let mut ext = VehicleDataExtension::new();
        assert!(ext.pending_changes().is_empty());
        assert!(!ext.has_changed(VehicleField::Prndl));
    }
}
