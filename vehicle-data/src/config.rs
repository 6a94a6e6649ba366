//! Extension configuration types
//!
//! Settings a block host may pass when instantiating the extension. Everything
//! has a default, so an empty configuration reproduces the stock block set.

use crate::sink::VehicleDataUpdate;
use crate::types::VehicleField;
use serde::{Deserialize, Serialize};

/// Configuration for the vehicle data extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Field preselected in the reporter and hat block menus
    pub menu_default: VehicleField,

    /// Overrides applied to the default snapshot before tracking starts
    pub initial: VehicleDataUpdate,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            menu_default: default_menu_field(),
            initial: VehicleDataUpdate::default(),
        }
    }
}

fn default_menu_field() -> VehicleField {
    VehicleField::TurnSignal
}

impl ExtensionConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the menu default
    pub fn with_menu_default(mut self, field: VehicleField) -> Self {
        self.menu_default = field;
        self
    }

    /// Builder method: set the starting value overrides
    pub fn with_initial(mut self, initial: VehicleDataUpdate) -> Self {
        self.initial = initial;
        self
    }
}
