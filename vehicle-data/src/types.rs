//! Core types for the vehicle data extension
//!
//! This module defines the closed set of telemetry fields the extension tracks,
//! the values those fields can hold, and the error type shared by the crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result type for extension operations
pub type Result<T> = std::result::Result<T, ExtensionError>;

/// Errors that can occur at the block host boundary
///
/// The telemetry merge and change polling paths never fail; errors only come
/// from parsing identifiers supplied by the host.
#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
    #[error("Unknown vehicle data field: {0}")]
    UnknownField(String),

    #[error("Unknown block opcode: {0}")]
    UnknownOpcode(String),
}

/// A telemetry channel exposed to block programs
///
/// The enumeration is closed: snapshots are indexed by [`VehicleField::index`]
/// so every field always has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleField {
    /// Engine revolutions per minute
    #[serde(rename = "rpm")]
    Rpm,
    /// Vehicle speed
    #[serde(rename = "speed")]
    Speed,
    /// Accelerator pedal position (percent)
    #[serde(rename = "accPedalPosition")]
    AccPedalPosition,
    /// Electronic parking brake status (e.g. "CLOSED", "OPEN")
    #[serde(rename = "electronicParkBrakeStatus")]
    ElectronicParkBrakeStatus,
    /// Gear selector position (e.g. "PARK", "DRIVE")
    #[serde(rename = "prndl")]
    Prndl,
    /// Turn signal state. Reserved: stays at its default and is not offered in
    /// the block menu.
    #[serde(rename = "turnSignal")]
    TurnSignal,
}

/// Whether a field carries a number or a categorical label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Categorical,
}

impl VehicleField {
    /// Number of tracked fields
    pub const COUNT: usize = 6;

    /// All fields in snapshot order
    pub const ALL: [VehicleField; Self::COUNT] = [
        VehicleField::Rpm,
        VehicleField::Speed,
        VehicleField::AccPedalPosition,
        VehicleField::ElectronicParkBrakeStatus,
        VehicleField::Prndl,
        VehicleField::TurnSignal,
    ];

    /// Position of this field in a snapshot
    pub fn index(self) -> usize {
        match self {
            VehicleField::Rpm => 0,
            VehicleField::Speed => 1,
            VehicleField::AccPedalPosition => 2,
            VehicleField::ElectronicParkBrakeStatus => 3,
            VehicleField::Prndl => 4,
            VehicleField::TurnSignal => 5,
        }
    }

    /// Identifier used in telemetry payloads and block arguments
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleField::Rpm => "rpm",
            VehicleField::Speed => "speed",
            VehicleField::AccPedalPosition => "accPedalPosition",
            VehicleField::ElectronicParkBrakeStatus => "electronicParkBrakeStatus",
            VehicleField::Prndl => "prndl",
            VehicleField::TurnSignal => "turnSignal",
        }
    }

    /// Human readable label shown in the block menu
    pub fn label(self) -> &'static str {
        match self {
            VehicleField::Rpm => "RPM",
            VehicleField::Speed => "Speed",
            VehicleField::AccPedalPosition => "Accelerator Pedal Position",
            VehicleField::ElectronicParkBrakeStatus => "Electronic Park Brake Status",
            VehicleField::Prndl => "PRNDL",
            VehicleField::TurnSignal => "Turn Signal",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            VehicleField::Rpm | VehicleField::Speed | VehicleField::AccPedalPosition => {
                FieldKind::Numeric
            }
            VehicleField::ElectronicParkBrakeStatus
            | VehicleField::Prndl
            | VehicleField::TurnSignal => FieldKind::Categorical,
        }
    }

    /// Reserved fields ignore telemetry updates and are hidden from the block menu
    pub fn is_reserved(self) -> bool {
        matches!(self, VehicleField::TurnSignal)
    }

    /// Value a field holds before any telemetry arrives
    pub fn default_value(self) -> FieldValue {
        match self {
            VehicleField::Rpm => FieldValue::Number(0.0),
            VehicleField::Speed => FieldValue::Number(0.0),
            VehicleField::AccPedalPosition => FieldValue::Number(0.0),
            VehicleField::ElectronicParkBrakeStatus => FieldValue::Text("CLOSED".to_string()),
            VehicleField::Prndl => FieldValue::Text("PARK".to_string()),
            VehicleField::TurnSignal => FieldValue::Text("OFF".to_string()),
        }
    }

    /// Fields offered in the block menu, in menu order
    pub fn menu_fields() -> impl Iterator<Item = VehicleField> {
        Self::ALL.into_iter().filter(|field| !field.is_reserved())
    }
}

impl fmt::Display for VehicleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VehicleField {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self> {
        VehicleField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ExtensionError::UnknownField(s.to_string()))
    }
}

/// Value of a single telemetry field
///
/// Numbers compare with exact `f64` equality, labels with exact string match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric reading (rpm, speed, pedal position)
    Number(f64),
    /// Categorical reading (brake status, gear position, turn signal)
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Number(_) => FieldKind::Numeric,
            FieldValue::Text(_) => FieldKind::Categorical,
        }
    }

    /// Numeric value, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    /// Label, if this is categorical
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{}", v),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}
