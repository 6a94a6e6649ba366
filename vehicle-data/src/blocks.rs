//! Block host registration metadata
//!
//! Describes the blocks and menus this extension registers with the block
//! programming runtime. The structures serialize to the camelCase shape the
//! runtime expects from an extension's info call.

use crate::types::{FieldValue, VehicleField};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Stable extension identifier
pub const EXTENSION_ID: &str = "smartdevicelink";

/// Display name shown in the block palette
pub const EXTENSION_NAME: &str = "SDL";

/// Icon drawn at the left edge of every block, as a PNG data URI
pub const BLOCK_ICON_URI: &str = include_str!("../assets/block-icon.uri");

/// Opcode of the logging command block
pub const OP_WRITE_LOG: &str = "writeLog";

/// Opcode of the field value reporter block
///
/// Saved projects reference blocks as `<extension id>_<opcode>`, so the
/// published opcodes must not change.
pub const OP_GET_VEHICLE_DATA: &str = "reporter1";

/// Opcode of the field change hat block
pub const OP_WHEN_VEHICLE_DATA_CHANGED: &str = "event1";

/// Argument name of the logging command's text
pub const ARG_TEXT: &str = "TEXT";

/// Argument name of the field selector
pub const ARG_VEHICLE_DATA: &str = "VEHICLE_DATA";

/// Name of the field selector menu
pub const MENU_VEHICLE_DATA: &str = "vehicleData";

/// How the runtime invokes a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// Fire-and-forget statement, no return value
    Command,
    /// Value-returning expression
    Reporter,
    /// Evaluated every tick; starts its script when it returns true
    Hat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    String,
}

/// Declaration of one block argument
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentInfo {
    #[serde(rename = "type")]
    pub arg_type: ArgumentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<String>,
    pub default_value: Value,
}

/// Declaration of one block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub opcode: String,
    pub block_type: BlockType,
    pub text: String,
    pub arguments: BTreeMap<String, ArgumentInfo>,
}

/// One entry of a block menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub text: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuInfo {
    pub accept_reporters: bool,
    pub items: Vec<MenuItem>,
}

/// Everything the runtime needs to register the extension
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtensionInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "blockIconURI")]
    pub block_icon_uri: String,
    pub blocks: Vec<BlockInfo>,
    pub menus: BTreeMap<String, MenuInfo>,
}

impl ExtensionInfo {
    /// Build the registration metadata, preselecting `menu_default` in field menus
    pub fn new(menu_default: VehicleField) -> Self {
        let field_argument = || {
            BTreeMap::from([(
                ARG_VEHICLE_DATA.to_string(),
                ArgumentInfo {
                    arg_type: ArgumentType::String,
                    menu: Some(MENU_VEHICLE_DATA.to_string()),
                    default_value: Value::from(menu_default.as_str()),
                },
            )])
        };

        let blocks = vec![
            BlockInfo {
                opcode: OP_WRITE_LOG.to_string(),
                block_type: BlockType::Command,
                text: format!("console.log [{}]", ARG_TEXT),
                arguments: BTreeMap::from([(
                    ARG_TEXT.to_string(),
                    ArgumentInfo {
                        arg_type: ArgumentType::String,
                        menu: None,
                        default_value: Value::from("hello"),
                    },
                )]),
            },
            BlockInfo {
                opcode: OP_GET_VEHICLE_DATA.to_string(),
                block_type: BlockType::Reporter,
                text: format!("[{}] value", ARG_VEHICLE_DATA),
                arguments: field_argument(),
            },
            BlockInfo {
                opcode: OP_WHEN_VEHICLE_DATA_CHANGED.to_string(),
                block_type: BlockType::Hat,
                text: format!("when [{}] changes", ARG_VEHICLE_DATA),
                arguments: field_argument(),
            },
        ];

        let items = VehicleField::menu_fields()
            .map(|field| MenuItem {
                text: field.label().to_string(),
                value: field.as_str().to_string(),
            })
            .collect();

        let menus = BTreeMap::from([(
            MENU_VEHICLE_DATA.to_string(),
            MenuInfo {
                accept_reporters: true,
                items,
            },
        )]);

        Self {
            id: EXTENSION_ID.to_string(),
            name: EXTENSION_NAME.to_string(),
            block_icon_uri: BLOCK_ICON_URI.trim().to_string(),
            blocks,
            menus,
        }
    }

    /// Look up a block declaration by opcode
    pub fn block(&self, opcode: &str) -> Option<&BlockInfo> {
        self.blocks.iter().find(|block| block.opcode == opcode)
    }
}

/// What a block invocation hands back to the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum BlockOutput {
    /// A command finished
    Done,
    /// A reporter's value
    Value(FieldValue),
    /// A reporter had nothing to report (unknown or missing field)
    Empty,
    /// A hat block's "start the script" decision
    Trigger(bool),
}

/// Convert an argument value to text the way the runtime casts to string
///
/// Strings pass through, numbers and booleans use their display form, and a
/// missing or null argument becomes the empty string.
pub fn cast_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}
