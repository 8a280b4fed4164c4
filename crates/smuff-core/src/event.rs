// ── Inbound status events ──
//
// The host pushes loosely-typed JSON objects. This module owns the one
// field table shared by both units: base names address unit A, the same
// name with a trailing `B` addresses unit B. Resolution and value
// decoding happen here so the reconciler only ever sees typed values.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::model::{ToolSelection, Unit};

/// A per-unit state field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    SelectedTool,
    ToolCount,
    FeederEngaged,
    FeederTwoEngaged,
    FirmwareInfo,
    Connected,
    Jammed,
}

/// What an inbound key addresses once its unit qualifier is stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    State(Field),
    /// Shared terminal log; never stored as unit state.
    Terminal,
    /// Message metadata (`type`), accepted and ignored.
    Meta,
}

/// Typed value of a unit state field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Tool(ToolSelection),
    Count(u32),
    Flag(bool),
    Text(String),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tool(tool) => tool.fmt(f),
            Self::Count(n) => n.fmt(f),
            Self::Flag(on) => f.write_str(if *on { "on" } else { "off" }),
            Self::Text(text) => f.write_str(text),
        }
    }
}

const TERMINAL_KEY: &str = "terminal";
const META_KEY: &str = "type";

impl Field {
    /// Unqualified inbound key (the unit A spelling).
    pub fn key(self) -> &'static str {
        match self {
            Self::SelectedTool => "tool",
            Self::ToolCount => "tools",
            Self::FeederEngaged => "feeder",
            Self::FeederTwoEngaged => "feeder2",
            Self::FirmwareInfo => "fw_info",
            Self::Connected => "conn",
            Self::Jammed => "jammed",
        }
    }

    /// Inbound key for `unit` (`feeder2` / `feeder2B`).
    pub fn key_for(self, unit: Unit) -> String {
        format!("{}{}", self.key(), unit.qualifier())
    }

    /// Decode a raw JSON value for this field. `None` means the value has
    /// the wrong shape and must be ignored.
    pub fn decode(self, raw: &Value) -> Option<FieldValue> {
        match self {
            Self::SelectedTool => decode_tool(raw).map(FieldValue::Tool),
            Self::ToolCount => decode_count(raw).map(FieldValue::Count),
            Self::FeederEngaged | Self::FeederTwoEngaged | Self::Connected | Self::Jammed => {
                decode_flag(raw).map(FieldValue::Flag)
            }
            Self::FirmwareInfo => raw.as_str().map(|s| FieldValue::Text(s.to_owned())),
        }
    }
}

fn lookup(base: &str) -> Option<Slot> {
    match base {
        TERMINAL_KEY => Some(Slot::Terminal),
        META_KEY => Some(Slot::Meta),
        _ => Field::iter().find(|f| f.key() == base).map(Slot::State),
    }
}

/// Resolve an inbound key to its unit and slot.
///
/// Exact base names win; only when that fails is a trailing `B` treated
/// as the unit B qualifier. Unknown keys resolve to `None`.
pub fn resolve(key: &str) -> Option<(Unit, Slot)> {
    if let Some(slot) = lookup(key) {
        return Some((Unit::A, slot));
    }
    let base = key.strip_suffix(Unit::B.qualifier())?;
    match lookup(base)? {
        Slot::Meta => None,
        slot => Some((Unit::B, slot)),
    }
}

/// Text to append to the terminal log for a `terminal` value.
///
/// Strings are taken verbatim; other scalars use their JSON rendering.
pub fn terminal_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn decode_tool(raw: &Value) -> Option<ToolSelection> {
    match raw {
        Value::Number(n) => decode_tool_number(n),
        Value::String(s) => ToolSelection::parse(s),
        _ => None,
    }
}

// Integers of any width and negative floats are ids; only in-range
// fractions like `1.5` carry no tool number.
fn decode_tool_number(n: &Number) -> Option<ToolSelection> {
    if let Some(id) = n.as_i64() {
        return Some(ToolSelection::from_id(id));
    }
    if n.is_u64() {
        return Some(ToolSelection::NoTool);
    }
    let f = n.as_f64()?;
    (f < 0.0 || f > f64::from(u32::MAX)).then_some(ToolSelection::NoTool)
}

fn decode_count(raw: &Value) -> Option<u32> {
    match raw {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// The device speaks `on` / `off`, the host plugin forwards JSON booleans.
fn decode_flag(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" | "1" => Some(true),
            "off" | "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_unit_qualifier() {
        assert_eq!(resolve("tool"), Some((Unit::A, Slot::State(Field::SelectedTool))));
        assert_eq!(resolve("toolB"), Some((Unit::B, Slot::State(Field::SelectedTool))));
        assert_eq!(resolve("feeder2"), Some((Unit::A, Slot::State(Field::FeederTwoEngaged))));
        assert_eq!(resolve("feeder2B"), Some((Unit::B, Slot::State(Field::FeederTwoEngaged))));
        assert_eq!(resolve("connB"), Some((Unit::B, Slot::State(Field::Connected))));
        assert_eq!(resolve("jammedB"), Some((Unit::B, Slot::State(Field::Jammed))));
        assert_eq!(resolve("fw_info"), Some((Unit::A, Slot::State(Field::FirmwareInfo))));
        assert_eq!(resolve("terminal"), Some((Unit::A, Slot::Terminal)));
        assert_eq!(resolve("type"), Some((Unit::A, Slot::Meta)));
    }

    #[test]
    fn unknown_and_miscased_keys_do_not_resolve() {
        assert_eq!(resolve("Tool"), None);
        assert_eq!(resolve("toolb"), None);
        assert_eq!(resolve("feederBB"), None);
        assert_eq!(resolve("typeB"), None);
        assert_eq!(resolve("B"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn key_for_round_trips_through_resolve() {
        for field in Field::iter() {
            for unit in Unit::ALL {
                assert_eq!(resolve(&field.key_for(unit)), Some((unit, Slot::State(field))));
            }
        }
    }

    #[test]
    fn decodes_tool_shapes() {
        let f = Field::SelectedTool;
        assert_eq!(f.decode(&json!(3)), Some(FieldValue::Tool(ToolSelection::Tool(3))));
        assert_eq!(f.decode(&json!("T2")), Some(FieldValue::Tool(ToolSelection::Tool(2))));
        assert_eq!(f.decode(&json!(-1)), Some(FieldValue::Tool(ToolSelection::NoTool)));
        assert_eq!(f.decode(&json!("T-1")), Some(FieldValue::Tool(ToolSelection::NoTool)));
        assert_eq!(f.decode(&json!(true)), None);
        assert_eq!(f.decode(&json!(1.5)), None);
        assert_eq!(f.decode(&json!(-1.0)), Some(FieldValue::Tool(ToolSelection::NoTool)));
        assert_eq!(f.decode(&json!(u64::MAX)), Some(FieldValue::Tool(ToolSelection::NoTool)));
        assert_eq!(f.decode(&json!(1e12)), Some(FieldValue::Tool(ToolSelection::NoTool)));
    }

    #[test]
    fn decodes_flags_and_counts() {
        assert_eq!(Field::FeederEngaged.decode(&json!("on")), Some(FieldValue::Flag(true)));
        assert_eq!(Field::Connected.decode(&json!(0)), Some(FieldValue::Flag(false)));
        assert_eq!(Field::Jammed.decode(&json!("maybe")), None);
        assert_eq!(Field::ToolCount.decode(&json!(5)), Some(FieldValue::Count(5)));
        assert_eq!(Field::ToolCount.decode(&json!(-5)), None);
        assert_eq!(Field::FirmwareInfo.decode(&json!(12)), None);
    }

    #[test]
    fn field_values_display_compactly() {
        assert_eq!(FieldValue::Tool(ToolSelection::NoTool).to_string(), "none");
        assert_eq!(FieldValue::Flag(true).to_string(), "on");
        assert_eq!(FieldValue::Count(12).to_string(), "12");
    }

    #[test]
    fn terminal_text_is_verbatim() {
        assert_eq!(terminal_text(&json!("  ok\n")), Some("  ok\n".into()));
        assert_eq!(terminal_text(&json!(42)), Some("42".into()));
        assert_eq!(terminal_text(&json!(null)), None);
        assert_eq!(terminal_text(&json!(["a"])), None);
    }
}
