// ── Per-unit view model ──

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use super::firmware::FirmwareInfo;
use super::tool::ToolSelection;
use super::unit::Unit;
use crate::event::{Field, FieldValue};

const RULE: &str = "------------------------";
const UNKNOWN: &str = "UNKNOWN";

/// Everything the panel knows about one unit.
///
/// Every field is independently optional: `None` means "never reported",
/// and a status event that omits a field leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitState {
    pub selected_tool: Option<ToolSelection>,
    pub tool_count: Option<u32>,
    pub feeder_engaged: Option<bool>,
    pub feeder_two_engaged: Option<bool>,
    pub firmware_info: Option<String>,
    pub connected: Option<bool>,
    pub jammed: Option<bool>,
}

/// Three-way connection indicator derived from `connected` / `jammed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionCategory {
    Connected,
    Disconnected,
    /// Still connected, but the feeder reported a jam.
    Jammed,
}

impl UnitState {
    /// Derived connection category. A jam wins over `connected`; anything
    /// short of an explicit `connected == true` counts as disconnected.
    pub fn category(&self) -> ConnectionCategory {
        match (self.jammed, self.connected) {
            (Some(true), _) => ConnectionCategory::Jammed,
            (_, Some(true)) => ConnectionCategory::Connected,
            _ => ConnectionCategory::Disconnected,
        }
    }

    /// Parsed firmware banner, if one was reported and it is well-formed.
    pub fn firmware(&self) -> Option<FirmwareInfo> {
        self.firmware_info.as_deref().and_then(FirmwareInfo::parse)
    }

    /// Current stored value of `field`, in wire-neutral form.
    pub fn value(&self, field: Field) -> Option<FieldValue> {
        match field {
            Field::SelectedTool => self.selected_tool.map(FieldValue::Tool),
            Field::ToolCount => self.tool_count.map(FieldValue::Count),
            Field::FeederEngaged => self.feeder_engaged.map(FieldValue::Flag),
            Field::FeederTwoEngaged => self.feeder_two_engaged.map(FieldValue::Flag),
            Field::FirmwareInfo => self.firmware_info.clone().map(FieldValue::Text),
            Field::Connected => self.connected.map(FieldValue::Flag),
            Field::Jammed => self.jammed.map(FieldValue::Flag),
        }
    }

    /// Overwrite `field` with `value`. Returns `true` when the stored value
    /// actually changed. Values of the wrong shape for the field are dropped.
    pub(crate) fn store(&mut self, field: Field, value: FieldValue) -> bool {
        match (field, value) {
            (Field::SelectedTool, FieldValue::Tool(tool)) => replace(&mut self.selected_tool, tool),
            (Field::ToolCount, FieldValue::Count(count)) => replace(&mut self.tool_count, count),
            (Field::FeederEngaged, FieldValue::Flag(on)) => replace(&mut self.feeder_engaged, on),
            (Field::FeederTwoEngaged, FieldValue::Flag(on)) => {
                replace(&mut self.feeder_two_engaged, on)
            }
            (Field::FirmwareInfo, FieldValue::Text(text)) => replace(&mut self.firmware_info, text),
            (Field::Connected, FieldValue::Flag(on)) => replace(&mut self.connected, on),
            (Field::Jammed, FieldValue::Flag(on)) => replace(&mut self.jammed, on),
            _ => false,
        }
    }

    /// Multi-line status text in the layout of the device's `STATUS` reply.
    pub fn report(&self, unit: Unit) -> String {
        let mut out = format!(
            "SMuFF Status (unit {unit}):\nConnected:\t{}\n",
            yes_no(self.connected)
        );
        if self.connected != Some(true) {
            return out;
        }

        let firmware = self.firmware();
        let fw = |f: fn(&FirmwareInfo) -> String| firmware.as_ref().map_or_else(|| UNKNOWN.into(), f);
        let tool = match self.selected_tool {
            Some(ToolSelection::Tool(id)) => format!("T{id}"),
            Some(ToolSelection::NoTool) => "None".into(),
            None => UNKNOWN.into(),
        };

        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{RULE}\n\
             Tool count:\t{}\n\
             {RULE}\n\
             Active tool:\t{tool}\n\
             Feeder:\t\t{}\n\
             Feeder 2:\t{}\n\
             Feeder jammed:\t{}\n\
             {RULE}\n\
             FW-Version:\t{}\n\
             FW-Board:\t{}\n\
             FW-Mode:\t{}\n\
             FW-Options:\t{}\n",
            self.tool_count.map_or_else(|| UNKNOWN.into(), |n| n.to_string()),
            triggered(self.feeder_engaged),
            triggered(self.feeder_two_engaged),
            yes_no(self.jammed),
            fw(|f| f.version.clone()),
            fw(|f| f.board.clone()),
            fw(|f| f.mode.clone()),
            fw(|f| f.options.join(", ")),
        );
        out
    }
}

fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
    let changed = slot.as_ref() != Some(&value);
    *slot = Some(value);
    changed
}

fn yes_no(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "YES",
        Some(false) => "NO",
        None => UNKNOWN,
    }
}

fn triggered(flag: Option<bool>) -> &'static str {
    match flag {
        Some(true) => "TRIGGERED",
        Some(false) => "NOT TRIGGERED",
        None => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn jam_takes_precedence_over_connected() {
        let state = UnitState {
            connected: Some(true),
            jammed: Some(true),
            ..UnitState::default()
        };
        assert_eq!(state.category(), ConnectionCategory::Jammed);
    }

    #[test]
    fn unknown_connection_is_disconnected() {
        assert_eq!(UnitState::default().category(), ConnectionCategory::Disconnected);

        let state = UnitState {
            connected: Some(true),
            jammed: Some(false),
            ..UnitState::default()
        };
        assert_eq!(state.category(), ConnectionCategory::Connected);
    }

    #[test]
    fn store_reports_change_only_on_new_value() {
        let mut state = UnitState::default();
        assert!(state.store(Field::FeederEngaged, FieldValue::Flag(true)));
        assert!(!state.store(Field::FeederEngaged, FieldValue::Flag(true)));
        assert!(state.store(Field::FeederEngaged, FieldValue::Flag(false)));
        assert_eq!(state.feeder_engaged, Some(false));
    }

    #[test]
    fn store_ignores_mismatched_shape() {
        let mut state = UnitState::default();
        assert!(!state.store(Field::ToolCount, FieldValue::Flag(true)));
        assert_eq!(state, UnitState::default());
    }

    #[test]
    fn report_for_disconnected_unit_is_short() {
        let state = UnitState {
            connected: Some(false),
            ..UnitState::default()
        };
        assert_eq!(state.report(Unit::B), "SMuFF Status (unit B):\nConnected:\tNO\n");
    }

    #[test]
    fn report_for_connected_unit() {
        let state = UnitState {
            selected_tool: Some(ToolSelection::NoTool),
            tool_count: Some(5),
            feeder_engaged: Some(true),
            feeder_two_engaged: Some(false),
            firmware_info: Some(
                "FIRMWARE_NAME: SMuFF FIRMWARE_VERSION: V3.10D ELECTRONICS: SKR DATE: 2022 \
                 MODE: SMUFF OPTIONS: TMC|DDE"
                    .into(),
            ),
            connected: Some(true),
            jammed: Some(false),
        };

        let expected = "SMuFF Status (unit A):\n\
                        Connected:\tYES\n\
                        ------------------------\n\
                        Tool count:\t5\n\
                        ------------------------\n\
                        Active tool:\tNone\n\
                        Feeder:\t\tTRIGGERED\n\
                        Feeder 2:\tNOT TRIGGERED\n\
                        Feeder jammed:\tNO\n\
                        ------------------------\n\
                        FW-Version:\tV3.10D\n\
                        FW-Board:\tSKR\n\
                        FW-Mode:\tSMUFF\n\
                        FW-Options:\tTMC, DDE\n";
        assert_eq!(state.report(Unit::A), expected);
    }
}
