// ── Rendering adapter ──
//
// Turns an `ApplyOutcome` into element-level view updates. The core never
// touches a view directly; a `ViewAdapter` receives the updates and maps
// them onto whatever presentation it drives (DOM, terminal, test buffer).

use serde::{Deserialize, Serialize};

use crate::event::{Field, FieldValue};
use crate::model::{ConnectionCategory, ToolSelection, Unit};
use crate::store::ApplyOutcome;

pub const CLASS_ENGAGED: &str = "fa fa-check-circle";
pub const CLASS_RELEASED: &str = "fa fa-times-circle";

/// A single instruction for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ViewUpdate {
    SetValue { element: String, value: String },
    SetClass { element: String, class: String },
    AppendLog { line: String },
}

/// Receives view updates in the order they should be applied.
pub trait ViewAdapter {
    fn apply(&mut self, update: &ViewUpdate);
}

/// Collects updates instead of rendering them.
impl ViewAdapter for Vec<ViewUpdate> {
    fn apply(&mut self, update: &ViewUpdate) {
        self.push(update.clone());
    }
}

/// Default state → element mapping, using the panel's element ids
/// (`SMuFF_setting_tool`, `SMuFF_navbar_feeder`, ...; unit B ids end in `B`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassRenderer;

impl ClassRenderer {
    pub fn updates(outcome: &ApplyOutcome) -> Vec<ViewUpdate> {
        let mut updates = Vec::new();

        for change in &outcome.changes {
            let unit = change.unit;
            match (change.field, &change.value) {
                (Field::SelectedTool, FieldValue::Tool(tool)) => {
                    let value = tool_value(*tool);
                    for view in ["setting", "navbar"] {
                        updates.push(set_value(element(view, "tool", unit), value.clone()));
                    }
                }
                (Field::FeederEngaged, FieldValue::Flag(on)) => {
                    for view in ["setting", "navbar"] {
                        updates.push(set_class(element(view, "feeder", unit), feeder_class(*on)));
                    }
                }
                // The secondary feeder follows its own signal.
                (Field::FeederTwoEngaged, FieldValue::Flag(on)) => {
                    updates.push(set_class(element("setting", "feeder2", unit), feeder_class(*on)));
                }
                (Field::ToolCount, FieldValue::Count(count)) => {
                    updates.push(set_value(element("setting", "tools", unit), count.to_string()));
                }
                (Field::FirmwareInfo, FieldValue::Text(text)) => {
                    updates.push(set_value(element("setting", "fw_info", unit), text.clone()));
                }
                // Raw connection flags surface through `category_changes`.
                _ => {}
            }
        }

        for change in &outcome.category_changes {
            for view in ["setting", "navbar"] {
                updates.push(set_class(
                    element(view, "conn", change.unit),
                    connection_class(change.category),
                ));
            }
        }

        updates.extend(
            outcome
                .log_lines
                .iter()
                .map(|line| ViewUpdate::AppendLog { line: line.clone() }),
        );
        updates
    }

    /// Render `outcome` into `adapter`.
    pub fn render<A: ViewAdapter + ?Sized>(outcome: &ApplyOutcome, adapter: &mut A) {
        for update in Self::updates(outcome) {
            adapter.apply(&update);
        }
    }
}

pub fn feeder_class(engaged: bool) -> &'static str {
    if engaged { CLASS_ENGAGED } else { CLASS_RELEASED }
}

pub fn connection_class(category: ConnectionCategory) -> &'static str {
    category.into()
}

/// Element value for a tool: the bare id the device reports, `-1` for none.
pub fn tool_value(tool: ToolSelection) -> String {
    match tool {
        ToolSelection::Tool(id) => id.to_string(),
        ToolSelection::NoTool => "-1".into(),
    }
}

fn element(view: &str, name: &str, unit: Unit) -> String {
    format!("SMuFF_{view}_{name}{}", unit.qualifier())
}

fn set_value(element: String, value: String) -> ViewUpdate {
    ViewUpdate::SetValue { element, value }
}

fn set_class(element: String, class: &str) -> ViewUpdate {
    ViewUpdate::SetClass {
        element,
        class: class.to_owned(),
    }
}
