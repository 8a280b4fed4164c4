// ── Status reconciler ──
//
// Merges sparse status events into the per-unit view model. A field that
// is missing from an event never touches stored state; a field that is
// present always overwrites, but only a *different* value is reported
// as a change.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::{debug, trace};

use super::terminal::TerminalLog;
use crate::config::{DEFAULT_PLUGIN_ID, PanelConfig};
use crate::event::{self, Field, FieldValue, Slot};
use crate::model::{ConnectionCategory, Unit, UnitPair, UnitState};
use crate::stream::PanelStream;

/// A stored field that took a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub unit: Unit,
    pub field: Field,
    pub value: FieldValue,
}

/// A unit whose derived connection category flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChange {
    pub unit: Unit,
    pub category: ConnectionCategory,
}

/// Everything one `apply` call did, for the rendering adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub changes: Vec<Change>,
    /// Lines appended to the shared terminal log, in order.
    pub log_lines: Vec<String>,
    pub category_changes: Vec<CategoryChange>,
}

impl ApplyOutcome {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.log_lines.is_empty() && self.category_changes.is_empty()
    }

    pub fn log_grew(&self) -> bool {
        !self.log_lines.is_empty()
    }

    pub fn changes_for(&self, unit: Unit) -> impl Iterator<Item = &Change> {
        self.changes.iter().filter(move |c| c.unit == unit)
    }
}

/// Immutable view broadcast to subscribers after every effective update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    /// Bumped once per `apply` that changed anything.
    pub version: u64,
    pub units: UnitPair<UnitState>,
    pub terminal_len: usize,
}

impl PanelSnapshot {
    pub fn category(&self, unit: Unit) -> ConnectionCategory {
        self.units[unit].category()
    }
}

/// Sole owner of both unit states and the terminal log.
///
/// `apply` is synchronous and total: unrecognized keys, malformed values
/// and non-object events are dropped (logged at `debug`), never errors.
pub struct StatusReconciler {
    plugin_id: String,
    units: UnitPair<UnitState>,
    terminal: TerminalLog,
    version: u64,
    snapshot: watch::Sender<Arc<PanelSnapshot>>,
}

impl StatusReconciler {
    pub fn new() -> Self {
        Self::with_plugin_id(DEFAULT_PLUGIN_ID)
    }

    pub fn with_plugin_id(plugin_id: impl Into<String>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(PanelSnapshot::default()));
        Self {
            plugin_id: plugin_id.into(),
            units: UnitPair::default(),
            terminal: TerminalLog::new(),
            version: 0,
            snapshot,
        }
    }

    pub fn from_config(config: &PanelConfig) -> Self {
        Self::with_plugin_id(config.plugin_id.clone())
    }

    // ── Inbound ──────────────────────────────────────────────────────

    /// Reconcile a host plugin message, ignoring other plugins' traffic.
    pub fn apply_plugin_message(&mut self, plugin: &str, message: &Value) -> ApplyOutcome {
        if plugin != self.plugin_id {
            trace!(plugin, expected = %self.plugin_id, "ignoring message for another plugin");
            return ApplyOutcome::default();
        }
        self.apply(message)
    }

    /// Reconcile one status event. Anything but a JSON object is a no-op.
    pub fn apply(&mut self, event: &Value) -> ApplyOutcome {
        let Value::Object(fields) = event else {
            debug!(kind = json_kind(event), "dropping non-object status event");
            return ApplyOutcome::default();
        };
        self.apply_fields(fields)
    }

    pub fn apply_fields(&mut self, fields: &Map<String, Value>) -> ApplyOutcome {
        let before = self.units.map(|_, s| s.category());
        let mut outcome = ApplyOutcome::default();

        for (key, raw) in fields {
            // `null` is how the host spells "not part of this update".
            if raw.is_null() {
                continue;
            }
            let Some((unit, slot)) = event::resolve(key) else {
                debug!(key = %key, "ignoring unrecognized status field");
                continue;
            };

            match slot {
                Slot::Meta => {}
                Slot::Terminal => {
                    if let Some(text) = event::terminal_text(raw) {
                        self.terminal.push(unit, text.clone());
                        outcome.log_lines.push(text);
                    } else {
                        debug!(key = %key, value = %raw, "ignoring non-scalar terminal value");
                    }
                }
                Slot::State(field) => {
                    let Some(value) = field.decode(raw) else {
                        debug!(key = %key, value = %raw, "ignoring malformed status value");
                        continue;
                    };
                    if self.units[unit].store(field, value.clone()) {
                        trace!(%unit, %field, ?value, "unit state changed");
                        outcome.changes.push(Change { unit, field, value });
                    }
                }
            }
        }

        for unit in Unit::ALL {
            let category = self.units[unit].category();
            if category != before[unit] {
                outcome.category_changes.push(CategoryChange { unit, category });
            }
        }

        if !outcome.is_empty() {
            self.publish();
        }
        outcome
    }

    // ── Read access ──────────────────────────────────────────────────

    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    pub fn state(&self, unit: Unit) -> &UnitState {
        &self.units[unit]
    }

    pub fn category(&self, unit: Unit) -> ConnectionCategory {
        self.units[unit].category()
    }

    pub fn terminal(&self) -> &TerminalLog {
        &self.terminal
    }

    /// Latest published snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<PanelSnapshot> {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> PanelStream {
        PanelStream::new(self.snapshot.subscribe())
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn publish(&mut self) {
        self.version += 1;
        let snap = Arc::new(PanelSnapshot {
            version: self.version,
            units: self.units.clone(),
            terminal_len: self.terminal.len(),
        });
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|current| *current = snap);
    }
}

impl Default for StatusReconciler {
    fn default() -> Self {
        Self::new()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ToolSelection;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn reports_only_effective_changes() {
        let mut rec = StatusReconciler::new();
        let first = rec.apply(&json!({"tool": 2, "feeder": true}));
        assert_eq!(first.changes.len(), 2);

        let second = rec.apply(&json!({"tool": 2, "feeder": false}));
        assert_eq!(
            second.changes,
            vec![Change {
                unit: Unit::A,
                field: Field::FeederEngaged,
                value: FieldValue::Flag(false),
            }]
        );
    }

    #[test]
    fn null_is_treated_as_absent() {
        let mut rec = StatusReconciler::new();
        rec.apply(&json!({"tool": 4}));
        let outcome = rec.apply(&json!({"tool": null, "terminal": null}));

        assert!(outcome.is_empty());
        assert_eq!(rec.state(Unit::A).selected_tool, Some(ToolSelection::Tool(4)));
        assert!(rec.terminal().is_empty());
    }

    #[test]
    fn category_change_is_reported_once() {
        let mut rec = StatusReconciler::new();
        let outcome = rec.apply(&json!({"conn": true}));
        assert_eq!(
            outcome.category_changes,
            vec![CategoryChange {
                unit: Unit::A,
                category: ConnectionCategory::Connected,
            }]
        );

        let outcome = rec.apply(&json!({"conn": true, "jammed": false}));
        assert!(outcome.category_changes.is_empty());

        let outcome = rec.apply(&json!({"jammed": true}));
        assert_eq!(outcome.category_changes[0].category, ConnectionCategory::Jammed);
    }

    #[test]
    fn other_plugins_are_ignored() {
        let mut rec = StatusReconciler::new();
        let outcome = rec.apply_plugin_message("octolapse", &json!({"tool": 1}));
        assert!(outcome.is_empty());
        assert_eq!(rec.state(Unit::A).selected_tool, None);

        rec.apply_plugin_message("SMuFF", &json!({"tool": 1}));
        assert_eq!(rec.state(Unit::A).selected_tool, Some(ToolSelection::Tool(1)));
    }

    #[test]
    fn snapshot_version_tracks_effective_updates() {
        let mut rec = StatusReconciler::new();
        assert_eq!(rec.snapshot().version, 0);

        rec.apply(&json!({"feederB": true}));
        rec.apply(&json!({"feederB": true}));
        rec.apply(&json!({"unknown": 1}));

        let snap = rec.snapshot();
        assert_eq!(snap.version, 1);
        assert_eq!(snap.units.b.feeder_engaged, Some(true));
    }
}
