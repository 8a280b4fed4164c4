//! Behavioural properties of the status reconciler and dispatcher,
//! exercised through the public API only.
#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use smuff_core::{
    Action, CommandDispatcher, ConnectionCategory, Field, FieldValue, StatusReconciler,
    ToolSelection, Unit, UnitState,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// A reconciler with every field of both units populated.
fn populated() -> StatusReconciler {
    let mut rec = StatusReconciler::new();
    rec.apply(&json!({
        "tool": 1, "tools": 5, "feeder": false, "feeder2": true,
        "fw_info": "FW-A", "conn": true, "jammed": false,
        "toolB": 2, "toolsB": 3, "feederB": true, "feeder2B": false,
        "fw_infoB": "FW-B", "connB": true, "jammedB": false,
    }));
    rec
}

fn full_state(rec: &StatusReconciler) -> (UnitState, UnitState) {
    (rec.state(Unit::A).clone(), rec.state(Unit::B).clone())
}

// ── Partial updates ─────────────────────────────────────────────────

#[test]
fn absent_fields_are_never_touched() {
    let mut rec = populated();
    let before = full_state(&rec);

    let events = [
        json!({}),
        json!({"terminal": "ok"}),
        json!({"unrelated": 1, "type": "status"}),
        json!({"tool": null, "connB": null}),
    ];
    for event in &events {
        rec.apply(event);
    }

    assert_eq!(full_state(&rec), before);
}

#[test]
fn single_field_update_leaves_siblings_alone() {
    let mut rec = populated();
    let before = rec.state(Unit::A).clone();

    rec.apply(&json!({"feeder": true}));

    let after = rec.state(Unit::A);
    assert_eq!(after.feeder_engaged, Some(true));
    assert_eq!(
        UnitState {
            feeder_engaged: before.feeder_engaged,
            ..after.clone()
        },
        before
    );
}

#[test]
fn no_tool_sentinel_is_distinct_from_tool_zero() {
    let mut rec = StatusReconciler::new();

    rec.apply(&json!({"tool": 0}));
    assert_eq!(rec.state(Unit::A).selected_tool, Some(ToolSelection::Tool(0)));

    for sentinel in [json!(-1), json!("-1"), json!("T-1")] {
        rec.apply(&json!({"tool": 0}));
        let outcome = rec.apply(&json!({ "tool": sentinel }));
        assert_eq!(rec.state(Unit::A).selected_tool, Some(ToolSelection::NoTool));
        assert_eq!(
            outcome.changes[0].value,
            FieldValue::Tool(ToolSelection::NoTool)
        );
    }
    assert_ne!(ToolSelection::NoTool, ToolSelection::Tool(0));
}

#[test]
fn out_of_range_tool_ids_mean_no_tool() {
    let mut rec = StatusReconciler::new();
    let out_of_range = [
        json!(4_294_967_296_u64),
        json!(u64::MAX),
        json!("99999999999999999999"),
        json!("T99999999999999999999"),
        json!(-1.0),
        json!(-2.5),
    ];

    for raw in out_of_range {
        rec.apply(&json!({"tool": 2}));
        let outcome = rec.apply(&json!({ "tool": raw.clone() }));
        assert_eq!(
            rec.state(Unit::A).selected_tool,
            Some(ToolSelection::NoTool),
            "tool = {raw}"
        );
        assert_eq!(outcome.changes.len(), 1, "tool = {raw}");
    }
}

#[test]
fn jam_takes_precedence_over_connection() {
    let mut rec = StatusReconciler::new();
    rec.apply(&json!({"jammed": true, "conn": true}));

    assert_eq!(rec.category(Unit::A), ConnectionCategory::Jammed);
    // Raw flags are stored as given.
    assert_eq!(rec.state(Unit::A).connected, Some(true));
    assert_eq!(rec.state(Unit::A).jammed, Some(true));

    rec.apply(&json!({"jammed": false}));
    assert_eq!(rec.category(Unit::A), ConnectionCategory::Connected);
}

// ── Terminal log ────────────────────────────────────────────────────

#[test]
fn terminal_log_grows_by_one_per_event_in_order() {
    let mut rec = StatusReconciler::new();
    let lines: Vec<String> = (0..25).map(|i| format!("line {i}")).collect();

    for (i, line) in lines.iter().enumerate() {
        let outcome = rec.apply(&json!({ "terminal": line, "tool": i % 3 }));
        assert!(outcome.log_grew());
        assert_eq!(rec.terminal().len(), i + 1);
    }

    assert_eq!(rec.terminal().texts().collect::<Vec<_>>(), lines);
}

#[test]
fn repeated_terminal_lines_are_all_kept() {
    let mut rec = StatusReconciler::new();
    let event = json!({"terminal": "Not connected"});
    rec.apply(&event);
    rec.apply(&event);

    assert_eq!(rec.terminal().len(), 2);
    // The terminal field never lands in unit state.
    assert_eq!(rec.state(Unit::A), &UnitState::default());
}

// ── Idempotence ─────────────────────────────────────────────────────

#[test]
fn applying_an_event_twice_equals_applying_it_once() {
    let event = json!({
        "tool": "T3", "feeder": "on", "feeder2B": true,
        "connB": false, "jammed": true, "fw_info": "FW",
    });

    let mut once = StatusReconciler::new();
    once.apply(&event);

    let mut twice = StatusReconciler::new();
    twice.apply(&event);
    let second = twice.apply(&event);

    assert_eq!(full_state(&once), full_state(&twice));
    assert!(second.changes.is_empty());
    assert!(second.category_changes.is_empty());
}

// ── Unit isolation ──────────────────────────────────────────────────

#[test]
fn mixed_event_routes_each_field_to_its_unit() {
    let mut rec = populated();
    let b_before = rec.state(Unit::B).clone();

    rec.apply(&json!({"tool": 3, "feeder": true, "connB": false}));

    let a = rec.state(Unit::A);
    assert_eq!(a.selected_tool, Some(ToolSelection::Tool(3)));
    assert_eq!(a.feeder_engaged, Some(true));

    assert_eq!(rec.category(Unit::B), ConnectionCategory::Disconnected);
    let b = rec.state(Unit::B);
    assert_eq!(
        UnitState {
            connected: b_before.connected,
            ..b.clone()
        },
        b_before
    );
}

#[test]
fn outcome_lists_changes_per_unit() {
    let mut rec = StatusReconciler::new();
    let outcome = rec.apply(&json!({"tool": 3, "feeder": true, "connB": false}));

    let a: Vec<Field> = outcome.changes_for(Unit::A).map(|c| c.field).collect();
    let b: Vec<Field> = outcome.changes_for(Unit::B).map(|c| c.field).collect();
    assert_eq!(a.len(), 2);
    assert!(a.contains(&Field::SelectedTool) && a.contains(&Field::FeederEngaged));
    assert_eq!(b, vec![Field::Connected]);
}

// ── Malformed input ─────────────────────────────────────────────────

#[test]
fn malformed_events_are_dropped_without_side_effects() {
    let mut rec = populated();
    let before = full_state(&rec);
    let log_len = rec.terminal().len();

    let garbage: [Value; 6] = [
        json!(null),
        json!("status"),
        json!([1, 2, 3]),
        json!(42),
        json!({"tool": {"nested": true}, "feeder": "sideways", "tools": -2}),
        json!({"Tool": 1, "FEEDER": true, "connb": true}),
    ];
    for event in &garbage {
        assert!(rec.apply(event).is_empty());
    }

    assert_eq!(full_state(&rec), before);
    assert_eq!(rec.terminal().len(), log_len);
}

// ── Dispatch ────────────────────────────────────────────────────────

#[test]
fn unjam_lines_differ_only_in_address_token() {
    let dispatcher = CommandDispatcher::default();
    let a = dispatcher.dispatch(Action::Unjam, Unit::A);
    let b = dispatcher.dispatch(Action::Unjam, Unit::B);

    assert_ne!(a, b);
    let (token_a, suffix_a) = a.split_once(' ').unwrap();
    let (token_b, suffix_b) = b.split_once(' ').unwrap();
    assert_eq!(suffix_a, "UNJAM");
    assert_eq!(suffix_b, "UNJAM");
    assert_ne!(token_a, token_b);
}

#[test]
fn dispatch_is_deterministic() {
    let dispatcher = CommandDispatcher::default();
    for unit in Unit::ALL {
        assert_eq!(
            dispatcher.dispatch(Action::ResetStats, unit),
            dispatcher.dispatch(Action::ResetStats, unit)
        );
    }
    assert_eq!(dispatcher.dispatch(Action::ResetStats, Unit::A), "@SMuFF RESETAVG");
}
