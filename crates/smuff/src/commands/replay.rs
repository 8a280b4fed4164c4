//! Replay command handler: apply a file of events, report the diff.

use std::fmt::Write as _;

use serde::Serialize;
use tabled::Tabled;

use smuff_core::{
    Change, ConnectionCategory, FirmwareInfo, StatusReconciler, TerminalLine, Unit, UnitState,
};

use crate::cli::ReplayArgs;
use crate::error::CliError;
use crate::output;

use super::{Ctx, events};

// ── Report model ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChangeRecord {
    /// 1-based input line that produced the change.
    pub line: usize,
    #[serde(flatten)]
    pub change: Change,
}

#[derive(Debug, Serialize)]
pub struct UnitSummary {
    pub unit: Unit,
    pub category: ConnectionCategory,
    pub state: UnitState,
    pub firmware: Option<FirmwareInfo>,
}

impl UnitSummary {
    pub fn of(reconciler: &StatusReconciler, unit: Unit) -> Self {
        let state = reconciler.state(unit).clone();
        Self {
            unit,
            category: state.category(),
            firmware: state.firmware(),
            state,
        }
    }
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    events: usize,
    changes: Vec<ChangeRecord>,
    units: Vec<UnitSummary>,
    terminal: Vec<TerminalLine>,
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "Line")]
    line: usize,
    #[tabled(rename = "Unit")]
    unit: Unit,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&ChangeRecord> for ChangeRow {
    fn from(r: &ChangeRecord) -> Self {
        Self {
            line: r.line,
            unit: r.change.unit,
            field: r.change.field.to_string(),
            value: r.change.value.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct UnitRow {
    #[tabled(rename = "Unit")]
    unit: Unit,
    #[tabled(rename = "State")]
    category: String,
    #[tabled(rename = "Tool")]
    tool: String,
    #[tabled(rename = "Tools")]
    tools: String,
    #[tabled(rename = "Feeder")]
    feeder: String,
    #[tabled(rename = "Feeder 2")]
    feeder2: String,
    #[tabled(rename = "Firmware")]
    firmware: String,
}

impl UnitRow {
    pub fn new(summary: &UnitSummary, color: bool) -> Self {
        let s = &summary.state;
        Self {
            unit: summary.unit,
            category: output::paint_category(summary.category, color),
            tool: opt(s.selected_tool.as_ref()),
            tools: opt(s.tool_count.as_ref()),
            feeder: flag(s.feeder_engaged),
            feeder2: flag(s.feeder_two_engaged),
            firmware: summary
                .firmware
                .as_ref()
                .map(|fw| format!("{} {}", fw.name, fw.version))
                .or_else(|| s.firmware_info.clone())
                .unwrap_or_else(|| "-".into()),
        }
    }
}

fn opt<T: std::fmt::Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "-".into(), ToString::to_string)
}

fn flag(value: Option<bool>) -> String {
    match value {
        Some(true) => "on".into(),
        Some(false) => "off".into(),
        None => "-".into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: &ReplayArgs, ctx: &Ctx) -> Result<(), CliError> {
    let mut changes = Vec::new();
    let (reconciler, events) = events::replay_source(&args.source, ctx, |line, outcome| {
        changes.extend(
            outcome
                .changes
                .into_iter()
                .map(|change| ChangeRecord { line, change }),
        );
    })?;

    let report = ReplayReport {
        events,
        changes,
        units: Unit::ALL
            .into_iter()
            .map(|unit| UnitSummary::of(&reconciler, unit))
            .collect(),
        terminal: reconciler.terminal().lines().to_vec(),
    };

    let out = output::render_single(
        ctx.output,
        &report,
        |r| render_detail(r, !args.no_terminal, ctx.color),
        |r| {
            r.terminal
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

fn render_detail(report: &ReplayReport, with_terminal: bool, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} events, {} changes",
        report.events,
        report.changes.len()
    );

    if !report.changes.is_empty() {
        let rows: Vec<ChangeRow> = report.changes.iter().map(ChangeRow::from).collect();
        let _ = writeln!(out, "{}", output::render_table(&rows));
    }

    let rows: Vec<UnitRow> = report
        .units
        .iter()
        .map(|u| UnitRow::new(u, color))
        .collect();
    let _ = write!(out, "{}", output::render_table(&rows));

    if with_terminal && !report.terminal.is_empty() {
        let _ = writeln!(out, "\n\nTerminal:");
        for line in &report.terminal {
            let _ = writeln!(
                out,
                "  [{}] {}",
                line.received_at.format("%H:%M:%S"),
                line.text
            );
        }
    }
    out
}
