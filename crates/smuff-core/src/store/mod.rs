// ── Panel state store ──
//
// Single owner of both unit states and the shared terminal log.
// Changes are reported as a pure diff and broadcast as snapshots.

mod reconciler;
mod terminal;

pub use reconciler::{ApplyOutcome, CategoryChange, Change, PanelSnapshot, StatusReconciler};
pub use terminal::{TerminalLine, TerminalLog};
