// ── Panel domain model ──
//
// Canonical per-unit view model. Everything here is plain data: the
// reconciler owns the live instances, consumers only ever see borrows
// or cloned snapshots.

pub mod firmware;
pub mod state;
pub mod tool;
pub mod unit;

// ── Re-exports ──────────────────────────────────────────────────────

pub use firmware::FirmwareInfo;
pub use state::{ConnectionCategory, UnitState};
pub use tool::ToolSelection;
pub use unit::{Unit, UnitPair};
