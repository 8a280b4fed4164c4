//! State reconciliation and command routing for the SMuFF status panel.
//!
//! A SMuFF controller pushes sparse status events through the host's
//! plugin channel; the panel turns them into a view model for up to two
//! units and turns button presses back into device pseudo-commands.
//!
//! - **[`StatusReconciler`]**: Owns both [`UnitState`]s and the shared
//!   [`TerminalLog`]. [`apply()`](StatusReconciler::apply) merges one event
//!   (absent fields untouched, `terminal` lines appended) and returns an
//!   [`ApplyOutcome`] diff. Snapshots are broadcast to [`PanelStream`]
//!   subscribers.
//!
//! - **[`CommandDispatcher`]**: Pure mapping from `(`[`Action`]`, `[`Unit`]`)`
//!   to `<address-token> <suffix>`, with a [`CommandSink`] seam for the
//!   host transport.
//!
//! - **[`render`]**: [`ClassRenderer`](render::ClassRenderer) maps an
//!   outcome onto element ids and CSS classes for a [`ViewAdapter`](render::ViewAdapter).

pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod render;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Action, CommandDispatcher, CommandSink, parse_action, parse_unit};
pub use config::{AddressTokens, PanelConfig};
pub use error::CoreError;
pub use event::{Field, FieldValue};
pub use store::{
    ApplyOutcome, CategoryChange, Change, PanelSnapshot, StatusReconciler, TerminalLine,
    TerminalLog,
};
pub use stream::PanelStream;

pub use model::{ConnectionCategory, FirmwareInfo, ToolSelection, Unit, UnitPair, UnitState};
