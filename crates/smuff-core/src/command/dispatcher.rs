// ── Command dispatcher ──

use strum::IntoEnumIterator;
use tracing::info;

use super::Action;
use crate::config::AddressTokens;
use crate::error::CoreError;
use crate::model::Unit;

/// Hand-off point to the host transport.
///
/// Implementations deliver one command line; delivery, queueing and
/// retries are entirely theirs.
pub trait CommandSink {
    fn send(&mut self, line: &str) -> Result<(), CoreError>;
}

/// Records lines instead of sending them.
impl CommandSink for Vec<String> {
    fn send(&mut self, line: &str) -> Result<(), CoreError> {
        self.push(line.to_owned());
        Ok(())
    }
}

/// Maps `(Action, Unit)` to `<address-token> <command-suffix>`.
///
/// Stateless beyond its fixed address tokens: the same pair always yields
/// the same line.
#[derive(Debug, Clone, Default)]
pub struct CommandDispatcher {
    addresses: AddressTokens,
}

impl CommandDispatcher {
    pub fn new(addresses: AddressTokens) -> Self {
        Self { addresses }
    }

    pub fn dispatch(&self, action: Action, unit: Unit) -> String {
        format!("{} {}", self.addresses.get(unit), action.suffix())
    }

    /// Textual entry point for callers holding raw identifiers.
    ///
    /// Unknown actions or units are rejected: a wrong device command is
    /// worse than no command.
    pub fn dispatch_str(&self, action: &str, unit: &str) -> Result<String, CoreError> {
        Ok(self.dispatch(parse_action(action)?, parse_unit(unit)?))
    }

    /// Dispatch and forward to `sink`, returning the line that was sent.
    pub fn send<S>(&self, action: Action, unit: Unit, sink: &mut S) -> Result<String, CoreError>
    where
        S: CommandSink + ?Sized,
    {
        let line = self.dispatch(action, unit);
        info!(%unit, %action, command = %line, "dispatching SMuFF command");
        sink.send(&line)?;
        Ok(line)
    }
}

/// Parse an action identifier (`LID_OPEN`, `lid_open`, `lid-open`).
pub fn parse_action(raw: &str) -> Result<Action, CoreError> {
    raw.trim()
        .replace('-', "_")
        .parse()
        .map_err(|_| CoreError::invalid_argument("action", raw, Action::iter().map(<&str>::from)))
}

/// Parse a unit selector (`A`/`B`, any case).
pub fn parse_unit(raw: &str) -> Result<Unit, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::invalid_argument("unit", raw, Unit::ALL.map(|u| u.to_string())))
}
