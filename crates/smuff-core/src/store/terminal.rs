// ── Shared terminal log ──
//
// Append-only, unbounded. The view layer decides how much to show.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Unit;

/// One line of device / plugin output, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalLine {
    pub text: String,
    /// Unit whose status key carried the line (`terminal` vs `terminalB`).
    pub source: Unit,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct TerminalLog {
    lines: Vec<TerminalLine>,
}

impl TerminalLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, source: Unit, text: String) {
        self.lines.push(TerminalLine {
            text,
            source,
            received_at: Utc::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[TerminalLine] {
        &self.lines
    }

    /// Line texts in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    pub fn last(&self) -> Option<&TerminalLine> {
        self.lines.last()
    }
}
