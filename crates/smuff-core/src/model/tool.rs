// ── Tool selection ──

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Accepts `4`, `T4`, `t4`, `-1`, `T-1` (surrounding whitespace ignored).
static TOOL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[Tt]?\s*(-?\d+)$").expect("tool id pattern is valid"));

/// The tool a unit reports as selected.
///
/// `NoTool` is an explicit report ("nothing selected"), which is different
/// from never having heard about the tool at all (`Option::None` on
/// [`UnitState`](super::UnitState)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ToolSelection {
    Tool(u32),
    NoTool,
}

impl ToolSelection {
    /// Normalize a raw tool id. Negative ids (the device reports `-1`) and
    /// ids that do not fit a `u32` mean no tool is selected.
    pub fn from_id(id: i64) -> Self {
        u32::try_from(id).map_or(Self::NoTool, Self::Tool)
    }

    /// Parse the textual form the device and host use (`"T3"`, `"3"`, `"T-1"`).
    ///
    /// Returns `None` for text that carries no tool number at all. Digits
    /// too long for any id still mean no tool.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = TOOL_ID.captures(text.trim())?;
        let digits = caps.get(1)?.as_str();
        Some(digits.parse::<i64>().map_or(Self::NoTool, Self::from_id))
    }
}

impl fmt::Display for ToolSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tool(id) => write!(f, "T{id}"),
            Self::NoTool => f.write_str("none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_ids_mean_no_tool() {
        assert_eq!(ToolSelection::from_id(-1), ToolSelection::NoTool);
        assert_eq!(ToolSelection::from_id(0), ToolSelection::Tool(0));
        assert_ne!(ToolSelection::from_id(-1), ToolSelection::from_id(0));
    }

    #[test]
    fn parses_device_notation() {
        assert_eq!(ToolSelection::parse("T4"), Some(ToolSelection::Tool(4)));
        assert_eq!(ToolSelection::parse(" 7 "), Some(ToolSelection::Tool(7)));
        assert_eq!(ToolSelection::parse("T-1"), Some(ToolSelection::NoTool));
        assert_eq!(ToolSelection::parse("-1"), Some(ToolSelection::NoTool));
        assert_eq!(ToolSelection::parse("99999999999999999999"), Some(ToolSelection::NoTool));
        assert_eq!(ToolSelection::parse("T-99999999999999999999"), Some(ToolSelection::NoTool));
        assert_eq!(ToolSelection::parse("tool"), None);
        assert_eq!(ToolSelection::parse(""), None);
    }

    #[test]
    fn display_uses_none_marker() {
        assert_eq!(ToolSelection::Tool(3).to_string(), "T3");
        assert_eq!(ToolSelection::NoTool.to_string(), "none");
    }
}
