//! Reading status events from files or stdin.
//!
//! One JSON value per line. A line is either a bare status event or a host
//! envelope `{"plugin": "SMuFF", "data": {...}}`; envelopes go through the
//! reconciler's plugin filter. Blank lines and `#` comments are skipped,
//! unparseable lines are logged and dropped like any other bad input.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::warn;

use smuff_core::{ApplyOutcome, StatusReconciler};

use crate::cli::EventSource;
use crate::error::CliError;

use super::Ctx;

#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Bare(Value),
    Enveloped { plugin: String, data: Value },
}

/// Parse one input line; `None` for blanks, comments and junk.
pub fn parse_line(number: usize, line: &str) -> Option<Inbound> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            warn!(line = number, error = %e, "skipping unparseable event line");
            return None;
        }
    };

    Some(split_envelope(value))
}

fn split_envelope(value: Value) -> Inbound {
    let Value::Object(mut map) = value else {
        return Inbound::Bare(value);
    };
    let is_envelope = map.len() == 2
        && map.get("plugin").is_some_and(Value::is_string)
        && map.contains_key("data");
    if !is_envelope {
        return Inbound::Bare(Value::Object(map));
    }

    let plugin = match map.remove("plugin") {
        Some(Value::String(plugin)) => plugin,
        _ => String::new(),
    };
    let data = map.remove("data").unwrap_or(Value::Null);
    Inbound::Enveloped { plugin, data }
}

impl Inbound {
    pub fn apply_to(&self, reconciler: &mut StatusReconciler) -> ApplyOutcome {
        match self {
            Self::Bare(event) => reconciler.apply(event),
            Self::Enveloped { plugin, data } => reconciler.apply_plugin_message(plugin, data),
        }
    }
}

/// Reconciler honouring `--plugin` over the configured plugin id.
pub fn reconciler_for(plugin: Option<&str>, ctx: &Ctx) -> StatusReconciler {
    match plugin {
        Some(plugin) => StatusReconciler::with_plugin_id(plugin),
        None => StatusReconciler::from_config(&ctx.panel),
    }
}

/// Read the whole source (`-` is stdin).
pub fn read_source(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Apply every event in `source`, handing each outcome to `on_outcome`
/// with its 1-based line number.
pub fn replay_source(
    source: &EventSource,
    ctx: &Ctx,
    mut on_outcome: impl FnMut(usize, ApplyOutcome),
) -> Result<(StatusReconciler, usize), CliError> {
    let text = read_source(&source.input)?;
    let mut reconciler = reconciler_for(source.plugin.as_deref(), ctx);
    let mut applied = 0;

    for (idx, line) in text.lines().enumerate() {
        let number = idx + 1;
        let Some(inbound) = parse_line(number, line) else {
            continue;
        };
        applied += 1;
        on_outcome(number, inbound.apply_to(&mut reconciler));
    }

    Ok((reconciler, applied))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn skips_blank_comment_and_junk_lines() {
        assert_eq!(parse_line(1, "   "), None);
        assert_eq!(parse_line(2, "# header"), None);
        assert_eq!(parse_line(3, "{not json"), None);
    }

    #[test]
    fn detects_envelopes() {
        let inbound = parse_line(1, r#"{"plugin": "SMuFF", "data": {"tool": 2}}"#).unwrap();
        assert_eq!(
            inbound,
            Inbound::Enveloped {
                plugin: "SMuFF".into(),
                data: json!({"tool": 2}),
            }
        );

        // An extra key means it's a plain status event.
        let inbound = parse_line(2, r#"{"plugin": "x", "data": 1, "tool": 2}"#).unwrap();
        assert!(matches!(inbound, Inbound::Bare(_)));
    }

    #[test]
    fn envelope_from_other_plugin_is_ignored() {
        let mut rec = StatusReconciler::new();
        let inbound = parse_line(1, r#"{"plugin": "other", "data": {"tool": 2}}"#).unwrap();
        assert!(inbound.apply_to(&mut rec).is_empty());

        let inbound = parse_line(2, r#"{"plugin": "SMuFF", "data": {"tool": 2}}"#).unwrap();
        assert_eq!(inbound.apply_to(&mut rec).changes.len(), 1);
    }
}
