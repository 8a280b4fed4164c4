//! Action listing handler.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use smuff_core::Action;

use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Debug, Serialize)]
struct ActionInfo {
    action: Action,
    suffix: &'static str,
    description: &'static str,
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ActionRow {
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Suffix")]
    suffix: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

impl From<&ActionInfo> for ActionRow {
    fn from(a: &ActionInfo) -> Self {
        Self {
            action: a.action.to_string(),
            suffix: a.suffix,
            description: a.description,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(ctx: &Ctx) -> Result<(), CliError> {
    let actions: Vec<ActionInfo> = Action::iter()
        .map(|action| ActionInfo {
            action,
            suffix: action.suffix(),
            description: action.description(),
        })
        .collect();

    let out = output::render_list(ctx.output, &actions, |a| ActionRow::from(a), |a| {
        a.action.to_string()
    })?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
