//! Status command handler: per-unit reports after applying events.

use smuff_core::{Unit, parse_unit};

use crate::cli::{OutputFormat, StatusArgs};
use crate::error::CliError;
use crate::output;

use super::replay::{UnitRow, UnitSummary};
use super::{Ctx, events};

pub fn handle(args: &StatusArgs, ctx: &Ctx) -> Result<(), CliError> {
    let units: Vec<Unit> = match args.unit.as_deref() {
        Some(raw) => vec![parse_unit(raw)?],
        None => Unit::ALL.to_vec(),
    };

    let (reconciler, _) = events::replay_source(&args.source, ctx, |_, _| {})?;
    let summaries: Vec<UnitSummary> = units
        .iter()
        .map(|&unit| UnitSummary::of(&reconciler, unit))
        .collect();

    let out = match ctx.output {
        // The device's own report layout reads best as-is.
        OutputFormat::Table => summaries
            .iter()
            .map(|s| s.state.report(s.unit))
            .collect::<Vec<_>>()
            .join("\n"),
        format => output::render_list(
            format,
            &summaries,
            |s| UnitRow::new(s, false),
            |s| format!("{}\t{}", s.unit, s.category),
        )?,
    };
    output::print_output(out.trim_end(), ctx.quiet);
    Ok(())
}
