//! Dispatch command handler.

use serde::Serialize;

use smuff_core::{Action, CommandDispatcher, Unit, parse_action, parse_unit};

use crate::cli::DispatchArgs;
use crate::error::CliError;
use crate::output;

use super::Ctx;

#[derive(Debug, Serialize)]
struct Dispatched {
    action: Action,
    unit: Unit,
    command: String,
}

pub fn handle(args: &DispatchArgs, ctx: &Ctx) -> Result<(), CliError> {
    let action = parse_action(&args.action)?;
    let unit = parse_unit(&args.unit)?;

    // stdout is the transport here: record, then print in the chosen format.
    let dispatcher = CommandDispatcher::new(ctx.panel.addresses.clone());
    let mut sent: Vec<String> = Vec::new();
    let command = dispatcher.send(action, unit, &mut sent)?;

    let record = Dispatched {
        action,
        unit,
        command,
    };
    let out = output::render_single(
        ctx.output,
        &record,
        |d| d.command.clone(),
        |d| d.command.clone(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
