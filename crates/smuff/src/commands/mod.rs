//! Command dispatch: bridges CLI args -> core reconciler/dispatcher -> output.

pub mod actions;
pub mod config_cmd;
pub mod dispatch;
pub mod events;
pub mod replay;
pub mod status;
pub mod watch;

use clap::ValueEnum;

use smuff_config::Config;
use smuff_core::PanelConfig;

use crate::cli::{ColorMode, Command, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Resolved settings shared by every handler: config file values with
/// command-line flags layered on top.
#[derive(Debug)]
pub struct Ctx {
    pub panel: PanelConfig,
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

impl Ctx {
    pub fn new(cfg: &Config, global: &GlobalOpts) -> Result<Self, CliError> {
        let output = match global.output {
            Some(format) => format,
            None => parse_setting("defaults.output", &cfg.defaults.output)?,
        };
        let color = match global.color {
            Some(mode) => mode,
            None => parse_setting::<ColorMode>("defaults.color", &cfg.defaults.color)?,
        };

        Ok(Self {
            panel: cfg.to_panel_config()?,
            output,
            color: output::should_color(color),
            quiet: global.quiet,
        })
    }
}

fn parse_setting<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::ConfigInvalid {
        field: field.into(),
        reason,
        path: smuff_config::config_path().display().to_string(),
    })
}

/// Dispatch a config-backed command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Ctx) -> Result<(), CliError> {
    match cmd {
        Command::Dispatch(args) => dispatch::handle(&args, ctx),
        Command::Actions => actions::handle(ctx),
        Command::Replay(args) => replay::handle(&args, ctx),
        Command::Status(args) => status::handle(&args, ctx),
        Command::Watch(args) => watch::handle(&args, ctx).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
