//! Clap derive structures for the `smuff` CLI.
//!
//! Only depends on `clap` and `clap_complete`: `build.rs` includes this
//! file directly to render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// smuff -- status panel and command router for SMuFF filament changers
#[derive(Debug, Parser)]
#[command(
    name = "smuff",
    version,
    about = "Reconcile SMuFF status events and route panel commands",
    long_about = "Command-line front end for the SMuFF multi-unit filament changer panel.\n\n\
        Feeds JSON status events through the same reconciler the panel uses,\n\
        and prints the pseudo-commands a panel button would send to unit A or B.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "SMUFF_CONFIG_FILE", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format (defaults to `defaults.output` from the config)
    #[arg(long, short = 'o', env = "SMUFF_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the command line a panel action sends to a unit
    #[command(alias = "d")]
    Dispatch(DispatchArgs),

    /// List panel actions with their command suffixes
    Actions,

    /// Apply a file of status events and report what changed
    #[command(alias = "r")]
    Replay(ReplayArgs),

    /// Stream status events from stdin and print view updates as they apply
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Apply status events and print the per-unit status report
    Status(StatusArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Dispatch ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DispatchArgs {
    /// Action identifier (e.g. UNJAM, lid_open, motors-off)
    pub action: String,

    /// Target unit
    #[arg(long, short = 'u', default_value = "a")]
    pub unit: String,
}

// ── Event input ──────────────────────────────────────────────────────

/// Where status events come from.
#[derive(Debug, Args)]
pub struct EventSource {
    /// JSON-lines file of status events, or `-` for stdin
    #[arg(default_value = "-", value_name = "FILE")]
    pub input: PathBuf,

    /// Only accept `{"plugin": .., "data": ..}` envelopes from this plugin
    /// (defaults to `plugin_id` from the config)
    #[arg(long)]
    pub plugin: Option<String>,
}

#[derive(Debug, Args)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub source: EventSource,

    /// Skip the terminal log in table output
    #[arg(long)]
    pub no_terminal: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Plugin filter for enveloped messages
    #[arg(long)]
    pub plugin: Option<String>,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub source: EventSource,

    /// Report a single unit instead of both
    #[arg(long, short = 'u')]
    pub unit: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,

    /// Set the command address token of a unit
    SetAddress {
        /// Unit selector (a or b)
        unit: String,

        /// Address token prepended to every command (e.g. @SMuFF2)
        token: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
