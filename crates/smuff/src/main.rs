mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::Ctx;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Config is loaded up front so `log.json` can shape the subscriber;
    // a broken file only fails commands that actually need it.
    let loaded = match cli.global.config.as_deref() {
        Some(path) => smuff_config::load_config_from(path),
        None => smuff_config::load_config(),
    };

    let json_logs = cli.global.log_json || loaded.as_ref().is_ok_and(|cfg| cfg.log.json);
    init_tracing(cli.global.verbose, json_logs);

    if let Err(err) = run(cli, loaded).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(
    cli: Cli,
    loaded: Result<smuff_config::Config, smuff_config::ConfigError>,
) -> Result<(), CliError> {
    match cli.command {
        // Config commands must work even when the file is broken
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "smuff", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let ctx = Ctx::new(&loaded?, &cli.global)?;
            tracing::debug!(command = ?cmd, "running command");
            commands::dispatch(cmd, &ctx).await
        }
    }
}
