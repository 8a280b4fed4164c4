//! Config subcommand handlers.

use std::io::IsTerminal;
use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use smuff_config::{self as config, Config};
use smuff_core::{Unit, parse_unit};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

fn target_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config::config_path)
}

fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(config::load_config_from(&target_path(global))?)
}

fn save(cfg: &Config, global: &GlobalOpts) -> Result<PathBuf, CliError> {
    // Never write a file the panel would refuse to load.
    cfg.to_panel_config()?;
    let path = target_path(global);
    config::save_config_to(cfg, &path)?;
    Ok(path)
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Prompt {
        reason: e.to_string(),
    }
}

fn prompt_token(unit: Unit, default: &str) -> Result<String, CliError> {
    Input::new()
        .with_prompt(format!("Address token for unit {unit}"))
        .default(default.to_owned())
        .validate_with(|input: &String| {
            if input.is_empty() || input.chars().any(char::is_whitespace) {
                Err("token must be non-empty and contain no whitespace")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_err)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: guided setup ──────────────────────────────────────
        ConfigCommand::Init => {
            let path = target_path(global);
            let mut cfg = Config::default();

            if global.yes {
                let path = save(&cfg, global)?;
                eprintln!("✓ Default configuration written to {}", path.display());
                return Ok(());
            }
            if !std::io::stdin().is_terminal() {
                return Err(CliError::NonInteractive {
                    action: "config init".into(),
                });
            }

            eprintln!("SMuFF panel configuration");
            eprintln!("   Config path: {}\n", path.display());

            if path.exists() {
                let overwrite = Confirm::new()
                    .with_prompt("A config file already exists. Overwrite it?")
                    .default(false)
                    .interact()
                    .map_err(prompt_err)?;
                if !overwrite {
                    eprintln!("Aborted; nothing written.");
                    return Ok(());
                }
            }

            cfg.plugin_id = Input::new()
                .with_prompt("Host plugin identifier")
                .default(cfg.plugin_id.clone())
                .interact_text()
                .map_err(prompt_err)?;
            for unit in Unit::ALL {
                let token = prompt_token(unit, cfg.addresses.get(unit))?;
                cfg.addresses.set(unit, token);
            }

            let path = save(&cfg, global)?;
            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Try it: smuff dispatch status --unit b");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = load(global)?;
            let format = global.output.unwrap_or(OutputFormat::Table);
            let out = match format {
                OutputFormat::Table | OutputFormat::Plain => cfg.to_toml_string()?,
                structured => output::render_structured(structured, &cfg)?,
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", target_path(global).display());
            Ok(())
        }

        // ── SetAddress <unit> <token> ───────────────────────────────
        ConfigCommand::SetAddress { unit, token } => {
            let unit = parse_unit(&unit)?;
            let mut cfg = load(global)?;
            cfg.addresses.set(unit, token.clone());
            save(&cfg, global)?;
            eprintln!("✓ Unit {unit} now addressed as '{token}'");
            Ok(())
        }
    }
}
