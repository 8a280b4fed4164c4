//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use smuff_config::ConfigError;
use smuff_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const INVALID_INPUT: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input ────────────────────────────────────────────────────────
    #[error("Invalid {argument} '{value}'")]
    #[diagnostic(
        code(smuff::invalid_argument),
        help("Expected one of: {expected}\nRun: smuff actions")
    )]
    InvalidArgument {
        argument: String,
        value: String,
        expected: String,
    },

    // ── Transport ────────────────────────────────────────────────────
    #[error("Could not send '{command}'")]
    #[diagnostic(code(smuff::transport), help("{reason}"))]
    Transport { command: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid configuration value for {field}: {reason}")]
    #[diagnostic(
        code(smuff::config_invalid),
        help(
            "Fix the value in {path}\n\
             Or reset it with: smuff config init"
        )
    )]
    ConfigInvalid {
        field: String,
        reason: String,
        path: String,
    },

    #[error("Configuration could not be loaded: {message}")]
    #[diagnostic(code(smuff::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' needs an interactive terminal")]
    #[diagnostic(
        code(smuff::non_interactive),
        help("Use --yes (-y) to accept the defaults without prompting.")
    )]
    NonInteractive { action: String },

    #[error("Prompt failed: {reason}")]
    #[diagnostic(code(smuff::prompt))]
    Prompt { reason: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(smuff::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => exit_code::INVALID_INPUT,
            Self::ConfigInvalid { .. } | Self::Config { .. } => exit_code::CONFIG,
            Self::NonInteractive { .. } | Self::Prompt { .. } => exit_code::USAGE,
            Self::Transport { .. } | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidArgument {
                argument,
                value,
                expected,
            } => Self::InvalidArgument {
                argument,
                value,
                expected,
            },
            CoreError::Config { message } => Self::Config { message },
            CoreError::Transport { command, reason } => Self::Transport { command, reason },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::ConfigInvalid {
                field,
                reason,
                path: smuff_config::config_path().display().to_string(),
            },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}
