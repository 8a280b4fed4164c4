// ── Core error types ──
//
// The inbound status path never fails: unrecognized input is dropped.
// Errors only surface on the outbound path (bad action / unit selectors,
// transport hand-off) and when building runtime configuration.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Caller errors ────────────────────────────────────────────────
    #[error("Invalid {argument} '{value}' (expected one of: {expected})")]
    InvalidArgument {
        argument: String,
        value: String,
        expected: String,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Transport errors (raised by `CommandSink` implementations) ───
    #[error("Failed to hand command '{command}' to transport: {reason}")]
    Transport { command: String, reason: String },
}

impl CoreError {
    pub(crate) fn invalid_argument(
        argument: &str,
        value: &str,
        expected: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        let expected = expected
            .into_iter()
            .map(|e| e.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(", ");
        Self::InvalidArgument {
            argument: argument.into(),
            value: value.into(),
            expected,
        }
    }
}
