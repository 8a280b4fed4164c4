// ── Runtime panel configuration ──
//
// These types describe *who* the panel listens to and *where* commands
// go. They never touch disk: `smuff-config` builds a `PanelConfig` from
// TOML/env and hands it in.

use crate::error::CoreError;
use crate::model::Unit;

/// Plugin identifier the host stamps on SMuFF status messages.
pub const DEFAULT_PLUGIN_ID: &str = "SMuFF";

/// Device-address token prepended to unit A commands.
pub const DEFAULT_ADDRESS_A: &str = "@SMuFF";

/// Device-address token prepended to unit B commands.
pub const DEFAULT_ADDRESS_B: &str = "@SMuFF2";

/// The pair of device-address tokens, one per unit.
///
/// Tokens are opaque to the core beyond being prepended verbatim, but
/// they must be non-empty, free of whitespace, and distinct -- otherwise
/// two units would receive each other's commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressTokens {
    unit_a: String,
    unit_b: String,
}

impl AddressTokens {
    pub fn new(unit_a: impl Into<String>, unit_b: impl Into<String>) -> Result<Self, CoreError> {
        let unit_a = unit_a.into();
        let unit_b = unit_b.into();

        for (unit, token) in [(Unit::A, &unit_a), (Unit::B, &unit_b)] {
            if token.is_empty() {
                return Err(CoreError::Config {
                    message: format!("address token for unit {unit} is empty"),
                });
            }
            if token.chars().any(char::is_whitespace) {
                return Err(CoreError::Config {
                    message: format!("address token for unit {unit} contains whitespace: '{token}'"),
                });
            }
        }
        if unit_a == unit_b {
            return Err(CoreError::Config {
                message: format!("units A and B share the same address token '{unit_a}'"),
            });
        }

        Ok(Self { unit_a, unit_b })
    }

    pub fn get(&self, unit: Unit) -> &str {
        match unit {
            Unit::A => &self.unit_a,
            Unit::B => &self.unit_b,
        }
    }
}

impl Default for AddressTokens {
    fn default() -> Self {
        Self {
            unit_a: DEFAULT_ADDRESS_A.into(),
            unit_b: DEFAULT_ADDRESS_B.into(),
        }
    }
}

/// Configuration for one panel session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Only host messages stamped with this plugin id are reconciled.
    pub plugin_id: String,
    /// Per-unit device-address tokens for outbound commands.
    pub addresses: AddressTokens,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            plugin_id: DEFAULT_PLUGIN_ID.into(),
            addresses: AddressTokens::default(),
        }
    }
}
