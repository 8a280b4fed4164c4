// ── Command API ──
//
// User intents are a closed `Action` enum. The dispatcher turns an
// `(Action, Unit)` pair into the pseudo-command line the host forwards
// to the device firmware.

pub mod dispatcher;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

pub use dispatcher::{CommandDispatcher, CommandSink, parse_action, parse_unit};

/// Every button the panel offers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    EnumMessage,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Action {
    #[strum(message = "Query the status from SMuFF.")]
    Status,
    #[strum(message = "Toggle dumping of raw sent/received data (for debugging only).")]
    Debug,
    #[strum(message = "Wipe nozzle.")]
    Wipe,
    #[strum(message = "Cut filament.")]
    Cut,
    #[strum(message = "Open lid servo.")]
    LidOpen,
    #[strum(message = "Close lid servo.")]
    LidClose,
    #[strum(message = "Turn stepper motors on the SMuFF off.")]
    MotorsOff,
    #[strum(message = "Resets the Feeder Jammed flag on the SMuFF.")]
    Unjam,
    #[strum(message = "Reset tool change average statistics.")]
    ResetStats,
    #[strum(message = "Resets the SMuFF.")]
    Reset,
}

impl Action {
    /// Command word the device firmware expects. Bit-exact.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Status => "STATUS",
            Self::Debug => "DEBUG",
            Self::Wipe => "WIPE",
            Self::Cut => "CUT",
            Self::LidOpen => "SERVOOPEN",
            Self::LidClose => "SERVOCLOSE",
            Self::MotorsOff => "MOTORS",
            Self::Unjam => "UNJAM",
            Self::ResetStats => "RESETAVG",
            Self::Reset => "RESET",
        }
    }

    pub fn description(self) -> &'static str {
        self.get_message().unwrap_or_default()
    }
}
