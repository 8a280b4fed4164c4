// ── Firmware banner ──

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"FIRMWARE_NAME:\s(.*)\sFIRMWARE_VERSION:\s(.*)\sELECTRONICS:\s(.*)\sDATE:\s(.*)\sMODE:\s(.*)\sOPTIONS:\s(.*)",
    )
    .expect("firmware banner pattern is valid")
});

/// Structured view of the `M115` banner a SMuFF reports as `fw_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareInfo {
    pub name: String,
    /// e.g. `V3.10D`
    pub version: String,
    /// Controller board, e.g. `SKR E3-DIP V1.1`.
    pub board: String,
    pub date: String,
    /// `SMUFF` or `PMMU2`.
    pub mode: String,
    pub options: Vec<String>,
}

impl FirmwareInfo {
    /// Parse a firmware banner. Anything that doesn't follow the banner
    /// layout yields `None`; the raw text is still kept on the unit state.
    pub fn parse(banner: &str) -> Option<Self> {
        let caps = BANNER.captures(banner.trim_end())?;
        let field = |i: usize| caps.get(i).map_or_else(String::new, |m| m.as_str().trim().to_owned());

        Some(Self {
            name: field(1),
            version: field(2),
            board: field(3),
            date: field(4),
            mode: field(5),
            options: field(6)
                .split('|')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_owned)
                .collect(),
        })
    }
}
