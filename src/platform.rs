//! OS version parsing and capability levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::capability;

/// `major.minor` OS version of the host running the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
}

impl OsVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl FromStr for OsVersion {
    type Err = String;

    /// Accepts `major`, `major.minor` or `major.minor.patch` (patch is ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let major = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| format!("empty OS version '{s}'"))?
            .parse::<u32>()
            .map_err(|e| format!("invalid major version in '{s}': {e}"))?;
        let minor = match parts.next() {
            Some(p) => p
                .parse::<u32>()
                .map_err(|e| format!("invalid minor version in '{s}': {e}"))?,
            None => 0,
        };
        Ok(Self { major, minor })
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Feature set available at a given OS version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Process-scoped log store can be queried
    pub log_store: bool,
    /// Developer HUD property map is readable/writable
    pub hud_properties: bool,
    /// Position keys are honoured; `disabled` tokens replace key removal
    pub positioned_overlay: bool,
}

impl Capabilities {
    pub fn for_version(version: OsVersion) -> Self {
        Self {
            log_store: version.major >= capability::LOG_STORE_MAJOR,
            hud_properties: version.major >= capability::HUD_PROPERTIES_MAJOR,
            positioned_overlay: version.major >= capability::POSITIONED_OVERLAY_MAJOR,
        }
    }

    /// Everything on; handy for tests and the file-backed CLI default
    pub fn full() -> Self {
        Self {
            log_store: true,
            hud_properties: true,
            positioned_overlay: true,
        }
    }

    pub fn none() -> Self {
        Self {
            log_store: false,
            hud_properties: false,
            positioned_overlay: false,
        }
    }
}
