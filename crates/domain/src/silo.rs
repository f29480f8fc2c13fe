//! Deployment silo modes.
//!
//! A silo is a deployment partition that owns a subset of the authoritative
//! data. Services declare the mode their data lives in; callers compare it
//! against the mode of the running process to decide whether an operation
//! can execute in-process or must cross the boundary as an RPC.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The deployment partition the current process runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiloMode {
    /// Every service runs in one process; all data is local.
    #[default]
    Monolith,
    /// Owns cross-organization coordination data, including member mappings.
    Control,
    /// Owns the authoritative customer data (organizations, teams, members).
    Region,
}

impl SiloMode {
    /// Whether a service whose data lives in `local_mode` executes in-process
    /// when called from this mode.
    #[must_use]
    pub fn serves(self, local_mode: SiloMode) -> bool {
        self == Self::Monolith || self == local_mode
    }

    /// Stable lowercase name, matching the configuration syntax.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monolith => "monolith",
            Self::Control => "control",
            Self::Region => "region",
        }
    }
}

impl fmt::Display for SiloMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown silo mode name.
#[derive(Debug, thiserror::Error)]
#[error("unknown silo mode: {0}")]
pub struct ParseSiloModeError(String);

impl FromStr for SiloMode {
    type Err = ParseSiloModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monolith" => Ok(Self::Monolith),
            "control" => Ok(Self::Control),
            "region" => Ok(Self::Region),
            other => Err(ParseSiloModeError(other.to_string())),
        }
    }
}
