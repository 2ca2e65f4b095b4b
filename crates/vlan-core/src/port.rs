//! Switch port modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Switching mode of a port
///
/// Only meaningful once switching has been enabled on the port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortMode {
    /// Untagged traffic for exactly one VLAN
    Access,
    /// Tagged traffic for many VLANs plus one untagged native VLAN
    Trunk,
}

impl PortMode {
    /// The mode as the switch spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            PortMode::Access => "access",
            PortMode::Trunk => "trunk",
        }
    }
}

impl FromStr for PortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "access" => Ok(PortMode::Access),
            "trunk" => Ok(PortMode::Trunk),
            _ => Err(Error::invalid_argument(format!(
                "Invalid mode '{}': expected 'access' or 'trunk'",
                s
            ))),
        }
    }
}

impl fmt::Display for PortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
