//! VLAN identifiers, port channels and the VLAN range codec
//!
//! Switches report trunk membership in a compressed form such as
//! `12,14-18,23,28,80-90`. [`parse_vlan_ranges`] expands that into discrete
//! ids and [`format_vlan_ranges`] produces the same encoding from a set.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Matches a comma separated list of integers and/or ranges.
/// Sample: 12,14-18,23,28,80-90 or 20 or 20,22 or 20-22
static VLAN_RANGES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+(-[0-9]+)?)(,[0-9]+(-[0-9]+)?)*").expect("Invalid regex pattern")
});

/// Channel string for the native (untagged) VLAN slot
pub const NATIVE_CHANNEL: &str = "vlan/native";

/// An 802.1Q VLAN id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct VlanId(u16);

impl VlanId {
    /// Lowest usable VLAN id
    pub const MIN: u16 = 1;
    /// Highest usable VLAN id
    pub const MAX: u16 = 4094;

    /// Create a VLAN id, rejecting values outside `1..=4094`
    pub fn new(id: u16) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&id) {
            return Err(Error::invalid_argument(format!(
                "VLAN id {} out of range ({}-{})",
                id,
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(id))
    }

    /// The raw id
    pub fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for VlanId {
    type Error = Error;

    fn try_from(id: u16) -> Result<Self> {
        Self::new(id)
    }
}

impl From<VlanId> for u16 {
    fn from(vlan: VlanId) -> Self {
        vlan.0
    }
}

impl FromStr for VlanId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let id: u16 = s
            .trim()
            .parse()
            .map_err(|_| Error::invalid_argument(format!("Invalid VLAN id: '{}'", s)))?;
        Self::new(id)
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The VLAN slot of a port a network is attached through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// The untagged native VLAN (`vlan/native`)
    Native,
    /// A tagged VLAN on the trunk (`vlan/<id>`)
    Vlan(VlanId),
}

impl Channel {
    /// True for the native slot
    pub fn is_native(&self) -> bool {
        matches!(self, Channel::Native)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Native => f.write_str(NATIVE_CHANNEL),
            Channel::Vlan(id) => write!(f, "vlan/{}", id),
        }
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == NATIVE_CHANNEL {
            return Ok(Channel::Native);
        }
        match s.strip_prefix("vlan/") {
            Some(id) => Ok(Channel::Vlan(id.parse()?)),
            None => Err(Error::invalid_argument(format!(
                "Invalid channel '{}': expected 'vlan/native' or 'vlan/<id>'",
                s
            ))),
        }
    }
}

/// Locate the first range-encoded VLAN list inside `text`
pub fn find_vlan_ranges(text: &str) -> Option<&str> {
    VLAN_RANGES_RE.find(text).map(|m| m.as_str())
}

/// Decode a range-encoded VLAN list
///
/// Text with no VLAN list in it decodes to the empty set; that is how a
/// trunk with nothing allowed is reported, not a failure.
pub fn parse_vlan_ranges(text: &str) -> Result<BTreeSet<VlanId>> {
    let mut vlans = BTreeSet::new();

    let Some(ranges) = find_vlan_ranges(text) else {
        return Ok(vlans);
    };

    for token in ranges.split(',') {
        match token.split_once('-') {
            Some((lo, hi)) => {
                let lo: VlanId = lo.parse()?;
                let hi: VlanId = hi.parse()?;
                if hi < lo {
                    return Err(Error::invalid_argument(format!(
                        "Invalid VLAN range '{}': end is below start",
                        token
                    )));
                }
                for id in lo.get()..=hi.get() {
                    vlans.insert(VlanId(id));
                }
            }
            None => {
                vlans.insert(token.parse()?);
            }
        }
    }

    Ok(vlans)
}

/// Encode a VLAN set, collapsing consecutive ids into `lo-hi` runs
pub fn format_vlan_ranges(vlans: &BTreeSet<VlanId>) -> String {
    let mut runs: Vec<(u16, u16)> = Vec::new();

    for vlan in vlans {
        let id = vlan.get();
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == id => *end = id,
            _ => runs.push((id, id)),
        }
    }

    runs.iter()
        .map(|&(lo, hi)| {
            if lo == hi {
                lo.to_string()
            } else {
                format!("{}-{}", lo, hi)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
