//! Port-name validation and REST resource paths
//!
//! Interface resources live at
//! `{hostname}/rest/config/running/interface/{type}/%22{port}%22[/switchport/{suffix}]`.
//! Port names contain forward slashes (`101/0/10`), so they are wrapped in
//! escaped double quotes (`%22`) to keep the path unambiguous.

use once_cell::sync::Lazy;
use regex::Regex;
use vlan_core::{Error, Result};

/// Two or three slash separated non-negative integers, e.g. 1/2 or 1/0/1
static PORT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+/[0-9]+(/[0-9]+)?$").expect("Invalid regex pattern"));

/// Check that `port` is a port name this switch can address
pub fn validate_port_name(port: &str) -> Result<()> {
    if !PORT_NAME_RE.is_match(port) {
        return Err(Error::invalid_argument(
            "Invalid port name. Valid port names for this switch are of the form 1/0/1 or 1/2",
        ));
    }
    Ok(())
}

/// Builds resource URLs for one switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePaths {
    hostname: String,
    interface_type: String,
}

impl ResourcePaths {
    /// # Parameters
    ///
    /// - `hostname`: base address including scheme (e.g. "https://sw1")
    /// - `interface_type`: e.g. "TenGigabitEthernet"
    pub fn new(hostname: impl Into<String>, interface_type: impl Into<String>) -> Self {
        let hostname: String = hostname.into();
        Self {
            hostname: hostname.trim_end_matches('/').to_string(),
            interface_type: interface_type.into(),
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn interface_type(&self) -> &str {
        &self.interface_type
    }

    /// URL of an interface, or of `switchport/{suffix}` below it
    ///
    /// The port name is validated first; no URL is ever built for a name
    /// that fails validation.
    pub fn interface(&self, interface: &str, suffix: &str) -> Result<String> {
        validate_port_name(interface)?;

        let mut url = format!(
            "{}/rest/config/running/interface/{}/%22{}%22",
            self.hostname, self.interface_type, interface
        );
        if !suffix.is_empty() {
            url.push_str("/switchport/");
            url.push_str(suffix);
        }
        Ok(url)
    }

    /// URL of the operation that copies one configuration onto another
    pub fn config_cmd(&self) -> String {
        format!("{}/rest/operations/bna-config-cmd", self.hostname)
    }
}
