// # Port Driver Trait
//
// Defines the per-port VLAN operations a switch driver provides, and the
// generic port session built on top of them.
//
// ## Implementations
//
// - Brocade NOS: `vlan-switch-brocade` crate
//
// ## Usage
//
// ```rust,ignore
// use vlan_core::{Channel, PortDriver, VlanId};
//
// let vlan = VlanId::new(102)?;
// driver.modify_port("1/0/1", &Channel::Vlan(vlan), Some(vlan)).await?;
// let networks = driver.get_port_networks(&["1/0/1"]).await?;
// ```

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::port::PortMode;
use crate::vlan::{Channel, VlanId};

/// Networks attached to one port, as `(channel, vlan)` pairs
///
/// Trunk VLANs come first in ascending order, followed by the native VLAN
/// if the port has one.
pub type PortNetworks = Vec<(Channel, VlanId)>;

/// Trait for switch port drivers
///
/// The required methods are single operations against the switch. Each one
/// is safe to repeat: running it against a port already in the target state
/// does not fail.
///
/// # Statelessness
///
/// Drivers keep no copy of port state. Every read goes to the switch, so a
/// port changed out of band is always seen as it is.
///
/// # Ordering
///
/// Operations issue their requests strictly in sequence. Drivers do not
/// lock; callers must not run two operations on the same port concurrently.
#[async_trait]
pub trait PortDriver: Send + Sync {
    /// Whether the port is administratively shut down
    async fn is_shutdown(&self, interface: &str) -> Result<bool>;

    /// Current switching mode of the port
    async fn get_mode(&self, interface: &str) -> Result<PortMode>;

    /// VLANs allowed on the trunk, excluding the native VLAN
    ///
    /// A port with no trunk configuration yields the empty set.
    async fn get_trunk_vlans(&self, interface: &str) -> Result<BTreeSet<VlanId>>;

    /// Native VLAN of the port, if any
    async fn get_native_vlan(&self, interface: &str) -> Result<Option<VlanId>>;

    /// Administratively shut the port down
    async fn shutdown(&self, interface: &str) -> Result<()>;

    /// Bring the port up, enable switching and set its mode
    async fn enable_and_set_mode(&self, interface: &str, mode: PortMode) -> Result<()>;

    /// Allow a VLAN on the trunk, switching the port to trunk mode first
    async fn add_vlan_to_trunk(&self, interface: &str, vlan: VlanId) -> Result<()>;

    /// Remove a VLAN from the trunk
    async fn remove_vlan_from_trunk(&self, interface: &str, vlan: VlanId) -> Result<()>;

    /// Remove every VLAN from the trunk
    async fn remove_all_vlans_from_trunk(&self, interface: &str) -> Result<()>;

    /// Set the native VLAN, switching the port to trunk mode first
    async fn set_native_vlan(&self, interface: &str, vlan: VlanId) -> Result<()>;

    /// Remove the native VLAN
    async fn remove_native_vlan(&self, interface: &str) -> Result<()>;

    /// Attach (`Some`) or detach (`None`) a network on a port channel
    ///
    /// Detaching the native network also shuts the port down, since a port
    /// without a native network carries nothing untagged.
    async fn modify_port(
        &self,
        port: &str,
        channel: &Channel,
        network: Option<VlanId>,
    ) -> Result<()> {
        match (channel, network) {
            (Channel::Native, Some(vlan)) => self.set_native_vlan(port, vlan).await,
            (Channel::Native, None) => {
                self.remove_native_vlan(port).await?;
                self.shutdown(port).await
            }
            (Channel::Vlan(id), Some(vlan)) => {
                if *id != vlan {
                    return Err(Error::invalid_argument(format!(
                        "Channel {} cannot carry VLAN {}",
                        channel, vlan
                    )));
                }
                self.add_vlan_to_trunk(port, vlan).await
            }
            (Channel::Vlan(id), None) => self.remove_vlan_from_trunk(port, *id).await,
        }
    }

    /// Strip every network from a port and shut it down
    async fn revert_port(&self, port: &str) -> Result<()> {
        self.remove_all_vlans_from_trunk(port).await?;
        if self.get_native_vlan(port).await?.is_some() {
            self.remove_native_vlan(port).await?;
        }
        self.shutdown(port).await
    }

    /// Networks currently attached to each of `ports`
    async fn get_port_networks(&self, ports: &[&str]) -> Result<BTreeMap<String, PortNetworks>> {
        let mut networks = BTreeMap::new();

        for &port in ports {
            let mut attached: PortNetworks = self
                .get_trunk_vlans(port)
                .await?
                .into_iter()
                .map(|vlan| (Channel::Vlan(vlan), vlan))
                .collect();

            if let Some(native) = self.get_native_vlan(port).await? {
                attached.push((Channel::Native, native));
            }

            networks.insert(port.to_string(), attached);
        }

        Ok(networks)
    }
}
