// # Switch Trait
//
// The capability set a switch driver exposes to the rest of the system:
// port-name validation, capability reporting, the legality check, and the
// port operations of [`PortDriver`].
//
// ## Implementations
//
// - Brocade NOS: `vlan-switch-brocade` crate

use async_trait::async_trait;
use std::fmt;

use crate::config::SwitchConfig;
use crate::error::Result;
use crate::legality::{OperationType, check_native_networks};
use crate::traits::port_driver::PortDriver;
use crate::vlan::Channel;

/// Optional switch behaviours beyond baseline VLAN trunking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Trunk ports may carry tagged VLANs without a native VLAN
    NativelessTrunkMode,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::NativelessTrunkMode => "nativeless-trunk-mode",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for switch implementations
///
/// A switch value is its own session; there is no separate connection
/// object to open or close.
#[async_trait]
pub trait Switch: PortDriver {
    /// Switch type name (for logging and registry lookup)
    fn switch_type(&self) -> &'static str;

    /// Reject port names this switch cannot address
    fn validate_port_name(&self, port: &str) -> Result<()>;

    /// Capabilities beyond baseline VLAN trunking
    fn capabilities(&self) -> Vec<Capability>;

    /// Reject operations the switch must not be asked to perform
    ///
    /// `attachments` are the channels the port currently has networks on.
    fn ensure_legal_operation(
        &self,
        attachments: &[Channel],
        op: OperationType,
        channel: &Channel,
    ) -> Result<()> {
        check_native_networks(attachments, op, channel)
    }

    /// Persist the running configuration across reboots
    ///
    /// Switches whose changes take effect persistently keep the default.
    async fn save_config(&self) -> Result<()> {
        Ok(())
    }
}

/// Helper trait for constructing switches from configuration
pub trait SwitchFactory: Send + Sync {
    /// Create a Switch instance from configuration
    fn create(&self, config: &SwitchConfig) -> Result<Box<dyn Switch>>;
}
