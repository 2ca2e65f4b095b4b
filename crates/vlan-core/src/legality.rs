//! Native-network legality check
//!
//! A port's tagged VLANs only make sense while it also has a native
//! network, so the native network is attached first and detached last.

use crate::error::{Error, Result};
use crate::vlan::Channel;

/// Kind of change requested on a port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    /// Attach a network
    Connect,
    /// Detach a network
    Disconnect,
}

/// Refuse operations that would break native-network ordering
///
/// `attachments` are the channels the port currently has networks on.
pub fn check_native_networks(
    attachments: &[Channel],
    op: OperationType,
    channel: &Channel,
) -> Result<()> {
    let has_native = attachments.iter().any(Channel::is_native);

    match op {
        OperationType::Connect if channel.is_native() && has_native => {
            Err(Error::blocked("Port already has a native network"))
        }
        OperationType::Connect if !channel.is_native() && !has_native => {
            Err(Error::blocked("Please attach a native network first"))
        }
        OperationType::Disconnect if channel.is_native() && attachments.len() > 1 => {
            Err(Error::blocked(
                "Trunked networks exist on this port. \
                 Please remove them before removing the native network",
            ))
        }
        _ => Ok(()),
    }
}
