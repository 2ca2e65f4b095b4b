//! Core traits for the VLAN driver
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`Transport`]: Perform one request against a switch
//! - [`PortDriver`]: Read and change the VLAN state of switch ports
//! - [`Switch`]: Validation, capabilities and legality on top of [`PortDriver`]

pub mod port_driver;
pub mod switch;
pub mod transport;

pub use port_driver::{PortDriver, PortNetworks};
pub use switch::{Capability, Switch, SwitchFactory};
pub use transport::{Method, Response, Transport};
