// # vlan-core
//
// Core library for the switch-port VLAN driver.
//
// ## Architecture Overview
//
// This library provides everything that is not specific to a switch vendor:
// - **Transport**: Trait for performing one request against a switch
// - **PortDriver**: Trait for reading and changing port VLAN state, plus the
//   generic port session (`modify_port`, `revert_port`, `get_port_networks`)
// - **Switch**: Trait for validation, capabilities and the legality check
// - **SwitchRegistry**: Plugin-based registry for switch drivers
// - **vlan**: VLAN ids, channels and the VLAN range codec
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from vendor drivers
// 2. **Stateless**: Port state lives on the switch and is re-read every time
// 3. **Plugin-Based**: Drivers are registered dynamically, no hard-coded if-else
// 4. **Idempotency**: Every operation is safe to repeat; tolerated error
//    statuses are passed explicitly with each request

pub mod config;
pub mod error;
pub mod legality;
pub mod port;
pub mod registry;
pub mod traits;
pub mod vlan;

// Re-export core types for convenience
pub use config::SwitchConfig;
pub use error::{Error, Result, SwitchError};
pub use legality::{OperationType, check_native_networks};
pub use port::PortMode;
pub use registry::SwitchRegistry;
pub use traits::{
    Capability, Method, PortDriver, PortNetworks, Response, Switch, SwitchFactory, Transport,
};
pub use vlan::{Channel, VlanId, format_vlan_ranges, parse_vlan_ranges};
