//! Plugin-based switch registry
//!
//! The registry allows switch drivers to be registered dynamically at
//! runtime, avoiding hardcoded if-else chains.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vlan_core::registry::SwitchRegistry;
//! use vlan_core::config::SwitchConfig;
//!
//! let registry = SwitchRegistry::new();
//! vlan_switch_brocade::register(&registry);
//!
//! let config = SwitchConfig::brocade("https://sw1", "admin", "secret", "TenGigabitEthernet");
//! let switch = registry.create_switch(&config)?;
//! ```

use crate::config::SwitchConfig;
use crate::error::{Error, Result};
use crate::traits::{Switch, SwitchFactory};
use std::collections::HashMap;
use std::sync::RwLock;

/// Switch registry for plugin-based driver creation
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct SwitchRegistry {
    /// Registered switch factories
    switches: RwLock<HashMap<String, Box<dyn SwitchFactory>>>,
}

impl SwitchRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a switch factory under a type name (e.g. "brocade")
    pub fn register_switch(&self, name: impl Into<String>, factory: Box<dyn SwitchFactory>) {
        let name = name.into();
        let mut switches = self
            .switches
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        switches.insert(name, factory);
    }

    /// Create a switch from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn Switch>)`: Created switch instance
    /// - `Err(Error)`: If the config is invalid, the switch type is not
    ///   registered, or creation fails
    pub fn create_switch(&self, config: &SwitchConfig) -> Result<Box<dyn Switch>> {
        config.validate()?;

        let switch_type = config.type_name();
        let switches = self
            .switches
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let factory = switches
            .get(switch_type)
            .ok_or_else(|| Error::config(format!("Unknown switch type: {}", switch_type)))?;

        tracing::debug!("Creating {} switch", switch_type);
        factory.create(config)
    }

    /// List all registered switch types
    pub fn list_switches(&self) -> Vec<String> {
        let switches = self
            .switches
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut names: Vec<String> = switches.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a switch type is registered
    pub fn has_switch(&self, name: &str) -> bool {
        let switches = self
            .switches
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        switches.contains_key(name)
    }
}
