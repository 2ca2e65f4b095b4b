//! Test doubles and common utilities for port session contract tests
//!
//! This module provides a minimal in-memory port driver that records every
//! primitive operation it receives, so tests can assert on ordering.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use vlan_core::error::Result;
use vlan_core::{Capability, Error, PortDriver, PortMode, Switch, VlanId};

/// State of one simulated port
#[derive(Debug, Clone, Default)]
pub struct PortState {
    pub shutdown: bool,
    pub mode: Option<PortMode>,
    pub trunk: BTreeSet<VlanId>,
    pub native: Option<VlanId>,
}

/// A PortDriver that keeps port state in memory and logs calls
#[derive(Default)]
pub struct RecordingDriver {
    ports: Mutex<HashMap<String, PortState>>,
    calls: Mutex<Vec<String>>,
    /// Name of an operation that fails with a switch error
    fail_on: Mutex<Option<&'static str>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls, e.g. `"add_vlan_to_trunk 1/0/1 102"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Current state of a port
    pub fn port(&self, name: &str) -> PortState {
        self.ports
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Make the named operation fail from now on
    pub fn fail_on(&self, op: &'static str) {
        *self.fail_on.lock().unwrap() = Some(op);
    }

    fn record(&self, op: &'static str, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if *self.fail_on.lock().unwrap() == Some(op) {
            return Err(Error::transport_fault(500, format!("{} failed", op)));
        }
        Ok(())
    }

    fn with_port<T>(&self, name: &str, f: impl FnOnce(&mut PortState) -> T) -> T {
        let mut ports = self.ports.lock().unwrap();
        f(ports.entry(name.to_string()).or_default())
    }
}

#[async_trait::async_trait]
impl PortDriver for RecordingDriver {
    async fn is_shutdown(&self, interface: &str) -> Result<bool> {
        self.record("is_shutdown", format!("is_shutdown {}", interface))?;
        Ok(self.with_port(interface, |p| p.shutdown))
    }

    async fn get_mode(&self, interface: &str) -> Result<PortMode> {
        self.record("get_mode", format!("get_mode {}", interface))?;
        self.with_port(interface, |p| p.mode)
            .ok_or_else(|| Error::indeterminate("switching not enabled"))
    }

    async fn get_trunk_vlans(&self, interface: &str) -> Result<BTreeSet<VlanId>> {
        self.record("get_trunk_vlans", format!("get_trunk_vlans {}", interface))?;
        Ok(self.with_port(interface, |p| p.trunk.clone()))
    }

    async fn get_native_vlan(&self, interface: &str) -> Result<Option<VlanId>> {
        self.record("get_native_vlan", format!("get_native_vlan {}", interface))?;
        Ok(self.with_port(interface, |p| p.native))
    }

    async fn shutdown(&self, interface: &str) -> Result<()> {
        self.record("shutdown", format!("shutdown {}", interface))?;
        self.with_port(interface, |p| p.shutdown = true);
        Ok(())
    }

    async fn enable_and_set_mode(&self, interface: &str, mode: PortMode) -> Result<()> {
        self.record(
            "enable_and_set_mode",
            format!("enable_and_set_mode {} {}", interface, mode),
        )?;
        self.with_port(interface, |p| {
            p.shutdown = false;
            p.mode = Some(mode);
        });
        Ok(())
    }

    async fn add_vlan_to_trunk(&self, interface: &str, vlan: VlanId) -> Result<()> {
        self.record(
            "add_vlan_to_trunk",
            format!("add_vlan_to_trunk {} {}", interface, vlan),
        )?;
        self.with_port(interface, |p| {
            p.shutdown = false;
            p.mode = Some(PortMode::Trunk);
            p.trunk.insert(vlan);
        });
        Ok(())
    }

    async fn remove_vlan_from_trunk(&self, interface: &str, vlan: VlanId) -> Result<()> {
        self.record(
            "remove_vlan_from_trunk",
            format!("remove_vlan_from_trunk {} {}", interface, vlan),
        )?;
        self.with_port(interface, |p| p.trunk.remove(&vlan));
        Ok(())
    }

    async fn remove_all_vlans_from_trunk(&self, interface: &str) -> Result<()> {
        self.record(
            "remove_all_vlans_from_trunk",
            format!("remove_all_vlans_from_trunk {}", interface),
        )?;
        self.with_port(interface, |p| p.trunk.clear());
        Ok(())
    }

    async fn set_native_vlan(&self, interface: &str, vlan: VlanId) -> Result<()> {
        self.record(
            "set_native_vlan",
            format!("set_native_vlan {} {}", interface, vlan),
        )?;
        self.with_port(interface, |p| {
            p.shutdown = false;
            p.mode = Some(PortMode::Trunk);
            p.native = Some(vlan);
        });
        Ok(())
    }

    async fn remove_native_vlan(&self, interface: &str) -> Result<()> {
        self.record("remove_native_vlan", format!("remove_native_vlan {}", interface))?;
        self.with_port(interface, |p| p.native = None);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Switch for RecordingDriver {
    fn switch_type(&self) -> &'static str {
        "recording"
    }

    fn validate_port_name(&self, _port: &str) -> Result<()> {
        Ok(())
    }

    fn capabilities(&self) -> Vec<Capability> {
        Vec::new()
    }
}

/// Shorthand for a VLAN id known to be valid
pub fn vlan(id: u16) -> VlanId {
    VlanId::new(id).expect("valid VLAN id")
}
