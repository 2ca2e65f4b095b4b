// # Brocade NOS Switch Driver
//
// This crate provides a Brocade VDX (NOS) switch driver for the VLAN system,
// using the switch's XML REST API.
//
// ## Behaviour
//
// - Every operation is a short, fixed sequence of requests issued in order
// - Repeated operations succeed: each request names the error statuses that
//   mean "already in that state" (409 on enabling something enabled, 404 on
//   deleting something absent)
// - Port state is never cached; every read goes to the switch
// - No retries or backoff; a rejected request aborts the operation
//
// ## Ordering
//
// A port must be switching and in trunk mode before trunk VLANs or a native
// VLAN mean anything, so `add_vlan_to_trunk` and `set_native_vlan` always run
// the mode sequence first. `set_native_vlan` also clears native VLAN tagging
// before setting the VLAN.
//
// ## Security
//
// - The password NEVER appears in logs or Debug output
//
// ## API Reference
//
// - Interface config: `/rest/config/running/interface/{type}/%22{port}%22`
// - Switchport config: `.../switchport/{mode,trunk,trunk/allowed/vlan,...}`
// - Save config: POST `/rest/operations/bna-config-cmd`

pub mod transport;
pub mod url;
mod xml;

use async_trait::async_trait;
use std::collections::BTreeSet;
use vlan_core::config::SwitchConfig;
use vlan_core::traits::{Capability, Method, PortDriver, Switch, SwitchFactory, Transport};
use vlan_core::{Error, PortMode, Result, VlanId, parse_vlan_ranges};

pub use transport::HttpTransport;
pub use url::{ResourcePaths, validate_port_name};
pub use xml::BROCADE_INTERFACE_NS;

/// Status the switch answers with when something is already configured
const CONFLICT: u16 = 409;

/// Status the switch answers with when deleting something absent
const NOT_FOUND: u16 = 404;

/// Brocade NOS switch
///
/// # Statelessness
///
/// The driver holds only the address, interface type and transport. It is
/// safe to share between tasks, but callers must serialise operations on
/// the same port.
pub struct BrocadeSwitch {
    /// Resource URL builder
    paths: ResourcePaths,

    /// Transport requests go through
    transport: Box<dyn Transport>,
}

// Custom Debug implementation; the transport may hold credentials
impl std::fmt::Debug for BrocadeSwitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrocadeSwitch")
            .field("hostname", &self.paths.hostname())
            .field("interface_type", &self.paths.interface_type())
            .finish_non_exhaustive()
    }
}

impl BrocadeSwitch {
    /// Create a Brocade switch talking HTTP with basic auth
    ///
    /// # Parameters
    ///
    /// - `hostname`: base address including scheme (e.g. "https://sw1")
    /// - `username`, `password`: REST API credentials
    /// - `interface_type`: e.g. "TenGigabitEthernet"
    pub fn new(
        hostname: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        interface_type: impl Into<String>,
    ) -> Result<Self> {
        let transport = HttpTransport::new(username, password)?;
        Ok(Self::with_transport(
            hostname,
            interface_type,
            Box::new(transport),
        ))
    }

    /// Create a Brocade switch over any transport
    pub fn with_transport(
        hostname: impl Into<String>,
        interface_type: impl Into<String>,
        transport: Box<dyn Transport>,
    ) -> Self {
        Self {
            paths: ResourcePaths::new(hostname, interface_type),
            transport,
        }
    }

    /// Resource URL builder for this switch
    pub fn paths(&self) -> &ResourcePaths {
        &self.paths
    }

    /// Copy the running config to the startup config
    pub async fn save_running_config(&self) -> Result<()> {
        tracing::info!("Saving running config on {}", self.paths.hostname());

        let payload = "<bna-config-cmd>\
                       <src>running-config</src>\
                       <dest>startup-config</dest>\
                       </bna-config-cmd>";
        self.transport
            .request(Method::Post, &self.paths.config_cmd(), Some(payload), &[])
            .await?;
        Ok(())
    }

    /// GET a resource and return its body
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.transport.request(Method::Get, url, None, &[]).await?;
        Ok(response.body)
    }

    /// Disable tagging of the native VLAN
    ///
    /// The tag resource does not exist unless tagging was enabled, so 404
    /// counts as success.
    async fn disable_native_tag(&self, interface: &str) -> Result<()> {
        let url = self.paths.interface(interface, "trunk/tag/native-vlan")?;
        self.transport
            .request(Method::Delete, &url, None, &[NOT_FOUND])
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PortDriver for BrocadeSwitch {
    async fn is_shutdown(&self, interface: &str) -> Result<bool> {
        let url = self.paths.interface(interface, "")?;
        let body = self.fetch(&url).await?;
        let doc = xml::parse(&body)?;

        match xml::child_text(&doc, &["shutdown"]) {
            None => Ok(false),
            Some("true") => Ok(true),
            Some(other) => Err(Error::indeterminate(format!(
                "Could not determine if interface {} is off (shutdown = '{}')",
                interface, other
            ))),
        }
    }

    async fn get_mode(&self, interface: &str) -> Result<PortMode> {
        let url = self.paths.interface(interface, "mode")?;
        let body = self.fetch(&url).await?;
        let doc = xml::parse(&body)?;

        let mode = xml::child_text(&doc, &["vlan-mode"]).ok_or_else(|| {
            Error::indeterminate(format!("Interface {} reports no vlan-mode", interface))
        })?;
        mode.parse().map_err(|_| {
            Error::indeterminate(format!(
                "Interface {} reports unknown vlan-mode '{}'",
                interface, mode
            ))
        })
    }

    async fn get_trunk_vlans(&self, interface: &str) -> Result<BTreeSet<VlanId>> {
        let url = self.paths.interface(interface, "trunk")?;
        let body = self.fetch(&url).await?;
        let doc = xml::parse(&body)?;

        match xml::child_text(&doc, &["allowed", "vlan", "add"]) {
            Some(vlans) => parse_vlan_ranges(vlans).map_err(|e| {
                Error::malformed(format!(
                    "Interface {} reports invalid allowed vlans: {}",
                    interface, e
                ))
            }),
            None => Ok(BTreeSet::new()),
        }
    }

    async fn get_native_vlan(&self, interface: &str) -> Result<Option<VlanId>> {
        let url = self.paths.interface(interface, "trunk")?;
        let body = self.fetch(&url).await?;
        let doc = xml::parse(&body)?;

        match xml::child_text(&doc, &["native-vlan"]) {
            None | Some("") => Ok(None),
            Some(vlan) => vlan.parse().map(Some).map_err(|_| {
                Error::malformed(format!(
                    "Interface {} reports invalid native-vlan '{}'",
                    interface, vlan
                ))
            }),
        }
    }

    async fn shutdown(&self, interface: &str) -> Result<()> {
        tracing::info!("Shutting down port {}", interface);

        let url = self.paths.interface(interface, "")?;
        self.transport
            .request(
                Method::Post,
                &url,
                Some("<shutdown>true</shutdown>"),
                &[CONFLICT],
            )
            .await?;
        Ok(())
    }

    async fn enable_and_set_mode(&self, interface: &str, mode: PortMode) -> Result<()> {
        tracing::info!("Enabling port {} in {} mode", interface, mode);

        let url = self.paths.interface(interface, "")?;

        // Equivalent to `no shutdown` on the switchport
        if self.is_shutdown(interface).await? {
            self.transport
                .request(Method::Delete, &format!("{}/shutdown", url), None, &[])
                .await?;
        }

        // Enable switching
        self.transport
            .request(
                Method::Post,
                &url,
                Some("<switchport></switchport>"),
                &[CONFLICT],
            )
            .await?;

        let mode_url = self.paths.interface(interface, "mode")?;
        let payload = format!("<mode><vlan-mode>{}</vlan-mode></mode>", mode);
        self.transport
            .request(Method::Put, &mode_url, Some(&payload), &[])
            .await?;
        Ok(())
    }

    async fn add_vlan_to_trunk(&self, interface: &str, vlan: VlanId) -> Result<()> {
        // Validate before the mode sequence issues anything
        let url = self.paths.interface(interface, "trunk/allowed/vlan")?;

        self.enable_and_set_mode(interface, PortMode::Trunk).await?;

        tracing::info!("Adding VLAN {} to trunk on port {}", vlan, interface);
        let payload = format!("<vlan><add>{}</add></vlan>", vlan);
        self.transport
            .request(Method::Put, &url, Some(&payload), &[])
            .await?;
        Ok(())
    }

    async fn remove_vlan_from_trunk(&self, interface: &str, vlan: VlanId) -> Result<()> {
        tracing::info!("Removing VLAN {} from trunk on port {}", vlan, interface);

        let url = self.paths.interface(interface, "trunk/allowed/vlan")?;
        let payload = format!("<vlan><remove>{}</remove></vlan>", vlan);
        self.transport
            .request(Method::Put, &url, Some(&payload), &[])
            .await?;
        Ok(())
    }

    async fn remove_all_vlans_from_trunk(&self, interface: &str) -> Result<()> {
        tracing::info!("Removing all VLANs from trunk on port {}", interface);

        let url = self.paths.interface(interface, "trunk/allowed/vlan")?;
        self.transport
            .request(
                Method::Put,
                &url,
                Some("<vlan><none>true</none></vlan>"),
                &[],
            )
            .await?;
        Ok(())
    }

    async fn set_native_vlan(&self, interface: &str, vlan: VlanId) -> Result<()> {
        let url = self.paths.interface(interface, "trunk")?;

        self.enable_and_set_mode(interface, PortMode::Trunk).await?;
        self.disable_native_tag(interface).await?;

        tracing::info!("Setting native VLAN {} on port {}", vlan, interface);
        let payload = format!("<trunk><native-vlan>{}</native-vlan></trunk>", vlan);
        self.transport
            .request(Method::Put, &url, Some(&payload), &[])
            .await?;
        Ok(())
    }

    async fn remove_native_vlan(&self, interface: &str) -> Result<()> {
        tracing::info!("Removing native VLAN from port {}", interface);

        let url = self.paths.interface(interface, "trunk/native-vlan")?;
        self.transport
            .request(Method::Delete, &url, None, &[])
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Switch for BrocadeSwitch {
    fn switch_type(&self) -> &'static str {
        "brocade"
    }

    fn validate_port_name(&self, port: &str) -> Result<()> {
        validate_port_name(port)
    }

    fn capabilities(&self) -> Vec<Capability> {
        Vec::new()
    }

    async fn save_config(&self) -> Result<()> {
        self.save_running_config().await
    }
}

/// Factory for creating Brocade switches
pub struct BrocadeFactory;

impl SwitchFactory for BrocadeFactory {
    fn create(&self, config: &SwitchConfig) -> Result<Box<dyn Switch>> {
        match config {
            SwitchConfig::Brocade {
                hostname,
                username,
                password,
                interface_type,
                ..
            } => {
                if password.is_empty() {
                    return Err(Error::config("Brocade password is required"));
                }

                // Check for dry-run mode environment variable
                let dry_run = std::env::var("VLAN_MODE")
                    .unwrap_or_default()
                    .to_lowercase()
                    == "dry-run";

                if dry_run {
                    tracing::warn!(
                        "Brocade switch running in DRY-RUN mode - no changes will be made"
                    );
                }

                let transport = HttpTransport::new(username.clone(), password.clone())?
                    .with_dry_run(dry_run);

                Ok(Box::new(BrocadeSwitch::with_transport(
                    hostname.clone(),
                    interface_type.clone(),
                    Box::new(transport),
                )))
            }
            _ => Err(Error::config("Invalid config for Brocade switch")),
        }
    }
}

/// Register the Brocade switch with a registry
///
/// # Example
///
/// ```rust
/// use vlan_core::SwitchRegistry;
///
/// let registry = SwitchRegistry::new();
/// vlan_switch_brocade::register(&registry);
/// assert!(registry.has_switch("brocade"));
/// ```
pub fn register(registry: &vlan_core::SwitchRegistry) {
    registry.register_switch("brocade", Box::new(BrocadeFactory));
}
