//! Configuration types for the VLAN driver
//!
//! This module defines the configuration a switch is instantiated from.

use serde::{Deserialize, Serialize};

/// Switch configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwitchConfig {
    /// Brocade NOS switch managed over its XML REST API
    Brocade {
        /// Base address of the switch, including scheme (e.g. "https://sw1")
        hostname: String,
        /// REST API user
        username: String,
        /// REST API password
        /// ⚠️ NEVER log this value
        password: String,
        /// Interface type ports live under (e.g. "TenGigabitEthernet")
        interface_type: String,
        /// Persist the running config to the startup config after changes
        #[serde(default)]
        save: bool,
    },

    /// Custom switch
    Custom {
        /// Factory name to use
        factory: String,
        /// Custom configuration data
        config: serde_json::Value,
    },
}

impl SwitchConfig {
    /// Create a Brocade configuration with `save` disabled
    pub fn brocade(
        hostname: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        interface_type: impl Into<String>,
    ) -> Self {
        SwitchConfig::Brocade {
            hostname: hostname.into(),
            username: username.into(),
            password: password.into(),
            interface_type: interface_type.into(),
            save: false,
        }
    }

    /// Validate the switch configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            SwitchConfig::Brocade {
                hostname,
                username,
                password,
                interface_type,
                ..
            } => {
                if hostname.is_empty() {
                    return Err(crate::Error::config("Brocade hostname cannot be empty"));
                }
                if username.is_empty() {
                    return Err(crate::Error::config("Brocade username cannot be empty"));
                }
                if password.is_empty() {
                    return Err(crate::Error::config("Brocade password cannot be empty"));
                }
                if interface_type.is_empty() {
                    return Err(crate::Error::config(
                        "Brocade interface type cannot be empty",
                    ));
                }
                Ok(())
            }
            SwitchConfig::Custom { factory, config } => {
                if factory.is_empty() {
                    return Err(crate::Error::config("Custom switch factory cannot be empty"));
                }
                if config.is_null() {
                    return Err(crate::Error::config("Custom switch config cannot be null"));
                }
                Ok(())
            }
        }
    }

    /// Get the switch type name
    pub fn type_name(&self) -> &str {
        match self {
            SwitchConfig::Brocade { .. } => "brocade",
            SwitchConfig::Custom { factory, .. } => factory,
        }
    }

    /// Whether changes should be saved to the startup config
    pub fn save(&self) -> bool {
        match self {
            SwitchConfig::Brocade { save, .. } => *save,
            SwitchConfig::Custom { .. } => false,
        }
    }
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for SwitchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwitchConfig::Brocade {
                hostname,
                username,
                interface_type,
                save,
                ..
            } => f
                .debug_struct("Brocade")
                .field("hostname", hostname)
                .field("username", username)
                .field("password", &"<REDACTED>")
                .field("interface_type", interface_type)
                .field("save", save)
                .finish(),
            SwitchConfig::Custom { factory, config } => f
                .debug_struct("Custom")
                .field("factory", factory)
                .field("config", config)
                .finish(),
        }
    }
}

/// Parse a boolean option the way config files spell them
///
/// Accepts `true/false`, `yes/no`, `on/off` and `1/0`, case-insensitively.
pub fn string_is_bool(value: &str) -> Result<bool, crate::Error> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(crate::Error::config(format!(
            "'{}' is not a boolean (expected true/false, yes/no, on/off or 1/0)",
            other
        ))),
    }
}
