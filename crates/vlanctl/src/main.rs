// # vlanctl - Switch Port VLAN Tool
//
// This binary is a THIN integration layer:
// - DO NOT add VLAN logic, request sequencing, or retry logic here
// - All switch logic lives in vlan-core and the driver crates
// - Connection configuration is via environment variables ONLY
//
// vlanctl is responsible for:
// 1. Reading configuration from environment variables
// 2. Parsing one subcommand
// 3. Registering switch drivers and building the configured switch
// 4. Running the subcommand and saving the config if asked to
//
// ## Configuration
//
// - `VLANCTL_SWITCH_TYPE`: Switch type (brocade)
// - `VLANCTL_HOSTNAME`: Base address including scheme (e.g. https://sw1)
// - `VLANCTL_USERNAME`: REST API user
// - `VLANCTL_PASSWORD`: REST API password
// - `VLANCTL_INTERFACE_TYPE`: Interface type (e.g. TenGigabitEthernet)
// - `VLANCTL_SAVE`: Save the running config after changes (true/false)
// - `VLANCTL_LOG_LEVEL`: trace, debug, info, warn, error
// - `VLAN_MODE=dry-run`: Log writes instead of sending them
//
// ## Example
//
// ```bash
// export VLANCTL_HOSTNAME=https://sw1
// export VLANCTL_USERNAME=admin
// export VLANCTL_PASSWORD=secret
// export VLANCTL_INTERFACE_TYPE=TenGigabitEthernet
//
// vlanctl connect 1/0/1 vlan/native --vlan 50
// vlanctl connect 1/0/1 vlan/102
// vlanctl show 1/0/1
// ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;
use vlan_core::config::string_is_bool;
use vlan_core::{
    Channel, OperationType, PortMode, Switch, SwitchConfig, SwitchRegistry, VlanId,
};

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VlanctlExitCode {
    /// Command completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// The switch operation failed
    RuntimeError = 2,
}

impl From<VlanctlExitCode> for ExitCode {
    fn from(code: VlanctlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Parser)]
#[command(name = "vlanctl", version, about = "Manage VLANs on switch ports")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that a port name is valid for the switch
    Validate { port: String },

    /// Show the networks attached to ports
    Show {
        #[arg(required = true)]
        ports: Vec<String>,
    },

    /// Enable a port and set its mode (access or trunk)
    Mode { port: String, mode: String },

    /// Attach a network to a port channel
    Connect {
        port: String,
        /// `vlan/native` or `vlan/<id>`
        channel: String,
        /// VLAN to attach; defaults to the channel's own VLAN
        #[arg(long)]
        vlan: Option<u16>,
    },

    /// Detach the network on a port channel
    Disconnect { port: String, channel: String },

    /// Remove every network from a port and shut it down
    Revert { port: String },

    /// Shut a port down
    Shutdown { port: String },
}

impl Command {
    /// Whether the command changes switch configuration
    fn is_mutating(&self) -> bool {
        !matches!(self, Command::Validate { .. } | Command::Show { .. })
    }
}

/// Application configuration
struct Config {
    switch_type: String,
    hostname: String,
    username: String,
    password: String,
    interface_type: String,
    save: bool,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let save = match lookup("VLANCTL_SAVE") {
            Some(value) => string_is_bool(&value)
                .map_err(|e| anyhow::anyhow!("VLANCTL_SAVE: {}", e))?,
            None => false,
        };

        Ok(Self {
            switch_type: lookup("VLANCTL_SWITCH_TYPE").unwrap_or_else(|| "brocade".to_string()),
            hostname: lookup("VLANCTL_HOSTNAME").unwrap_or_default(),
            username: lookup("VLANCTL_USERNAME").unwrap_or_default(),
            password: lookup("VLANCTL_PASSWORD").unwrap_or_default(),
            interface_type: lookup("VLANCTL_INTERFACE_TYPE").unwrap_or_default(),
            save,
            log_level: lookup("VLANCTL_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        match self.switch_type.as_str() {
            "brocade" => {}
            _ => anyhow::bail!(
                "VLANCTL_SWITCH_TYPE '{}' is not supported. \
                Supported types: brocade",
                self.switch_type
            ),
        }

        for (name, value) in [
            ("VLANCTL_HOSTNAME", &self.hostname),
            ("VLANCTL_USERNAME", &self.username),
            ("VLANCTL_PASSWORD", &self.password),
            ("VLANCTL_INTERFACE_TYPE", &self.interface_type),
        ] {
            if value.is_empty() {
                anyhow::bail!("{} is required. Set it via: export {}=...", name, name);
            }
        }

        if !self.hostname.starts_with("https://") && !self.hostname.starts_with("http://") {
            anyhow::bail!(
                "VLANCTL_HOSTNAME must include an HTTP or HTTPS scheme. Got: {}",
                self.hostname
            );
        }

        // Validate log level
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "VLANCTL_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Switch configuration handed to the registry
    fn switch_config(&self) -> SwitchConfig {
        SwitchConfig::Brocade {
            hostname: self.hostname.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            interface_type: self.interface_type.clone(),
            save: self.save,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return VlanctlExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return VlanctlExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return VlanctlExitCode::ConfigError.into();
    }

    let registry = SwitchRegistry::new();

    #[cfg(feature = "brocade")]
    vlan_switch_brocade::register(&registry);

    let switch_config = config.switch_config();
    let switch = match registry.create_switch(&switch_config) {
        Ok(switch) => switch,
        Err(e) => {
            error!("Failed to create switch: {}", e);
            return VlanctlExitCode::ConfigError.into();
        }
    };

    info!(
        "Using {} switch at {}",
        switch.switch_type(),
        config.hostname
    );

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return VlanctlExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        let mutating = cli.command.is_mutating();

        let outcome = match run_command(switch.as_ref(), cli.command).await {
            Ok(()) if mutating && switch_config.save() => switch.save_config().await,
            other => other,
        };

        match outcome {
            Ok(()) => VlanctlExitCode::Success,
            Err(e) => {
                error!("Command failed: {}", e);
                VlanctlExitCode::RuntimeError
            }
        }
    });

    result.into()
}

/// Run one subcommand against `switch`
async fn run_command(switch: &dyn Switch, command: Command) -> vlan_core::Result<()> {
    match command {
        Command::Validate { port } => {
            switch.validate_port_name(&port)?;
            println!("{}: valid", port);
        }
        Command::Show { ports } => {
            for port in &ports {
                switch.validate_port_name(port)?;
            }
            let ports: Vec<&str> = ports.iter().map(String::as_str).collect();
            let networks = switch.get_port_networks(&ports).await?;
            for (port, attached) in &networks {
                let attached: Vec<String> = attached
                    .iter()
                    .map(|(channel, vlan)| format!("{}={}", channel, vlan))
                    .collect();
                println!("{}: {}", port, attached.join(" "));
            }
        }
        Command::Mode { port, mode } => {
            let mode: PortMode = mode.parse()?;
            switch.enable_and_set_mode(&port, mode).await?;
        }
        Command::Connect {
            port,
            channel,
            vlan,
        } => {
            let channel: Channel = channel.parse()?;
            let vlan = network_for(&channel, vlan)?;
            ensure_legal(switch, &port, OperationType::Connect, &channel).await?;
            switch.modify_port(&port, &channel, Some(vlan)).await?;
        }
        Command::Disconnect { port, channel } => {
            let channel: Channel = channel.parse()?;
            ensure_legal(switch, &port, OperationType::Disconnect, &channel).await?;
            switch.modify_port(&port, &channel, None).await?;
        }
        Command::Revert { port } => {
            switch.validate_port_name(&port)?;
            switch.revert_port(&port).await?;
        }
        Command::Shutdown { port } => {
            switch.validate_port_name(&port)?;
            switch.shutdown(&port).await?;
        }
    }
    Ok(())
}

/// VLAN a `connect` attaches to `channel`
fn network_for(channel: &Channel, vlan: Option<u16>) -> vlan_core::Result<VlanId> {
    match (channel, vlan) {
        (_, Some(id)) => VlanId::new(id),
        (Channel::Vlan(id), None) => Ok(*id),
        (Channel::Native, None) => Err(vlan_core::Error::invalid_argument(
            "--vlan is required when connecting the native channel",
        )),
    }
}

/// Check the operation against the networks currently on `port`
async fn ensure_legal(
    switch: &dyn Switch,
    port: &str,
    op: OperationType,
    channel: &Channel,
) -> vlan_core::Result<()> {
    switch.validate_port_name(port)?;

    let networks = switch.get_port_networks(&[port]).await?;
    let attachments: Vec<Channel> = networks
        .get(port)
        .map(|attached| attached.iter().map(|(channel, _)| *channel).collect())
        .unwrap_or_default();

    switch.ensure_legal_operation(&attachments, op, channel)
}
