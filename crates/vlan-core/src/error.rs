//! Error types for the VLAN driver
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for VLAN driver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the VLAN driver
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed port name, port mode, VLAN id or channel.
    ///
    /// Always raised locally, before any request reaches the switch.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The legality check refused the operation
    #[error("Operation blocked: {0}")]
    Blocked(String),

    /// The switch failed or reported something we cannot act on
    #[error("Switch error: {0}")]
    Switch(#[from] SwitchError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Device-side failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwitchError {
    /// A response was well-formed but its content cannot be interpreted,
    /// e.g. a `shutdown` field holding something other than `true`.
    #[error("Indeterminate port state: {0}")]
    IndeterminateState(String),

    /// The switch answered with a status the call does not tolerate
    #[error("Bad request to switch (HTTP {status}). Response: {detail}")]
    TransportFault {
        /// HTTP status code returned by the switch
        status: u16,
        /// Response body returned by the switch
        detail: String,
    },

    /// The response body could not be parsed
    #[error("Malformed response from switch: {0}")]
    MalformedResponse(String),

    /// The request never produced a response (DNS, TCP, TLS, timeout)
    #[error("Connection to switch failed: {0}")]
    Connection(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a blocked-operation error
    pub fn blocked(msg: impl Into<String>) -> Self {
        Self::Blocked(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an indeterminate-state switch error
    pub fn indeterminate(msg: impl Into<String>) -> Self {
        Self::Switch(SwitchError::IndeterminateState(msg.into()))
    }

    /// Create a transport fault from a rejected status and the response body
    pub fn transport_fault(status: u16, detail: impl Into<String>) -> Self {
        Self::Switch(SwitchError::TransportFault {
            status,
            detail: detail.into(),
        })
    }

    /// Create a malformed-response switch error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Switch(SwitchError::MalformedResponse(msg.into()))
    }

    /// Create a connection switch error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Switch(SwitchError::Connection(msg.into()))
    }

    /// True for every failure that originated on the switch side
    pub fn is_switch_error(&self) -> bool {
        matches!(self, Self::Switch(_))
    }

    /// The rejected HTTP status, if this is a transport fault
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Switch(SwitchError::TransportFault { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
