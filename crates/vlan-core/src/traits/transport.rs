// # Transport Trait
//
// Defines the single-request interface the drivers talk to a switch through.
//
// ## Implementations
//
// - HTTP (reqwest, basic auth): `vlan-switch-brocade` crate
// - Test doubles: simulated switches in each crate's `tests/common`
//
// ## Idempotency
//
// Drivers never swallow errors by catching them. Every call states which
// error statuses it considers success through the `acceptable` argument of
// [`Transport::request`], e.g. `409` when enabling switching on a port that
// already has it.

use async_trait::async_trait;
use std::fmt;

use crate::error::{Error, Result};

/// HTTP-like request method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw answer from the switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response document (XML for Brocade)
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for any status below 400
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Trait for switch transports
///
/// # Trust Level
///
/// A transport performs exactly one request per call. It does not retry,
/// back off or cache; those policies belong to whoever owns the transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one request and return whatever the switch answered
    ///
    /// Only failures that produced no response at all are errors here; an
    /// error status is still `Ok(Response)`.
    async fn send(&self, method: Method, url: &str, body: Option<&str>) -> Result<Response>;

    /// Perform one request, failing on any error status not in `acceptable`
    ///
    /// # Returns
    ///
    /// - `Ok(Response)`: status below 400, or listed in `acceptable`
    /// - `Err(Error::Switch(TransportFault))`: any other status, carrying the
    ///   response body
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&str>,
        acceptable: &[u16],
    ) -> Result<Response> {
        tracing::debug!("{} {}", method, url);

        let response = self.send(method, url, body).await?;

        if response.is_success() {
            return Ok(response);
        }

        if acceptable.contains(&response.status) {
            tracing::debug!(
                "{} {} returned tolerated status {}",
                method,
                url,
                response.status
            );
            return Ok(response);
        }

        tracing::error!(
            "Bad request to switch ({} {} -> {}). Response: {}",
            method,
            url,
            response.status,
            response.body
        );
        Err(Error::transport_fault(response.status, response.body))
    }
}
