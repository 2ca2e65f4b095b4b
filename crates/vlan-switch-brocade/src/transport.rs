//! HTTP transport for the NOS REST API
//!
//! One reqwest request per call, authenticated with HTTP basic auth.

use async_trait::async_trait;
use std::time::Duration;
use vlan_core::{Error, Method, Response, Result, Transport};

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed [`Transport`]
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, GET requests are performed and every other
/// request is logged and answered with `204 No Content` without being sent.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the password.
pub struct HttpTransport {
    client: reqwest::Client,
    username: String,
    /// ⚠️ NEVER log this value
    password: String,
    dry_run: bool,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport with the default timeout
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, username, password))
    }

    /// Create a transport around an existing client
    pub fn with_client(
        client: reqwest::Client,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client,
            username: username.into(),
            password: password.into(),
            dry_run: false,
        }
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, url: &str, body: Option<&str>) -> Result<Response> {
        if self.dry_run && method != Method::Get {
            tracing::info!(
                "[DRY-RUN] Would send {} request to {} with payload: {}",
                method,
                url,
                body.unwrap_or("")
            );
            return Ok(Response::new(204, ""));
        }

        let http_method = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut request = self
            .client
            .request(http_method, url)
            .basic_auth(&self.username, Some(&self.password));
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| Error::connection(format!("Failed to read response: {}", e)))?;

        Ok(Response::new(status, text))
    }
}
