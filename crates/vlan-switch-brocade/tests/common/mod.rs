//! Test doubles and common utilities for Brocade driver contract tests
//!
//! [`SimulatedBrocade`] is a [`Transport`] that behaves like the NOS REST
//! API for the resources the driver touches: it keeps per-port state,
//! answers GETs with namespaced XML, returns 409/404 where the real switch
//! does, and records every request for ordering assertions.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use vlan_core::error::Result;
use vlan_core::{Method, PortMode, Response, Transport, VlanId, format_vlan_ranges};
use vlan_switch_brocade::{BROCADE_INTERFACE_NS, BrocadeSwitch};

pub const HOSTNAME: &str = "http://switch.test";
pub const INTERFACE_TYPE: &str = "TenGigabitEthernet";

/// State of one simulated port
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimPort {
    pub shutdown: bool,
    pub switchport: bool,
    pub mode: Option<PortMode>,
    pub trunk: BTreeSet<VlanId>,
    pub native: Option<VlanId>,
    pub native_tag: bool,
}

/// One request as the switch received it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path below the interface, e.g. "" or "/switchport/mode"
    pub resource: String,
    pub body: Option<String>,
}

impl RecordedRequest {
    /// Compact form for assertions, e.g. "PUT /switchport/mode"
    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.resource)
            .trim_end()
            .to_string()
    }
}

#[derive(Default)]
struct Inner {
    ports: HashMap<String, SimPort>,
    requests: Vec<RecordedRequest>,
    overrides: Vec<(Method, String, Response)>,
    saves: usize,
}

/// A simulated Brocade switch
#[derive(Clone, Default)]
pub struct SimulatedBrocade {
    inner: Arc<Mutex<Inner>>,
}

impl SimulatedBrocade {
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver talking to this simulated switch
    pub fn driver(&self) -> BrocadeSwitch {
        BrocadeSwitch::with_transport(HOSTNAME, INTERFACE_TYPE, Box::new(self.clone()))
    }

    /// Current state of a port
    pub fn port(&self, name: &str) -> SimPort {
        self.inner
            .lock()
            .unwrap()
            .ports
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the state of a port
    pub fn set_port(&self, name: &str, port: SimPort) {
        self.inner
            .lock()
            .unwrap()
            .ports
            .insert(name.to_string(), port);
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    /// Requests received so far in compact form
    pub fn request_lines(&self) -> Vec<String> {
        self.requests().iter().map(RecordedRequest::line).collect()
    }

    /// Forget recorded requests
    pub fn clear_requests(&self) {
        self.inner.lock().unwrap().requests.clear();
    }

    /// Answer `method` on `resource` with a fixed response from now on
    pub fn respond_with(&self, method: Method, resource: &str, status: u16, body: &str) {
        self.inner.lock().unwrap().overrides.push((
            method,
            resource.to_string(),
            Response::new(status, body),
        ));
    }

    /// Fail `method` on `resource` with `status` from now on
    pub fn fail_on(&self, method: Method, resource: &str, status: u16) {
        self.respond_with(method, resource, status, "<errors><error>injected</error></errors>");
    }

    /// Number of running-config saves received
    pub fn saves(&self) -> usize {
        self.inner.lock().unwrap().saves
    }
}

/// Text between `<tag>` and `</tag>` in a request body
fn tag_text<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = body.find(&open)? + open.len();
    let end = body[start..].find(&close)? + start;
    Some(&body[start..end])
}

fn ok() -> Response {
    Response::new(204, "")
}

fn conflict(what: &str) -> Response {
    Response::new(
        409,
        format!("<errors><error><error-message>{} already configured</error-message></error></errors>", what),
    )
}

fn not_found() -> Response {
    Response::new(404, "<errors><error>not found</error></errors>")
}

fn bad_request(why: &str) -> Response {
    Response::new(400, format!("<errors><error>{}</error></errors>", why))
}

fn handle(port: &mut SimPort, name: &str, method: Method, resource: &str, body: &str) -> Response {
    match (method, resource) {
        (Method::Get, "") => {
            let shutdown = if port.shutdown {
                "<shutdown>true</shutdown>"
            } else {
                ""
            };
            Response::new(
                200,
                format!(
                    r#"<tengigabitethernet xmlns="{}"><name>{}</name>{}</tengigabitethernet>"#,
                    BROCADE_INTERFACE_NS, name, shutdown
                ),
            )
        }
        (Method::Post, "") if body.contains("<shutdown>") => {
            if port.shutdown {
                return conflict("shutdown");
            }
            port.shutdown = true;
            Response::new(201, "")
        }
        (Method::Post, "") if body.contains("<switchport>") => {
            if port.switchport {
                return conflict("switchport");
            }
            port.switchport = true;
            port.mode = Some(PortMode::Access);
            Response::new(201, "")
        }
        (Method::Delete, "/shutdown") => {
            if !port.shutdown {
                return not_found();
            }
            port.shutdown = false;
            ok()
        }
        (Method::Get, "/switchport/mode") => match port.mode {
            Some(mode) if port.switchport => Response::new(
                200,
                format!(
                    r#"<mode xmlns="{}"><vlan-mode>{}</vlan-mode></mode>"#,
                    BROCADE_INTERFACE_NS, mode
                ),
            ),
            _ => not_found(),
        },
        (Method::Put, "/switchport/mode") => {
            if !port.switchport {
                return bad_request("switchport not enabled");
            }
            match tag_text(body, "vlan-mode").map(str::parse::<PortMode>) {
                Some(Ok(mode)) => {
                    port.mode = Some(mode);
                    ok()
                }
                _ => bad_request("invalid vlan-mode"),
            }
        }
        (Method::Get, "/switchport/trunk") => {
            let mut xml = format!(r#"<trunk xmlns="{}">"#, BROCADE_INTERFACE_NS);
            if !port.trunk.is_empty() {
                xml.push_str(&format!(
                    "<allowed><vlan><add>{}</add></vlan></allowed>",
                    format_vlan_ranges(&port.trunk)
                ));
            }
            if let Some(native) = port.native {
                xml.push_str(&format!("<native-vlan>{}</native-vlan>", native));
            }
            xml.push_str("</trunk>");
            Response::new(200, xml)
        }
        (Method::Put, "/switchport/trunk/allowed/vlan") => {
            if port.mode != Some(PortMode::Trunk) {
                return bad_request("port is not in trunk mode");
            }
            if let Some(vlan) = tag_text(body, "add") {
                match vlan.parse::<VlanId>() {
                    Ok(vlan) => port.trunk.insert(vlan),
                    Err(_) => return bad_request("invalid vlan"),
                };
            } else if let Some(vlan) = tag_text(body, "remove") {
                match vlan.parse::<VlanId>() {
                    Ok(vlan) => port.trunk.remove(&vlan),
                    Err(_) => return bad_request("invalid vlan"),
                };
            } else if tag_text(body, "none") == Some("true") {
                port.trunk.clear();
            } else {
                return bad_request("unrecognised allowed vlan payload");
            }
            ok()
        }
        (Method::Delete, "/switchport/trunk/tag/native-vlan") => {
            if !port.native_tag {
                return not_found();
            }
            port.native_tag = false;
            ok()
        }
        (Method::Put, "/switchport/trunk") => {
            if port.mode != Some(PortMode::Trunk) {
                return bad_request("port is not in trunk mode");
            }
            if port.native_tag {
                return bad_request("native vlan tagging is enabled");
            }
            match tag_text(body, "native-vlan").map(str::parse::<VlanId>) {
                Some(Ok(vlan)) => {
                    port.native = Some(vlan);
                    ok()
                }
                _ => bad_request("invalid native-vlan"),
            }
        }
        (Method::Delete, "/switchport/trunk/native-vlan") => {
            if port.native.take().is_none() {
                return not_found();
            }
            ok()
        }
        _ => bad_request("unsupported resource"),
    }
}

#[async_trait::async_trait]
impl Transport for SimulatedBrocade {
    async fn send(&self, method: Method, url: &str, body: Option<&str>) -> Result<Response> {
        let mut inner = self.inner.lock().unwrap();

        if url == format!("{}/rest/operations/bna-config-cmd", HOSTNAME) {
            inner.requests.push(RecordedRequest {
                method,
                resource: "bna-config-cmd".to_string(),
                body: body.map(str::to_string),
            });
            inner.saves += 1;
            return Ok(Response::new(200, ""));
        }

        let prefix = format!(
            "{}/rest/config/running/interface/{}/%22",
            HOSTNAME, INTERFACE_TYPE
        );
        let rest = url
            .strip_prefix(&prefix)
            .unwrap_or_else(|| panic!("unexpected URL: {}", url));
        let (name, resource) = rest
            .split_once("%22")
            .unwrap_or_else(|| panic!("unquoted port in URL: {}", url));

        inner.requests.push(RecordedRequest {
            method,
            resource: resource.to_string(),
            body: body.map(str::to_string),
        });

        let overridden = inner
            .overrides
            .iter()
            .find(|(m, r, _)| *m == method && r == resource)
            .map(|(_, _, response)| response.clone());
        if let Some(response) = overridden {
            return Ok(response);
        }

        let port = inner.ports.entry(name.to_string()).or_default();
        Ok(handle(port, name, method, resource, body.unwrap_or("")))
    }
}

/// Shorthand for a VLAN id known to be valid
pub fn vlan(id: u16) -> VlanId {
    VlanId::new(id).expect("valid VLAN id")
}

/// A port that is switching in trunk mode and up
pub fn trunk_port() -> SimPort {
    SimPort {
        switchport: true,
        mode: Some(PortMode::Trunk),
        ..SimPort::default()
    }
}
