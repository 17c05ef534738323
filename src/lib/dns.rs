// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
/// Which interface is allowed to set the hostname via DHCP.
pub enum DhcpHostname {
    /// Any interface may set it (`DHCLIENT_SET_HOSTNAME=yes` globally).
    #[default]
    Any,
    /// No interface may set it.
    None,
    /// Only the named interface may set it.
    Iface(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
#[non_exhaustive]
/// Resolver configuration, the netconfig DNS variables.
///
/// Diffed by the writer as one unit: any change rewrites policy, servers
/// and searchlist together. Netconfig regenerates resolv.conf from the
/// whole variable set, per-field writes would hand it a mixed state.
pub struct DnsSettings {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<IpAddr>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub searchlist: Vec<String>,
    pub resolv_policy: String,
    pub dhcp_hostname: DhcpHostname,
}

impl Default for DnsSettings {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            searchlist: Vec::new(),
            resolv_policy: "auto".to_string(),
            dhcp_hostname: DhcpHostname::default(),
        }
    }
}

impl DnsSettings {
    pub fn new() -> Self {
        Self::default()
    }
}
