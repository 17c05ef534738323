// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;
use std::str::FromStr;

use crate::sysconfig::SysconfigFile;
use crate::{
    ConnectionCollection, DhcpHostname, DnsSettings, SysconfigPaths,
    SysnetError,
};

/// Reads the netconfig DNS variables plus the DHCP hostname policy.
pub(crate) struct DnsReader<'a> {
    paths: &'a SysconfigPaths,
}

impl<'a> DnsReader<'a> {
    pub(crate) fn new(paths: &'a SysconfigPaths) -> Self {
        Self { paths }
    }

    pub(crate) fn read(
        &self,
        connections: &ConnectionCollection,
    ) -> Result<DnsSettings, SysnetError> {
        let mut dns = DnsSettings::new();

        let mut config = SysconfigFile::new(&self.paths.netconfig_path());
        config.load()?;
        if let Some(policy) = config.get("NETCONFIG_DNS_POLICY") {
            if !policy.is_empty() {
                dns.resolv_policy = policy.to_string();
            }
        }
        if let Some(servers) = config.get("NETCONFIG_DNS_STATIC_SERVERS") {
            for server in servers.split_whitespace() {
                match IpAddr::from_str(server) {
                    Ok(ip) => dns.nameservers.push(ip),
                    Err(_) => {
                        log::warn!("Ignoring invalid nameserver {server}")
                    }
                }
            }
        }
        if let Some(searchlist) =
            config.get("NETCONFIG_DNS_STATIC_SEARCHLIST")
        {
            dns.searchlist = searchlist
                .split_whitespace()
                .map(|d| d.to_string())
                .collect();
        }

        let mut dhcp = SysconfigFile::new(&self.paths.dhcp_path());
        dhcp.load()?;
        dns.dhcp_hostname =
            if dhcp.get("DHCLIENT_SET_HOSTNAME") == Some("yes") {
                DhcpHostname::Any
            } else if let Some(conn) = connections
                .iter()
                .find(|c| c.dhclient_set_hostname == Some(true))
            {
                DhcpHostname::Iface(conn.interface.clone())
            } else {
                DhcpHostname::None
            };
        Ok(dns)
    }
}
