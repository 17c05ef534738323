// SPDX-License-Identifier: Apache-2.0

use crate::sysconfig::SysconfigFile;
use crate::{
    CommandRunner, DhcpHostname, DnsSettings, SysconfigPaths, SysnetError,
};

use super::NETCONFIG_BIN;

/// Rewrites the netconfig DNS variables and triggers the resolv.conf
/// regeneration. DNS is one diff unit, the caller only invokes this when
/// any part of it changed and the whole variable set is rewritten.
pub(crate) struct DnsWriter<'a> {
    paths: &'a SysconfigPaths,
    runner: &'a dyn CommandRunner,
}

impl<'a> DnsWriter<'a> {
    pub(crate) fn new(
        paths: &'a SysconfigPaths,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self { paths, runner }
    }

    pub(crate) fn write(&self, dns: &DnsSettings) -> Result<(), SysnetError> {
        let mut config = SysconfigFile::new(&self.paths.netconfig_path());
        config.load()?;
        config.set("NETCONFIG_DNS_POLICY", &dns.resolv_policy);
        config.set(
            "NETCONFIG_DNS_STATIC_SERVERS",
            &dns.nameservers
                .iter()
                .map(|ip| ip.to_string())
                .collect::<Vec<String>>()
                .join(" "),
        );
        config.set(
            "NETCONFIG_DNS_STATIC_SEARCHLIST",
            &dns.searchlist.join(" "),
        );
        config.save()?;

        let mut dhcp = SysconfigFile::new(&self.paths.dhcp_path());
        dhcp.load()?;
        dhcp.set(
            "DHCLIENT_SET_HOSTNAME",
            if dns.dhcp_hostname == DhcpHostname::Any {
                "yes"
            } else {
                // The per-interface selector lives in the ifcfg files
                "no"
            },
        );
        dhcp.save()?;

        self.runner.run(NETCONFIG_BIN, &["update", "-m", "dns"])
    }
}
