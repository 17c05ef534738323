// SPDX-License-Identifier: Apache-2.0

mod connections;
mod dns;
mod drivers;
mod hostname;
mod interfaces;
mod routing;

pub(crate) use self::connections::read_connection;

use crate::sysconfig::HostsFile;
use crate::{ConfigSource, HwInfo, NetConfig, SysconfigPaths, SysnetError};

use self::dns::DnsReader;
use self::drivers::read_drivers;
use self::hostname::HostnameReader;
use self::interfaces::InterfacesReader;
use self::routing::RoutingReader;

/// Builds a [NetConfig] from the on-disk sysconfig state plus the probed
/// hardware. The hardware list comes from the caller (usually
/// [crate::probe_hardware]), readers never touch the probing backend.
#[derive(Debug)]
pub struct ConfigReader {
    paths: SysconfigPaths,
    hw: Vec<HwInfo>,
}

impl ConfigReader {
    pub fn new(paths: SysconfigPaths, hw: Vec<HwInfo>) -> Self {
        Self { paths, hw }
    }

    pub fn read(&self) -> Result<NetConfig, SysnetError> {
        let mut config = NetConfig::new();
        let (interfaces, mut connections) =
            InterfacesReader::new(&self.paths, &self.hw).read()?;

        // Hostnames registered for static IPs belong to their connections
        let mut hosts = HostsFile::new(&self.paths.hosts_path());
        hosts.load()?;
        for conn in connections.iter_mut() {
            let Some(ip) = conn.static_ip().map(|net| net.addr()) else {
                continue;
            };
            conn.hostname =
                hosts.names_for(ip).and_then(|names| names.first().cloned());
        }

        config.interfaces = interfaces;
        config.routing =
            RoutingReader::new(&self.paths).read(&config.interfaces)?;
        config.dns = DnsReader::new(&self.paths).read(&connections)?;
        config.hostname = HostnameReader::new(&self.paths).read()?;
        config.drivers = read_drivers(&self.paths)?;
        config.connections = connections;
        config.source = ConfigSource::Sysconfig;
        Ok(config)
    }
}
