// SPDX-License-Identifier: Apache-2.0

mod connections;
mod dns;
mod hostname;
mod interfaces;

use std::collections::HashSet;

use crate::sysconfig::{
    find_routes_for_iface, routes_without_iface, HostsFile, RoutesFile,
};
use crate::{
    CommandRunner, DhcpHostname, Driver, IfcfgFile, NetConfig, Route,
    SysconfigPaths, SysnetError, VarValue,
};

use self::connections::ConnectionConfigWriter;
use self::dns::DnsWriter;
use self::hostname::HostnameWriter;
use self::interfaces::InterfacesWriter;

pub(crate) const SYSCTL_BIN: &str = "/usr/sbin/sysctl";
pub(crate) const IFDOWN_BIN: &str = "/sbin/ifdown";
pub(crate) const UDEVADM_BIN: &str = "/usr/bin/udevadm";
pub(crate) const NETCONFIG_BIN: &str = "/sbin/netconfig";
pub(crate) const HOSTNAME_BIN: &str = "/usr/bin/hostname";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Behavior switches of [ConfigWriter].
pub struct WriteOptions {
    /// Unattended installation: devices may not be live yet, so renamed
    /// interfaces are not shut down and hosts entries are not unregistered.
    pub autoinstall: bool,
    /// Reload udev rules after writing them. Off for tests and dry runs.
    pub reload_udev: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            autoinstall: false,
            reload_udev: true,
        }
    }
}

/// Persists a [NetConfig], diffing against the previously read one to
/// touch only the files that actually changed.
pub struct ConfigWriter<'a> {
    paths: SysconfigPaths,
    runner: &'a dyn CommandRunner,
    options: WriteOptions,
}

impl<'a> ConfigWriter<'a> {
    pub fn new(paths: SysconfigPaths, runner: &'a dyn CommandRunner) -> Self {
        Self {
            paths,
            runner,
            options: WriteOptions::default(),
        }
    }

    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Write the configuration. `old` is the state the system was read
    /// into before the caller's changes; unchanged parts are skipped,
    /// entities present only in `old` are removed from disk.
    pub fn write(
        &self,
        config: &NetConfig,
        old: Option<&NetConfig>,
    ) -> Result<(), SysnetError> {
        // Cheap and idempotent, no diffing needed
        self.write_forwarding(config)?;
        self.write_routes(config, old)?;
        self.write_drivers(config, old)?;

        InterfacesWriter::new(&self.paths, self.runner, &self.options)
            .write(&config.interfaces)?;

        if old.map(|o| &o.dns) != Some(&config.dns) {
            DnsWriter::new(&self.paths, self.runner).write(&config.dns)?;
        }
        if old.map(|o| o.hostname.static_hostname.as_deref())
            != Some(config.hostname.static_hostname.as_deref())
        {
            HostnameWriter::new(&self.paths, self.runner, &self.options)
                .write(&config.hostname)?;
        }

        self.write_connections(config, old)?;
        self.project_dhcp_hostname(config)?;
        // After all IP-bearing connections are finalized
        self.flush_hosts(config, old)?;
        Ok(())
    }

    fn write_forwarding(&self, config: &NetConfig) -> Result<(), SysnetError> {
        let v4 = u8::from(config.routing.forward_ipv4);
        let v6 = u8::from(config.routing.forward_ipv6);
        self.runner.run(
            SYSCTL_BIN,
            &["-w", &format!("net.ipv4.ip_forward={v4}")],
        )?;
        self.runner.run(
            SYSCTL_BIN,
            &["-w", &format!("net.ipv6.conf.all.forwarding={v6}")],
        )?;
        Ok(())
    }

    fn write_routes(
        &self,
        config: &NetConfig,
        old: Option<&NetConfig>,
    ) -> Result<(), SysnetError> {
        let routes: Vec<Route> =
            config.routing.routes().cloned().collect();

        for iface in
            config.interfaces.iter().filter(|i| !i.name.is_empty())
        {
            let subset = find_routes_for_iface(&iface.name, &routes);
            let mut file =
                RoutesFile::new(&self.paths.ifroute_path(&iface.name));
            if subset.is_empty() {
                file.remove()?;
            } else {
                file.set_routes(subset);
                file.save()?;
            }
        }

        // Interfaces that disappeared since the last read leave no stale
        // ifroute file behind
        if let Some(old) = old {
            for old_iface in old.interfaces.iter() {
                if config.interfaces.by_name(&old_iface.name).is_none() {
                    RoutesFile::new(
                        &self.paths.ifroute_path(&old_iface.name),
                    )
                    .remove()?;
                }
            }
        }

        // A route bound to a device this config does not know keeps its
        // device column but lands in the global file, untethered routes
        // must not vanish
        let known_names: HashSet<&str> =
            config.interfaces.iter().map(|i| i.name.as_str()).collect();
        let mut globals = routes_without_iface(&routes);
        for route in &routes {
            if let Some(name) = route.iface.as_deref() {
                if !known_names.contains(name) {
                    globals.push(route.clone());
                }
            }
        }
        let mut file = RoutesFile::new(&self.paths.routes_path());
        if globals.is_empty() {
            file.remove()?;
        } else {
            file.set_routes(globals);
            file.save()?;
        }
        Ok(())
    }

    fn write_drivers(
        &self,
        config: &NetConfig,
        old: Option<&NetConfig>,
    ) -> Result<(), SysnetError> {
        let old_drivers: &[Driver] =
            old.map(|o| o.drivers.as_slice()).unwrap_or(&[]);
        for driver in &config.drivers {
            if old_drivers.contains(driver) {
                continue;
            }
            let path = self.paths.modprobe_path(&driver.name);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, driver.modprobe_line())?;
        }
        for old_driver in old_drivers {
            if !config.drivers.iter().any(|d| d.name == old_driver.name) {
                let path = self.paths.modprobe_path(&old_driver.name);
                match std::fs::remove_file(&path) {
                    Ok(()) => (),
                    Err(e)
                        if e.kind()
                            == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Ok(())
    }

    fn write_connections(
        &self,
        config: &NetConfig,
        old: Option<&NetConfig>,
    ) -> Result<(), SysnetError> {
        let writer = ConnectionConfigWriter::new(&self.paths, &self.options);

        // Removal first: it has side effects (hosts unregistration) that
        // overwriting would not trigger
        if let Some(old) = old {
            for old_conn in old.connections.iter() {
                if config.connections.by_id(&old_conn.id).is_none() {
                    writer.remove(old_conn)?;
                }
            }
        }

        for conn in config.connections.iter() {
            if let Some(old_conn) =
                old.and_then(|o| o.connections.by_id(&conn.id))
            {
                if old_conn == conn {
                    continue;
                }
            }
            writer.write(conn)?;
        }
        Ok(())
    }

    /// The `Iface` hostname selector materializes as
    /// DHCLIENT_SET_HOSTNAME in the selected connection's ifcfg file.
    /// Runs after the connection pass so a rewritten file keeps the
    /// flag. An explicit per-connection flag wins over the selector.
    fn project_dhcp_hostname(
        &self,
        config: &NetConfig,
    ) -> Result<(), SysnetError> {
        let DhcpHostname::Iface(selected) = &config.dns.dhcp_hostname
        else {
            return Ok(());
        };
        for conn in config.connections.iter() {
            if conn.dhclient_set_hostname.is_some() {
                continue;
            }
            let mut file =
                IfcfgFile::new(&self.paths.ifcfg_path(&conn.id));
            if !file.exists() {
                continue;
            }
            file.load()?;
            let current = file.get_str("DHCLIENT_SET_HOSTNAME");
            if &conn.interface == selected {
                if current != Some("yes") {
                    file.set(
                        "DHCLIENT_SET_HOSTNAME",
                        VarValue::Symbol("yes".to_string()),
                    )?;
                    file.save()?;
                }
            } else if current == Some("yes") {
                file.unset("DHCLIENT_SET_HOSTNAME");
                file.save()?;
            }
        }
        Ok(())
    }

    fn flush_hosts(
        &self,
        config: &NetConfig,
        old: Option<&NetConfig>,
    ) -> Result<(), SysnetError> {
        let mut hosts = HostsFile::new(&self.paths.hosts_path());
        hosts.load()?;
        // An entry registered for an address a kept connection no longer
        // has would survive as a stale alias
        if let (Some(old), false) = (old, self.options.autoinstall) {
            for old_conn in old.connections.iter() {
                if old_conn.hostname.is_none() {
                    continue;
                }
                let Some(old_ip) = old_conn.static_ip() else {
                    continue;
                };
                let kept = config
                    .connections
                    .by_id(&old_conn.id)
                    .and_then(|c| c.static_ip())
                    == Some(old_ip);
                if !kept {
                    hosts.remove_entry(old_ip.addr());
                }
            }
        }
        for conn in config.connections.iter() {
            let (Some(ip), Some(hostname)) =
                (conn.static_ip(), conn.hostname.as_deref())
            else {
                continue;
            };
            let mut names = vec![hostname.to_string()];
            if let Some(short) = hostname.split('.').next() {
                if short != hostname {
                    names.push(short.to_string());
                }
            }
            hosts.set_entry(ip.addr(), names);
        }
        hosts.save()
    }
}
