// SPDX-License-Identifier: Apache-2.0

use crate::sysconfig::HostsFile;
use crate::{
    handler, ConnectionConfig, IfcfgFile, SysconfigPaths, SysnetError,
    VarValue,
};

use super::WriteOptions;

/// Persists one connection into its ifcfg file via the type-specific
/// handler.
pub(crate) struct ConnectionConfigWriter<'a> {
    paths: &'a SysconfigPaths,
    options: &'a WriteOptions,
}

impl<'a> ConnectionConfigWriter<'a> {
    pub(crate) fn new(
        paths: &'a SysconfigPaths,
        options: &'a WriteOptions,
    ) -> Self {
        Self { paths, options }
    }

    pub(crate) fn write(
        &self,
        conn: &ConnectionConfig,
    ) -> Result<(), SysnetError> {
        let iface_type = conn.iface_type();
        let Some(handler) = handler::for_type(&iface_type) else {
            log::warn!(
                "Not writing connection {}: no support for type {iface_type}",
                conn.id
            );
            return Ok(());
        };
        let mut file = IfcfgFile::new(&self.paths.ifcfg_path(&conn.id));
        // Load first so undeclared variables in an existing file survive
        file.load()?;
        // The declared set starts from scratch, the connection type may
        // have changed
        file.clean();
        self.write_common(conn, &mut file)?;
        handler.write_extra(conn, &mut file)?;
        file.save()
    }

    fn write_common(
        &self,
        conn: &ConnectionConfig,
        file: &mut IfcfgFile,
    ) -> Result<(), SysnetError> {
        file.set(
            "BOOTPROTO",
            VarValue::Symbol(conn.bootproto.as_str().to_string()),
        )?;
        file.set(
            "STARTMODE",
            VarValue::Symbol(conn.startmode.as_str().to_string()),
        )?;
        if let Some(priority) = conn.ifplugd_priority {
            file.set("IFPLUGD_PRIORITY", VarValue::Integer(priority.into()))?;
        }
        if let Some(description) = conn.description.as_deref() {
            file.set("NAME", VarValue::Str(description.to_string()))?;
        }
        if let Some(mtu) = conn.mtu {
            file.set("MTU", VarValue::Integer(mtu.into()))?;
        }
        if let Some(ethtool) = conn.ethtool_options.as_deref() {
            file.set("ETHTOOL_OPTIONS", VarValue::Str(ethtool.to_string()))?;
        }
        if let Some(zone) = conn.firewall_zone.as_deref() {
            file.set("ZONE", VarValue::Str(zone.to_string()))?;
        }
        if let Some(flag) = conn.dhclient_set_hostname {
            file.set(
                "DHCLIENT_SET_HOSTNAME",
                VarValue::Symbol(
                    if flag { "yes" } else { "no" }.to_string(),
                ),
            )?;
        }
        for ip in &conn.ip {
            file.set_at(
                "IPADDR",
                &ip.id,
                VarValue::Str(ip.address.to_string()),
            )?;
            if let Some(label) = ip.label.as_deref() {
                file.set_at(
                    "LABEL",
                    &ip.id,
                    VarValue::Str(label.to_string()),
                )?;
            }
            if let Some(remote) = ip.remote_address.as_ref() {
                file.set_at(
                    "REMOTE_IPADDR",
                    &ip.id,
                    VarValue::Str(remote.to_string()),
                )?;
            }
            if let Some(broadcast) = ip.broadcast {
                file.set_at("BROADCAST", &ip.id, VarValue::Ip(broadcast))?;
            }
        }
        Ok(())
    }

    /// Delete a connection's file. Outside autoinstall the hosts entry
    /// keyed by the connection's static IP goes with it.
    pub(crate) fn remove(
        &self,
        conn: &ConnectionConfig,
    ) -> Result<(), SysnetError> {
        log::info!("Removing connection {}", conn.id);
        IfcfgFile::new(&self.paths.ifcfg_path(&conn.id)).remove_file()?;
        if !self.options.autoinstall {
            if let Some(ip) = conn.static_ip() {
                let mut hosts = HostsFile::new(&self.paths.hosts_path());
                hosts.load()?;
                hosts.remove_entry(ip.addr());
                hosts.save()?;
            }
        }
        Ok(())
    }
}
