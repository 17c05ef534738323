// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{
    ConnectionCollection, DnsSettings, Driver, ErrorKind, Hostname,
    InterfaceCollection, RenameMechanism, Routing, SysnetError,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
/// Backend a [NetConfig] was read from.
pub enum ConfigSource {
    Sysconfig,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// The in-memory aggregate of the whole network configuration.
///
/// Built fresh by [crate::ConfigReader], mutated by callers, persisted by
/// [crate::ConfigWriter]. During a write two instances coexist, the old one
/// serving as the diff baseline.
pub struct NetConfig {
    #[serde(default)]
    pub interfaces: InterfaceCollection,
    #[serde(default)]
    pub connections: ConnectionCollection,
    #[serde(default)]
    pub routing: Routing,
    #[serde(default)]
    pub dns: DnsSettings,
    #[serde(default)]
    pub hostname: Hostname,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drivers: Vec<Driver>,
    #[serde(default)]
    pub source: ConfigSource,
}

impl NetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename an interface and propagate the new name to every route and
    /// connection referencing it, so the cross-references stay intact when
    /// the change is written back.
    pub fn rename_interface(
        &mut self,
        old_name: &str,
        new_name: &str,
        mechanism: RenameMechanism,
    ) -> Result<(), SysnetError> {
        if self.interfaces.by_name(new_name).is_some() {
            return Err(SysnetError::new(
                ErrorKind::InvalidArgument,
                format!("Interface name {new_name} is already in use"),
            ));
        }
        let Some(iface) = self.interfaces.by_name_mut(old_name) else {
            return Err(SysnetError::new(
                ErrorKind::InvalidArgument,
                format!("Unknown interface {old_name}"),
            ));
        };
        iface.rename(new_name, mechanism);

        for route in self.routing.routes_mut() {
            if route.iface.as_deref() == Some(old_name) {
                route.iface = Some(new_name.to_string());
            }
        }

        let rekey: Vec<String> = self
            .connections
            .iter()
            .filter(|c| c.interface == old_name)
            .map(|c| c.id.clone())
            .collect();
        for id in rekey {
            if let Some(mut conn) = self.connections.remove(&id) {
                conn.interface = new_name.to_string();
                // Sysconfig connection ids are the file name, which follows
                // the device name.
                if conn.id == old_name {
                    conn.id = new_name.to_string();
                }
                self.connections.push(conn);
            }
        }
        Ok(())
    }
}
