// SPDX-License-Identifier: Apache-2.0

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    ConnectionCollection, HwInfo, IfcfgFile, Interface, InterfaceCollection,
    SysconfigPaths, SysnetError,
};

use super::read_connection;

// Backup and package-manager leftovers next to real ifcfg files
const DENY_PATTERN: &str =
    r"(\.bak|\.orig|\.rpmnew|\.rpmorig|\.rpmsave|\.old|\.scpmbackup|~)$";

fn deny_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DENY_PATTERN).unwrap())
}

/// Builds the interface and connection collections.
///
/// Physical interfaces come from the hardware probe, independent of any
/// configuration file, so unconfigured hardware still shows up. Connections
/// come from the ifcfg files; one without matching hardware gets a virtual
/// or fake interface so it never holds a dangling reference.
pub(crate) struct InterfacesReader<'a> {
    paths: &'a SysconfigPaths,
    hw: &'a [HwInfo],
}

impl<'a> InterfacesReader<'a> {
    pub(crate) fn new(paths: &'a SysconfigPaths, hw: &'a [HwInfo]) -> Self {
        Self { paths, hw }
    }

    pub(crate) fn read(
        &self,
    ) -> Result<(InterfaceCollection, ConnectionCollection), SysnetError>
    {
        let mut interfaces = InterfaceCollection::new();
        let mut connections = ConnectionCollection::new();

        for hw in self.hw {
            interfaces.push(Interface::new_physical(hw.clone()));
        }

        for name in self.paths.ifcfg_names()? {
            if name == "lo" || deny_regex().is_match(&name) {
                continue;
            }
            let mut file = IfcfgFile::new(&self.paths.ifcfg_path(&name));
            file.load()?;
            let Some(conn) = read_connection(&name, None, &file)? else {
                continue;
            };
            if interfaces.by_name(&name).is_none() {
                let iface_type = conn.iface_type();
                let iface = if iface_type.is_virtual() {
                    Interface::new_virtual(&name, iface_type)
                } else {
                    // Configured but not present in hardware
                    log::debug!(
                        "No hardware for configured interface {name}"
                    );
                    Interface::new_fake(&name, iface_type)
                };
                interfaces.push(iface);
            }
            connections.push(conn);
        }
        Ok((interfaces, connections))
    }
}
