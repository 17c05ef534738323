// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use crate::sysconfig::RoutesFile;
use crate::{
    InterfaceCollection, Route, Routing, RoutingTable, SysconfigPaths,
    SysnetError,
};

/// Merges the global routes file with every per-interface ifroute file
/// into one routing table.
pub(crate) struct RoutingReader<'a> {
    paths: &'a SysconfigPaths,
}

impl<'a> RoutingReader<'a> {
    pub(crate) fn new(paths: &'a SysconfigPaths) -> Self {
        Self { paths }
    }

    pub(crate) fn read(
        &self,
        interfaces: &InterfaceCollection,
    ) -> Result<Routing, SysnetError> {
        let mut routing = Routing::new();
        let mut table = RoutingTable::new();

        let mut global = RoutesFile::new(&self.paths.routes_path());
        global.load()?;
        table.merge(global.routes().to_vec());

        for name in self.paths.ifroute_names()? {
            let mut file = RoutesFile::new(&self.paths.ifroute_path(&name));
            file.load()?;
            let mut routes: Vec<Route> = file.routes().to_vec();
            for route in routes.iter_mut() {
                // Living in ifroute-<name> binds the route to that device
                // even without a device column
                if route.iface.is_none() {
                    route.iface = Some(name.clone());
                }
            }
            table.merge(routes);
        }

        // Dangling device references are kept: dropping user data is worse
        // than an orphaned route
        for route in table.routes() {
            if let Some(device) = route.iface.as_deref() {
                if interfaces.by_name(device).is_none() {
                    log::debug!(
                        "Route {} references unknown interface {device}",
                        route.destination
                    );
                }
            }
        }

        if !table.is_empty() {
            routing.tables.push(table);
        }
        routing.forward_ipv4 =
            read_forward_flag(&self.paths.ipv4_forward_path());
        routing.forward_ipv6 =
            read_forward_flag(&self.paths.ipv6_forward_path());
        Ok(routing)
    }
}

fn read_forward_flag(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .map(|s| s.trim() == "1")
        .unwrap_or(false)
}
