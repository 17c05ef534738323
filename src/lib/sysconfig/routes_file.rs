// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ipnet::IpNet;

use crate::{Route, RouteDestination, SysnetError};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One routes table file, either the global `routes` or a per-interface
/// `ifroute-*` file.
///
/// Format: whitespace-separated `destination gateway netmask device
/// [options]`, `-` standing for an empty column, `default` being a
/// sentinel destination distinct from any CIDR.
pub struct RoutesFile {
    path: PathBuf,
    routes: Vec<Route>,
}

impl RoutesFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            routes: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the file. Missing file loads as an empty table. Unparsable
    /// lines are logged and skipped, one broken line must not discard the
    /// rest of the table.
    pub fn load(&mut self) -> Result<(), SysnetError> {
        self.routes.clear();
        if !self.path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.path)?;
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match Self::parse_line(trimmed) {
                Ok(route) => self.routes.push(route),
                Err(e) => {
                    log::warn!(
                        "Skipping invalid route line {trimmed:?} in {}: {e}",
                        self.path.display()
                    );
                }
            }
        }
        Ok(())
    }

    fn parse_line(line: &str) -> Result<Route, SysnetError> {
        let mut fields = line.split_whitespace();
        let dest = fields.next().unwrap_or_default();
        let gateway = fields.next().unwrap_or("-");
        let netmask = fields.next().unwrap_or("-");
        let device = fields.next().unwrap_or("-");

        let destination = if dest == "default" {
            RouteDestination::Default
        } else if dest.contains('/') || netmask == "-" {
            RouteDestination::from_str(dest)?
        } else {
            // Old-style netmask column instead of prefix notation
            let ip = IpAddr::from_str(dest)?;
            let mask = IpAddr::from_str(netmask)?;
            let prefix = ipnet::ip_mask_to_prefix(mask).map_err(|_| {
                SysnetError::new(
                    crate::ErrorKind::InvalidArgument,
                    format!("Invalid netmask {netmask}"),
                )
            })?;
            RouteDestination::Cidr(IpNet::new(ip, prefix).map_err(|e| {
                SysnetError::new(
                    crate::ErrorKind::InvalidArgument,
                    format!("Invalid destination {dest}/{netmask}: {e}"),
                )
            })?)
        };

        let mut route = Route::new(destination);
        if gateway != "-" {
            route.gateway = Some(IpAddr::from_str(gateway)?);
        }
        if device != "-" {
            route.iface = Some(device.to_string());
        }

        let mut options: Vec<String> = Vec::new();
        let mut rest = fields.peekable();
        while let Some(token) = rest.next() {
            if token == "metric" {
                if let Some(value) =
                    rest.peek().and_then(|v| v.parse::<u32>().ok())
                {
                    route.metric = Some(value);
                    rest.next();
                    continue;
                }
            }
            options.push(token.to_string());
        }
        if !options.is_empty() {
            route.options = Some(options.join(" "));
        }
        Ok(route)
    }

    fn format_line(route: &Route) -> String {
        let mut fields = vec![
            route.destination.to_string(),
            route
                .gateway
                .map(|g| g.to_string())
                .unwrap_or_else(|| "-".to_string()),
            // Prefix notation in the destination, the netmask column stays
            // empty
            "-".to_string(),
            route.iface.clone().unwrap_or_else(|| "-".to_string()),
        ];
        if let Some(metric) = route.metric {
            fields.push(format!("metric {metric}"));
        }
        if let Some(options) = route.options.as_deref() {
            fields.push(options.to_string());
        }
        fields.join(" ")
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn set_routes(&mut self, routes: Vec<Route>) {
        self.routes = routes;
    }

    pub fn save(&self) -> Result<(), SysnetError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = String::new();
        for route in &self.routes {
            content.push_str(&Self::format_line(route));
            content.push('\n');
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Delete the file entirely. An empty ifroute file means something
    /// else than a missing one, callers use this when a table becomes
    /// empty.
    pub fn remove(&self) -> Result<(), SysnetError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Routes belonging to the given interface's ifroute file.
pub(crate) fn find_routes_for_iface(name: &str, routes: &[Route]) -> Vec<Route> {
    routes
        .iter()
        .filter(|r| r.iface.as_deref() == Some(name))
        .cloned()
        .collect()
}

/// Routes with no owning interface, they belong to the global routes file.
/// A route whose interface was removed becomes untethered, not dropped.
pub(crate) fn routes_without_iface(routes: &[Route]) -> Vec<Route> {
    routes
        .iter()
        .filter(|r| r.iface.is_none())
        .cloned()
        .collect()
}
