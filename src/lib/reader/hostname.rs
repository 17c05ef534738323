// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;
use std::str::FromStr;

use crate::{Hostname, SysconfigPaths, SysnetError};

/// Reads the three hostname layers. Each layer has its own provenance and
/// fallback logic, they are never merged.
pub(crate) struct HostnameReader<'a> {
    paths: &'a SysconfigPaths,
}

impl<'a> HostnameReader<'a> {
    pub(crate) fn new(paths: &'a SysconfigPaths) -> Self {
        Self { paths }
    }

    pub(crate) fn read(&self) -> Result<Hostname, SysnetError> {
        let mut hostname = Hostname::new();

        let static_path = self.paths.hostname_path();
        if static_path.exists() {
            let content = std::fs::read_to_string(&static_path)?;
            let name = content.trim();
            if !name.is_empty() {
                hostname.static_hostname = Some(name.to_string());
            }
        }

        hostname.transient = transient_hostname();
        hostname.installer = self.installer_hostname();
        Ok(hostname)
    }

    /// install.inf only exists during installation, its hostname may be an
    /// IP literal that has to be reverse-resolved first.
    fn installer_hostname(&self) -> Option<String> {
        let path = self.paths.install_inf_path();
        let content = std::fs::read_to_string(path).ok()?;
        let raw = content.lines().find_map(|line| {
            line.strip_prefix("Hostname:").map(|v| v.trim().to_string())
        })?;
        if raw.is_empty() {
            return None;
        }
        let name = if let Ok(ip) = IpAddr::from_str(&raw) {
            match dns_lookup::lookup_addr(&ip) {
                Ok(resolved) => resolved,
                Err(e) => {
                    log::warn!(
                        "Cannot reverse-resolve installer hostname {raw}: {e}"
                    );
                    return None;
                }
            }
        } else {
            raw
        };
        // Short name, the domain part lives in the DNS searchlist
        name.split('.').next().map(|n| n.to_string())
    }
}

fn transient_hostname() -> Option<String> {
    match nix::unistd::gethostname() {
        Ok(name) => {
            let name = name.to_string_lossy().to_string();
            if name.is_empty() {
                None
            } else {
                Some(name)
            }
        }
        Err(e) => {
            log::debug!("gethostname() failed: {e}");
            None
        }
    }
}
