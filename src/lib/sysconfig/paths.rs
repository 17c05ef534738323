// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use crate::SysnetError;

const NETWORK_DIR: &str = "etc/sysconfig/network";
const MODPROBE_DIR: &str = "etc/modprobe.d";
const UDEV_RULES_DIR: &str = "etc/udev/rules.d";
const PERSISTENT_NET_RULES: &str = "70-persistent-net.rules";
const DRIVER_RULES: &str = "80-sysnet-drivers.rules";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Locations of every file sysnet reads or writes, resolved against a root
/// directory. The root is `/` on a live system and a scratch directory in
/// tests and offline (installation chroot) runs.
pub struct SysconfigPaths {
    root: PathBuf,
}

impl Default for SysconfigPaths {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/"),
        }
    }
}

impl SysconfigPaths {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn network_dir(&self) -> PathBuf {
        self.root.join(NETWORK_DIR)
    }

    pub fn ifcfg_path(&self, name: &str) -> PathBuf {
        self.network_dir().join(format!("ifcfg-{name}"))
    }

    pub fn ifroute_path(&self, name: &str) -> PathBuf {
        self.network_dir().join(format!("ifroute-{name}"))
    }

    pub fn routes_path(&self) -> PathBuf {
        self.network_dir().join("routes")
    }

    /// `/etc/sysconfig/network/config`, the netconfig variables.
    pub fn netconfig_path(&self) -> PathBuf {
        self.network_dir().join("config")
    }

    /// `/etc/sysconfig/network/dhcp`, global DHCP client behavior.
    pub fn dhcp_path(&self) -> PathBuf {
        self.network_dir().join("dhcp")
    }

    pub fn hostname_path(&self) -> PathBuf {
        self.root.join("etc/hostname")
    }

    pub fn hosts_path(&self) -> PathBuf {
        self.root.join("etc/hosts")
    }

    pub fn install_inf_path(&self) -> PathBuf {
        self.root.join("etc/install.inf")
    }

    pub fn modprobe_dir(&self) -> PathBuf {
        self.root.join(MODPROBE_DIR)
    }

    pub fn modprobe_path(&self, driver: &str) -> PathBuf {
        self.modprobe_dir().join(format!("50-{driver}.conf"))
    }

    pub fn udev_rules_dir(&self) -> PathBuf {
        self.root.join(UDEV_RULES_DIR)
    }

    pub fn persistent_net_rules_path(&self) -> PathBuf {
        self.udev_rules_dir().join(PERSISTENT_NET_RULES)
    }

    pub fn driver_rules_path(&self) -> PathBuf {
        self.udev_rules_dir().join(DRIVER_RULES)
    }

    pub fn ipv4_forward_path(&self) -> PathBuf {
        self.root.join("proc/sys/net/ipv4/ip_forward")
    }

    pub fn ipv6_forward_path(&self) -> PathBuf {
        self.root.join("proc/sys/net/ipv6/conf/all/forwarding")
    }

    /// Names of the interfaces having an `ifcfg-*` file, in directory
    /// order as returned by the OS.
    pub fn ifcfg_names(&self) -> Result<Vec<String>, SysnetError> {
        let dir = self.network_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut ret = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(name) = file_name.strip_prefix("ifcfg-") {
                ret.push(name.to_string());
            }
        }
        ret.sort();
        Ok(ret)
    }

    /// Names of the interfaces having an `ifroute-*` file.
    pub fn ifroute_names(&self) -> Result<Vec<String>, SysnetError> {
        let dir = self.network_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut ret = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(name) = file_name.strip_prefix("ifroute-") {
                ret.push(name.to_string());
            }
        }
        ret.sort();
        Ok(ret)
    }
}
