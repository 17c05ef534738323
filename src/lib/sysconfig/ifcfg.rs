// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;
use std::path::Path;

use indexmap::IndexMap;

use crate::{ErrorKind, InterfaceType, SysnetError};

use super::SysconfigFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Coercion applied to a declared ifcfg variable.
pub enum VarKind {
    Str,
    Integer,
    /// Lowercased keyword, e.g. `BOOTPROTO` or `STARTMODE` values.
    Symbol,
    Ip,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarValue {
    Str(String),
    Integer(i64),
    Symbol(String),
    Ip(IpAddr),
}

impl VarValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) | Self::Symbol(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_ip(&self) -> Option<IpAddr> {
        match self {
            Self::Ip(ip) => Some(*ip),
            _ => None,
        }
    }

    /// The string stored in the sysconfig file for this value.
    pub fn to_sysconfig(&self) -> String {
        match self {
            Self::Str(s) | Self::Symbol(s) => s.clone(),
            Self::Integer(i) => i.to_string(),
            Self::Ip(ip) => ip.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct VarDef {
    name: &'static str,
    kind: VarKind,
    collection: bool,
}

const fn scalar(name: &'static str, kind: VarKind) -> VarDef {
    VarDef {
        name,
        kind,
        collection: false,
    }
}

const fn collection(name: &'static str, kind: VarKind) -> VarDef {
    VarDef {
        name,
        kind,
        collection: true,
    }
}

// Declared variables. Collections use the sysconfig suffix convention:
// IPADDR, IPADDR_1, BONDING_SLAVE0... with the empty suffix being the
// primary value. Only declared variables are loaded and saved, anything
// else in the file is left alone.
const IFCFG_VARS: &[VarDef] = &[
    scalar("STARTMODE", VarKind::Symbol),
    scalar("BOOTPROTO", VarKind::Symbol),
    scalar("IFPLUGD_PRIORITY", VarKind::Integer),
    scalar("NAME", VarKind::Str),
    scalar("MTU", VarKind::Integer),
    scalar("ETHTOOL_OPTIONS", VarKind::Str),
    scalar("ZONE", VarKind::Str),
    scalar("DHCLIENT_SET_HOSTNAME", VarKind::Symbol),
    scalar("INTERFACETYPE", VarKind::Symbol),
    scalar("LLADDR", VarKind::Str),
    collection("IPADDR", VarKind::Str),
    collection("LABEL", VarKind::Str),
    collection("REMOTE_IPADDR", VarKind::Str),
    collection("BROADCAST", VarKind::Ip),
    collection("PREFIXLEN", VarKind::Integer),
    collection("NETMASK", VarKind::Str),
    scalar("WIRELESS_ESSID", VarKind::Str),
    scalar("WIRELESS_MODE", VarKind::Symbol),
    scalar("WIRELESS_AUTH_MODE", VarKind::Symbol),
    scalar("WIRELESS_WPA_PSK", VarKind::Str),
    scalar("WIRELESS_CHANNEL", VarKind::Integer),
    scalar("BONDING_MASTER", VarKind::Symbol),
    scalar("BONDING_MODULE_OPTS", VarKind::Str),
    collection("BONDING_SLAVE", VarKind::Str),
    scalar("BRIDGE", VarKind::Symbol),
    scalar("BRIDGE_PORTS", VarKind::Str),
    scalar("BRIDGE_STP", VarKind::Symbol),
    scalar("BRIDGE_FORWARDDELAY", VarKind::Integer),
    scalar("ETHERDEVICE", VarKind::Str),
    scalar("VLAN_ID", VarKind::Integer),
    scalar("IPOIB_MODE", VarKind::Symbol),
];

fn var_def(name: &str) -> Option<&'static VarDef> {
    IFCFG_VARS.iter().find(|d| d.name == name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Typed accessor over one `ifcfg-*` file.
///
/// Each declared variable holds a suffix-indexed map of typed values, a
/// scalar being the degenerate case of only the empty suffix. Undeclared
/// file content is preserved verbatim across load/save.
pub struct IfcfgFile {
    file: SysconfigFile,
    values: IndexMap<&'static str, IndexMap<String, VarValue>>,
}

impl IfcfgFile {
    pub fn new(path: &Path) -> Self {
        Self {
            file: SysconfigFile::new(path),
            values: IndexMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn exists(&self) -> bool {
        self.file.exists()
    }

    /// Load every declared variable from disk. A missing file yields
    /// defaults. Coercion failures are logged and treated as unset.
    pub fn load(&mut self) -> Result<(), SysnetError> {
        self.file.load()?;
        self.values.clear();
        for def in IFCFG_VARS {
            let mut vals: IndexMap<String, VarValue> = IndexMap::new();
            if def.collection {
                for key in self.file.keys_with_prefix(def.name) {
                    let suffix = key[def.name.len()..].to_string();
                    if let Some(value) = self
                        .file
                        .get(&key)
                        .and_then(|raw| Self::coerce(def, &key, raw))
                    {
                        vals.insert(suffix, value);
                    }
                }
            } else if let Some(value) = self
                .file
                .get(def.name)
                .and_then(|raw| Self::coerce(def, def.name, raw))
            {
                vals.insert(String::new(), value);
            }
            if !vals.is_empty() {
                self.values.insert(def.name, vals);
            }
        }
        Ok(())
    }

    fn coerce(def: &VarDef, key: &str, raw: &str) -> Option<VarValue> {
        if raw.is_empty() {
            return None;
        }
        match def.kind {
            VarKind::Str => Some(VarValue::Str(raw.to_string())),
            VarKind::Symbol => Some(VarValue::Symbol(raw.to_lowercase())),
            VarKind::Integer => match raw.parse::<i64>() {
                Ok(i) => Some(VarValue::Integer(i)),
                Err(_) => {
                    log::warn!("Ignoring non-integer value {raw} of {key}");
                    None
                }
            },
            VarKind::Ip => match raw.parse::<IpAddr>() {
                Ok(ip) => Some(VarValue::Ip(ip)),
                Err(_) => {
                    log::warn!("Ignoring invalid IP address {raw} of {key}");
                    None
                }
            },
        }
    }

    /// Write declared variables back. Unset variables have their keys
    /// removed, collections are cleared and repopulated since there is no
    /// sparse-delete primitive for suffixed keys.
    pub fn save(&mut self) -> Result<(), SysnetError> {
        for def in IFCFG_VARS {
            if def.collection {
                for key in self.file.keys_with_prefix(def.name) {
                    self.file.remove(&key);
                }
                if let Some(vals) = self.values.get(def.name) {
                    for (suffix, value) in vals {
                        let key = format!("{}{}", def.name, suffix);
                        self.file.set(&key, &value.to_sysconfig());
                    }
                }
            } else {
                match self
                    .values
                    .get(def.name)
                    .and_then(|vals| vals.get(""))
                {
                    Some(value) => {
                        self.file.set(def.name, &value.to_sysconfig())
                    }
                    None => {
                        self.file.remove(def.name);
                    }
                }
            }
        }
        self.file.save()
    }

    /// Reset all declared values in memory, used before writing a fully
    /// fresh variable set (e.g. the connection type changed).
    pub fn clean(&mut self) {
        self.values.clear();
    }

    pub fn remove_file(&self) -> Result<(), SysnetError> {
        self.file.remove_file()
    }

    /// The value under the default (empty) suffix.
    pub fn get(&self, name: &str) -> Option<&VarValue> {
        self.values.get(name).and_then(|vals| vals.get(""))
    }

    /// All values of a collection variable, keyed by suffix.
    pub fn values(&self, name: &str) -> Option<&IndexMap<String, VarValue>> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_str())
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|v| v.as_int())
    }

    /// Set the default-suffix value of a declared variable.
    pub fn set(
        &mut self,
        name: &str,
        value: VarValue,
    ) -> Result<(), SysnetError> {
        self.set_at(name, "", value)
    }

    /// Set the value under a specific suffix.
    pub fn set_at(
        &mut self,
        name: &str,
        suffix: &str,
        value: VarValue,
    ) -> Result<(), SysnetError> {
        let def = var_def(name).ok_or_else(|| {
            SysnetError::new(
                ErrorKind::Bug,
                format!("Undeclared ifcfg variable {name}"),
            )
        })?;
        self.values
            .entry(def.name)
            .or_default()
            .insert(suffix.to_string(), value);
        Ok(())
    }

    /// Unset a variable including all its suffixed values.
    pub fn unset(&mut self, name: &str) {
        self.values.shift_remove(name);
    }

    fn is_set(&self, name: &str) -> bool {
        self.values
            .get(name)
            .map(|vals| !vals.is_empty())
            .unwrap_or(false)
    }

    /// Infer the interface type from the loaded variables.
    ///
    /// Explicit signals beat structural inference, structural predicates
    /// are checked in a fixed priority since a file can satisfy more than
    /// one. First match wins.
    pub fn iface_type(&self) -> InterfaceType {
        if let Some(forced) = self.get_str("INTERFACETYPE") {
            return InterfaceType::from_sysconfig(forced);
        }
        if self.get_str("BRIDGE") == Some("yes") {
            return InterfaceType::Bridge;
        }
        if self.get_str("BONDING_MASTER") == Some("yes")
            || self.is_set("BONDING_SLAVE")
        {
            return InterfaceType::Bond;
        }
        if self.is_set("WIRELESS_ESSID")
            || self.is_set("WIRELESS_MODE")
            || self.is_set("WIRELESS_AUTH_MODE")
            || self.is_set("WIRELESS_WPA_PSK")
            || self.is_set("WIRELESS_CHANNEL")
        {
            return InterfaceType::Wireless;
        }
        if self.is_set("ETHERDEVICE") {
            return InterfaceType::Vlan;
        }
        if self.is_set("IPOIB_MODE") {
            return InterfaceType::InfiniBand;
        }
        InterfaceType::Ethernet
    }
}
