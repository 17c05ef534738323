// SPDX-License-Identifier: Apache-2.0

mod bond;
mod bridge;
mod infiniband;
mod vlan;
mod wireless;

use std::net::IpAddr;

use indexmap::IndexMap;
use ipnet::IpNet;
use serde::{Deserialize, Serialize};

pub use self::bond::BondConfig;
pub use self::bridge::BridgeConfig;
pub use self::infiniband::{InfinibandConfig, IpoibMode};
pub use self::vlan::VlanConfig;
pub use self::wireless::{WirelessConfig, WirelessMode};

use crate::InterfaceType;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
/// The sysconfig `BOOTPROTO` value.
pub enum BootProto {
    #[default]
    Static,
    Dhcp,
    Dhcp4,
    Dhcp6,
    Autoip,
    None,
    Ibft,
}

impl BootProto {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dhcp => "dhcp",
            Self::Dhcp4 => "dhcp4",
            Self::Dhcp6 => "dhcp6",
            Self::Autoip => "autoip",
            Self::None => "none",
            Self::Ibft => "ibft",
        }
    }

    pub fn from_sysconfig(value: &str) -> Option<Self> {
        match value {
            "static" => Some(Self::Static),
            "dhcp" | "dhcp+autoip" => Some(Self::Dhcp),
            "dhcp4" => Some(Self::Dhcp4),
            "dhcp6" => Some(Self::Dhcp6),
            "autoip" => Some(Self::Autoip),
            "none" => Some(Self::None),
            "ibft" => Some(Self::Ibft),
            _ => None,
        }
    }

    pub fn is_dhcp(&self) -> bool {
        matches!(self, Self::Dhcp | Self::Dhcp4 | Self::Dhcp6)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
/// The sysconfig `STARTMODE` value. Legacy `onboot` is read as `auto`.
pub enum StartMode {
    #[default]
    Auto,
    Hotplug,
    Ifplugd,
    Manual,
    Nfsroot,
    Off,
}

impl StartMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Hotplug => "hotplug",
            Self::Ifplugd => "ifplugd",
            Self::Manual => "manual",
            Self::Nfsroot => "nfsroot",
            Self::Off => "off",
        }
    }

    pub fn from_sysconfig(value: &str) -> Option<Self> {
        match value {
            "auto" | "onboot" | "on" | "boot" => Some(Self::Auto),
            "hotplug" => Some(Self::Hotplug),
            "ifplugd" => Some(Self::Ifplugd),
            "manual" => Some(Self::Manual),
            "nfsroot" => Some(Self::Nfsroot),
            "off" => Some(Self::Off),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// One address assignment of a connection.
///
/// `id` is the sysconfig suffix distinguishing multiple addresses on one
/// device (`IPADDR` vs `IPADDR_1`), the empty string being the primary
/// value.
pub struct IpConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub address: IpNet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_address: Option<IpNet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<IpAddr>,
}

impl IpConfig {
    pub fn new(id: &str, address: IpNet) -> Self {
        Self {
            id: id.to_string(),
            address,
            label: None,
            remote_address: None,
            broadcast: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// Per-interface-type settings of a connection.
pub enum ConnectionExtra {
    #[default]
    Ethernet,
    Wireless(WirelessConfig),
    Bond(BondConfig),
    Bridge(BridgeConfig),
    Vlan(VlanConfig),
    Infiniband(InfinibandConfig),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", default)]
#[non_exhaustive]
/// A named bundle of protocol settings for one interface.
///
/// Decoupled from [crate::Interface]: the target device does not have to
/// exist for the connection to be valid.
pub struct ConnectionConfig {
    pub id: String,
    /// Name of the target device.
    pub interface: String,
    pub bootproto: BootProto,
    pub startmode: StartMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifplugd_priority: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ip: Vec<IpConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethtool_options: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_zone: Option<String>,
    /// Hostname registered in /etc/hosts for this connection's static IP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Per-interface `DHCLIENT_SET_HOSTNAME` flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dhclient_set_hostname: Option<bool>,
    #[serde(default, skip_serializing_if = "is_default_extra")]
    pub extra: ConnectionExtra,
}

fn is_default_extra(extra: &ConnectionExtra) -> bool {
    *extra == ConnectionExtra::Ethernet
}

impl ConnectionConfig {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            interface: id.to_string(),
            ..Default::default()
        }
    }

    pub fn iface_type(&self) -> InterfaceType {
        match &self.extra {
            ConnectionExtra::Ethernet => InterfaceType::Ethernet,
            ConnectionExtra::Wireless(_) => InterfaceType::Wireless,
            ConnectionExtra::Bond(_) => InterfaceType::Bond,
            ConnectionExtra::Bridge(_) => InterfaceType::Bridge,
            ConnectionExtra::Vlan(_) => InterfaceType::Vlan,
            ConnectionExtra::Infiniband(_) => InterfaceType::InfiniBand,
        }
    }

    /// The primary static address, if any.
    pub fn static_ip(&self) -> Option<&IpNet> {
        if self.bootproto == BootProto::Static {
            self.ip.first().map(|i| &i.address)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Collection of [ConnectionConfig], unique by id, insertion ordered,
/// O(1) lookup by id.
pub struct ConnectionCollection {
    conns: IndexMap<String, ConnectionConfig>,
}

impl ConnectionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection, replacing any existing one with the same id.
    pub fn push(&mut self, conn: ConnectionConfig) {
        self.conns.insert(conn.id.clone(), conn);
    }

    pub fn by_id(&self, id: &str) -> Option<&ConnectionConfig> {
        self.conns.get(id)
    }

    pub fn by_id_mut(&mut self, id: &str) -> Option<&mut ConnectionConfig> {
        self.conns.get_mut(id)
    }

    /// Connections targeting the given device name.
    pub fn by_interface(
        &self,
        name: &str,
    ) -> impl Iterator<Item = &ConnectionConfig> {
        let name = name.to_string();
        self.conns.values().filter(move |c| c.interface == name)
    }

    pub fn remove(&mut self, id: &str) -> Option<ConnectionConfig> {
        self.conns.shift_remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConnectionConfig> {
        self.conns.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ConnectionConfig> {
        self.conns.values_mut()
    }

    pub fn len(&self) -> usize {
        self.conns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conns.is_empty()
    }
}

impl Serialize for ConnectionCollection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.conns.values())
    }
}

impl<'de> Deserialize<'de> for ConnectionCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let conns = Vec::<ConnectionConfig>::deserialize(deserializer)?;
        let mut ret = Self::new();
        for conn in conns {
            ret.push(conn);
        }
        Ok(ret)
    }
}
