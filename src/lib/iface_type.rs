// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[non_exhaustive]
#[serde(rename_all = "kebab-case")]
/// Interface type
pub enum InterfaceType {
    /// Ethernet interface.
    /// Deserialize and serialize from/to 'ethernet'.
    Ethernet,
    /// Wireless(IEEE 802.11) interface.
    /// Deserialize and serialize from/to 'wireless'.
    Wireless,
    /// Bond interface.
    /// Deserialize and serialize from/to 'bond'.
    Bond,
    /// Bridge provided by Linux kernel.
    /// Deserialize and serialize from/to 'bridge'.
    Bridge,
    /// VLAN interface.
    /// Deserialize and serialize from/to 'vlan'.
    Vlan,
    /// IP over InfiniBand interface.
    /// Deserialize and serialize from/to 'infiniband'.
    #[serde(rename = "infiniband")]
    InfiniBand,
    /// TUN interface.
    /// Deserialize and serialize from/to 'tun'.
    Tun,
    /// TAP interface.
    /// Deserialize and serialize from/to 'tap'.
    Tap,
    /// Dummy interface.
    /// Deserialize and serialize from/to 'dummy'.
    Dummy,
    /// Interface unknown to sysnet
    #[serde(untagged)]
    Unknown(String),
}

impl Default for InterfaceType {
    fn default() -> Self {
        Self::Unknown("unknown".to_string())
    }
}

impl std::fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                InterfaceType::Ethernet => "ethernet",
                InterfaceType::Wireless => "wireless",
                InterfaceType::Bond => "bond",
                InterfaceType::Bridge => "bridge",
                InterfaceType::Vlan => "vlan",
                InterfaceType::InfiniBand => "infiniband",
                InterfaceType::Tun => "tun",
                InterfaceType::Tap => "tap",
                InterfaceType::Dummy => "dummy",
                InterfaceType::Unknown(s) => s,
            }
        )
    }
}

impl InterfaceType {
    pub fn is_unknown(&self) -> bool {
        matches!(self, InterfaceType::Unknown(_))
    }

    /// Whether this type of interface exists purely in configuration,
    /// without backing hardware.
    pub fn is_virtual(&self) -> bool {
        matches!(
            self,
            InterfaceType::Bond
                | InterfaceType::Bridge
                | InterfaceType::Vlan
                | InterfaceType::Tun
                | InterfaceType::Tap
                | InterfaceType::Dummy
        )
    }

    /// Parse the value of the sysconfig `INTERFACETYPE` variable.
    pub(crate) fn from_sysconfig(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "ethernet" | "eth" => Self::Ethernet,
            "wireless" | "wlan" => Self::Wireless,
            "bond" | "bonding" => Self::Bond,
            "bridge" => Self::Bridge,
            "vlan" => Self::Vlan,
            "infiniband" | "ib" => Self::InfiniBand,
            "tun" => Self::Tun,
            "tap" => Self::Tap,
            "dummy" => Self::Dummy,
            v => Self::Unknown(v.to_string()),
        }
    }
}
