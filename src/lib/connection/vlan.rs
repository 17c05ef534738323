// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// VLAN settings, sysconfig `ETHERDEVICE` plus `VLAN_ID`.
pub struct VlanConfig {
    /// Parent device carrying the tagged traffic.
    pub parent: String,
    /// 802.1Q tag. When unset the tag is derived from the device name
    /// (`eth0.10` -> 10) by the kernel tooling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<u16>,
}

impl VlanConfig {
    pub fn new(parent: &str, vlan_id: Option<u16>) -> Self {
        Self {
            parent: parent.to_string(),
            vlan_id,
        }
    }
}
