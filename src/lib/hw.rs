// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{InterfaceType, SysnetError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
#[non_exhaustive]
/// Probed hardware information of one network device.
///
/// Produced by [probe_hardware] on a live system. Readers and writers only
/// depend on this plain data type, never on the probing backend, so tests
/// can feed synthetic hardware.
pub struct HwInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    /// Kernel bus address (e.g. PCI `0000:00:1f.6`), when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalias: Option<String>,
    pub link_up: bool,
    pub iface_type: InterfaceType,
}

impl HwInfo {
    pub fn new(name: &str, iface_type: InterfaceType) -> Self {
        Self {
            name: name.to_string(),
            iface_type,
            ..Default::default()
        }
    }
}

fn np_iface_type_to_sysnet(
    np_iface_type: &nispor::IfaceType,
) -> InterfaceType {
    match np_iface_type {
        nispor::IfaceType::Bond => InterfaceType::Bond,
        nispor::IfaceType::Bridge => InterfaceType::Bridge,
        nispor::IfaceType::Dummy => InterfaceType::Dummy,
        nispor::IfaceType::Ethernet => InterfaceType::Ethernet,
        nispor::IfaceType::Veth => InterfaceType::Ethernet,
        nispor::IfaceType::Vlan => InterfaceType::Vlan,
        nispor::IfaceType::Ipoib => InterfaceType::InfiniBand,
        nispor::IfaceType::Tun => InterfaceType::Tun,
        nispor::IfaceType::Other(v) => InterfaceType::Unknown(v.to_lowercase()),
        _ => {
            InterfaceType::Unknown(format!("{np_iface_type:?}").to_lowercase())
        }
    }
}

fn np_iface_is_up(
    state: &nispor::IfaceState,
    flags: &[nispor::IfaceFlag],
) -> bool {
    *state == nispor::IfaceState::Up
        || flags.contains(&nispor::IfaceFlag::Up)
        || flags.contains(&nispor::IfaceFlag::Running)
}

/// Retrieve the list of network devices currently known to the kernel.
///
/// Loopback is excluded, it is not a configurable device from the sysconfig
/// point of view.
pub fn probe_hardware() -> Result<Vec<HwInfo>, SysnetError> {
    let mut filter = nispor::NetStateFilter::default();
    // Do not query routes, the kernel routing table is not our concern and
    // BGP setups can make this query expensive.
    filter.route = None;
    let np_state = nispor::NetState::retrieve_with_filter(&filter)?;

    let mut ret = Vec::new();
    for (_, np_iface) in np_state.ifaces.iter() {
        if np_iface.iface_type == nispor::IfaceType::Loopback {
            continue;
        }
        let mut hw = HwInfo::new(
            np_iface.name.as_str(),
            np_iface_type_to_sysnet(&np_iface.iface_type),
        );
        if !np_iface.mac_address.is_empty() {
            hw.mac_address = Some(np_iface.mac_address.to_lowercase());
        }
        hw.link_up =
            np_iface_is_up(&np_iface.state, np_iface.flags.as_slice());
        hw.bus_id = read_sysfs_link(&np_iface.name, "device");
        hw.driver = read_sysfs_link(&np_iface.name, "device/driver");
        hw.modalias = read_sysfs_file(&np_iface.name, "device/modalias");
        ret.push(hw);
    }
    Ok(ret)
}

// Nispor does not expose the bus address or bound driver, both are plain
// sysfs symlinks next to the netdev entry.
fn read_sysfs_link(iface: &str, rel: &str) -> Option<String> {
    let path = format!("/sys/class/net/{iface}/{rel}");
    std::fs::read_link(path).ok().and_then(|p| {
        p.file_name().map(|n| n.to_string_lossy().to_string())
    })
}

fn read_sysfs_file(iface: &str, rel: &str) -> Option<String> {
    let path = format!("/sys/class/net/{iface}/{rel}");
    std::fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
