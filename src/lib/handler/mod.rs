// SPDX-License-Identifier: Apache-2.0

mod bond;
mod bridge;
mod ethernet;
mod infiniband;
mod vlan;
mod wireless;

use crate::{ConnectionConfig, ConnectionExtra, IfcfgFile, InterfaceType, SysnetError};

use self::bond::BondHandler;
use self::bridge::BridgeHandler;
use self::ethernet::EthernetHandler;
use self::infiniband::InfinibandHandler;
use self::vlan::VlanHandler;
use self::wireless::WirelessHandler;

/// Type-specific part of reading/writing a connection's ifcfg file.
/// Common variables (BOOTPROTO, STARTMODE, addresses...) are handled by
/// the generic reader/writer, handlers only cover their own variable
/// family.
pub trait ConnectionHandler {
    fn read_extra(
        &self,
        file: &IfcfgFile,
    ) -> Result<ConnectionExtra, SysnetError>;

    fn write_extra(
        &self,
        conn: &ConnectionConfig,
        file: &mut IfcfgFile,
    ) -> Result<(), SysnetError>;
}

static ETHERNET: EthernetHandler = EthernetHandler;
static WIRELESS: WirelessHandler = WirelessHandler;
static BOND: BondHandler = BondHandler;
static BRIDGE: BridgeHandler = BridgeHandler;
static VLAN: VlanHandler = VlanHandler;
static INFINIBAND: InfinibandHandler = InfinibandHandler;

/// Resolve the handler for an interface type. Types without a handler get
/// None, the callers log and skip them rather than failing the whole
/// read or write.
pub(crate) fn for_type(
    iface_type: &InterfaceType,
) -> Option<&'static dyn ConnectionHandler> {
    match iface_type {
        InterfaceType::Ethernet => Some(&ETHERNET),
        InterfaceType::Wireless => Some(&WIRELESS),
        InterfaceType::Bond => Some(&BOND),
        InterfaceType::Bridge => Some(&BRIDGE),
        InterfaceType::Vlan => Some(&VLAN),
        InterfaceType::InfiniBand => Some(&INFINIBAND),
        _ => None,
    }
}
