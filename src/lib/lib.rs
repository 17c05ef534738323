// SPDX-License-Identifier: Apache-2.0

mod config;
mod connection;
mod dns;
mod driver;
mod error;
mod exec;
mod handler;
mod hostname;
mod hw;
mod iface;
mod iface_type;
mod reader;
mod route;
mod sysconfig;
mod writer;

#[cfg(test)]
mod unit_tests;

pub use self::config::{ConfigSource, NetConfig};
pub use self::connection::{
    BondConfig, BootProto, BridgeConfig, ConnectionCollection,
    ConnectionConfig, ConnectionExtra, InfinibandConfig, IpConfig, IpoibMode,
    StartMode, VlanConfig, WirelessConfig, WirelessMode,
};
pub use self::dns::{DhcpHostname, DnsSettings};
pub use self::driver::Driver;
pub use self::error::{ErrorKind, SysnetError};
pub use self::exec::{CommandRunner, RecordingRunner, SystemRunner};
pub use self::handler::ConnectionHandler;
pub use self::hostname::Hostname;
pub use self::hw::{probe_hardware, HwInfo};
pub use self::iface::{
    Interface, InterfaceCollection, InterfaceKind, RenameMechanism,
};
pub use self::iface_type::InterfaceType;
pub use self::reader::ConfigReader;
pub use self::route::{Route, RouteDestination, Routing, RoutingTable};
pub use self::sysconfig::{
    IfcfgFile, RoutesFile, SysconfigFile, SysconfigPaths, VarKind, VarValue,
};
pub use self::writer::{ConfigWriter, WriteOptions};
