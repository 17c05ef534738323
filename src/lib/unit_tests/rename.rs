// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;
use std::str::FromStr;

use crate::{
    ConnectionConfig, ErrorKind, HwInfo, Interface, InterfaceType,
    NetConfig, RenameMechanism, Route, RouteDestination,
};

fn config_with_eth0() -> NetConfig {
    let mut config = NetConfig::new();
    let mut hw = HwInfo::new("eth0", InterfaceType::Ethernet);
    hw.mac_address = Some("aa:bb:cc:dd:ee:ff".to_string());
    config.interfaces.push(Interface::new_physical(hw));

    let mut route =
        Route::new(RouteDestination::Cidr("10.1.0.0/24".parse().unwrap()));
    route.iface = Some("eth0".to_string());
    config.routing.main_table_mut().push(route);
    config.routing.main_table_mut().push(Route::new_default(
        IpAddr::from_str("192.168.1.1").unwrap(),
    ));

    config.connections.push(ConnectionConfig::new("eth0"));
    config
}

#[test]
fn test_rename_propagates_to_routes_and_connections() {
    let mut config = config_with_eth0();
    config
        .rename_interface("eth0", "lan0", RenameMechanism::Mac)
        .unwrap();

    let iface = config.interfaces.by_name("lan0").unwrap();
    assert_eq!(iface.old_name.as_deref(), Some("eth0"));
    assert_eq!(iface.renaming_mechanism, Some(RenameMechanism::Mac));
    assert!(config.interfaces.by_name("eth0").is_none());

    let ifaces: Vec<Option<&str>> = config
        .routing
        .routes()
        .map(|r| r.iface.as_deref())
        .collect();
    assert_eq!(ifaces, vec![Some("lan0"), None]);

    let conn = config.connections.by_id("lan0").unwrap();
    assert_eq!(conn.interface, "lan0");
    assert!(config.connections.by_id("eth0").is_none());
}

#[test]
fn test_rename_to_taken_name_fails() {
    let mut config = config_with_eth0();
    config
        .interfaces
        .push(Interface::new("eth1", InterfaceType::Ethernet));
    let e = config
        .rename_interface("eth0", "eth1", RenameMechanism::Mac)
        .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_rename_unknown_interface_fails() {
    let mut config = NetConfig::new();
    let e = config
        .rename_interface("eth9", "lan0", RenameMechanism::Mac)
        .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_rename_records_original_name_once() {
    let mut config = config_with_eth0();
    config
        .rename_interface("eth0", "lan0", RenameMechanism::Mac)
        .unwrap();
    config
        .rename_interface("lan0", "lan1", RenameMechanism::Mac)
        .unwrap();
    let iface = config.interfaces.by_name("lan1").unwrap();
    assert_eq!(iface.old_name.as_deref(), Some("eth0"));
}
