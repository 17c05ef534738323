// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;
use std::str::FromStr;

use crate::{
    ConfigReader, ConfigWriter, ConnectionConfig, DhcpHostname, HwInfo,
    Interface, InterfaceKind, InterfaceType, IpConfig, NetConfig,
    RecordingRunner, RenameMechanism, Route, RouteDestination,
    SysconfigPaths, WriteOptions,
};

fn test_options() -> WriteOptions {
    WriteOptions {
        reload_udev: false,
        ..Default::default()
    }
}

fn eth0_hw() -> HwInfo {
    let mut hw = HwInfo::new("eth0", InterfaceType::Ethernet);
    hw.mac_address = Some("aa:bb:cc:dd:ee:ff".to_string());
    hw
}

#[test]
fn test_static_ethernet_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let paths = SysconfigPaths::new(dir.path());
    let runner = RecordingRunner::new();

    let mut config = NetConfig::new();
    config.interfaces.push(Interface::new_physical(eth0_hw()));
    let mut conn = ConnectionConfig::new("eth0");
    conn.ip
        .push(IpConfig::new("", "192.0.2.10/24".parse().unwrap()));
    conn.hostname = Some("foo.example.com".to_string());
    config.connections.push(conn.clone());

    ConfigWriter::new(paths.clone(), &runner)
        .with_options(test_options())
        .write(&config, None)
        .unwrap();

    let content =
        std::fs::read_to_string(paths.ifcfg_path("eth0")).unwrap();
    assert!(content.contains("BOOTPROTO='static'"));
    assert!(content.contains("IPADDR='192.0.2.10/24'"));

    // Both the full and the short name land in /etc/hosts
    let hosts = std::fs::read_to_string(paths.hosts_path()).unwrap();
    assert!(hosts.contains("192.0.2.10 foo.example.com foo"));

    let read = ConfigReader::new(paths, vec![eth0_hw()]).read().unwrap();
    assert_eq!(read.connections.by_id("eth0"), Some(&conn));
    assert_eq!(
        read.interfaces.by_name("eth0").map(|i| i.kind),
        Some(InterfaceKind::Physical)
    );
}

#[test]
fn test_route_partitioning() {
    let dir = tempfile::tempdir().unwrap();
    let paths = SysconfigPaths::new(dir.path());
    let runner = RecordingRunner::new();

    let mut config = NetConfig::new();
    config.interfaces.push(Interface::new_physical(eth0_hw()));
    let mut net_route =
        Route::new(RouteDestination::Cidr("10.1.0.0/24".parse().unwrap()));
    net_route.iface = Some("eth0".to_string());
    config.routing.main_table_mut().push(net_route);
    config.routing.main_table_mut().push(Route::new_default(
        IpAddr::from_str("192.168.1.1").unwrap(),
    ));

    ConfigWriter::new(paths.clone(), &runner)
        .with_options(test_options())
        .write(&config, None)
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(paths.routes_path()).unwrap(),
        "default 192.168.1.1 - -\n"
    );
    assert_eq!(
        std::fs::read_to_string(paths.ifroute_path("eth0")).unwrap(),
        "10.1.0.0/24 - - eth0\n"
    );

    let read = ConfigReader::new(paths, vec![eth0_hw()]).read().unwrap();
    let routes: Vec<_> = read.routing.routes().collect();
    assert_eq!(routes.len(), 2);
}

#[test]
fn test_rename_interface_flow() {
    let dir = tempfile::tempdir().unwrap();
    let paths = SysconfigPaths::new(dir.path());

    let mut old = NetConfig::new();
    old.interfaces.push(Interface::new_physical(eth0_hw()));
    let mut conn = ConnectionConfig::new("eth0");
    conn.bootproto = crate::BootProto::Dhcp;
    old.connections.push(conn);

    let setup_runner = RecordingRunner::new();
    ConfigWriter::new(paths.clone(), &setup_runner)
        .with_options(test_options())
        .write(&old, None)
        .unwrap();
    assert!(paths.ifcfg_path("eth0").exists());

    let mut new = old.clone();
    new.rename_interface("eth0", "eth1", RenameMechanism::Mac)
        .unwrap();

    let runner = RecordingRunner::new();
    ConfigWriter::new(paths.clone(), &runner)
        .with_options(test_options())
        .write(&new, Some(&old))
        .unwrap();

    // The device keeps running under its old name until shut down
    assert!(runner
        .commands()
        .contains(&"/sbin/ifdown eth0".to_string()));

    assert!(!paths.ifcfg_path("eth0").exists());
    assert!(paths.ifcfg_path("eth1").exists());

    let rules = std::fs::read_to_string(paths.persistent_net_rules_path())
        .unwrap();
    assert!(rules.contains("ATTR{address}==\"aa:bb:cc:dd:ee:ff\""));
    assert!(rules.contains("NAME=\"eth1\""));
}

#[test]
fn test_dns_change_rewrites_variables_as_one_unit() {
    let dir = tempfile::tempdir().unwrap();
    let paths = SysconfigPaths::new(dir.path());

    let mut old = NetConfig::new();
    old.dns.nameservers =
        vec![IpAddr::from_str("192.0.2.53").unwrap()];
    old.dns.searchlist = vec!["example.com".to_string()];

    let setup_runner = RecordingRunner::new();
    ConfigWriter::new(paths.clone(), &setup_runner)
        .with_options(test_options())
        .write(&old, None)
        .unwrap();

    let mut new = old.clone();
    new.dns.searchlist = vec!["example.org".to_string()];

    let runner = RecordingRunner::new();
    ConfigWriter::new(paths.clone(), &runner)
        .with_options(test_options())
        .write(&new, Some(&old))
        .unwrap();

    assert_eq!(
        runner.commands(),
        vec![
            "/usr/sbin/sysctl -w net.ipv4.ip_forward=0".to_string(),
            "/usr/sbin/sysctl -w net.ipv6.conf.all.forwarding=0"
                .to_string(),
            "/sbin/netconfig update -m dns".to_string(),
        ]
    );

    let content =
        std::fs::read_to_string(paths.netconfig_path()).unwrap();
    assert!(content
        .contains("NETCONFIG_DNS_STATIC_SEARCHLIST='example.org'"));
    assert!(content
        .contains("NETCONFIG_DNS_STATIC_SERVERS='192.0.2.53'"));
    // The hostname layer is untouched by a DNS-only change
    assert!(!paths.hostname_path().exists());
}

#[test]
fn test_dhcp_hostname_interface_selector_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let paths = SysconfigPaths::new(dir.path());

    let mut config = NetConfig::new();
    for name in ["eth0", "eth1"] {
        let hw = HwInfo::new(name, InterfaceType::Ethernet);
        config.interfaces.push(Interface::new_physical(hw));
        let mut conn = ConnectionConfig::new(name);
        conn.bootproto = crate::BootProto::Dhcp;
        config.connections.push(conn);
    }
    config.dns.dhcp_hostname = DhcpHostname::Iface("eth1".to_string());

    let setup_runner = RecordingRunner::new();
    ConfigWriter::new(paths.clone(), &setup_runner)
        .with_options(test_options())
        .write(&config, None)
        .unwrap();
    assert!(std::fs::read_to_string(paths.ifcfg_path("eth1"))
        .unwrap()
        .contains("DHCLIENT_SET_HOSTNAME='yes'"));

    // Moving the selector reaches the files even though the connections
    // themselves are unchanged
    let old = config.clone();
    let mut new = config;
    new.dns.dhcp_hostname = DhcpHostname::Iface("eth0".to_string());
    let runner = RecordingRunner::new();
    ConfigWriter::new(paths.clone(), &runner)
        .with_options(test_options())
        .write(&new, Some(&old))
        .unwrap();

    assert!(!std::fs::read_to_string(paths.ifcfg_path("eth1"))
        .unwrap()
        .contains("DHCLIENT_SET_HOSTNAME"));
    let read = ConfigReader::new(paths, vec![]).read().unwrap();
    assert_eq!(
        read.dns.dhcp_hostname,
        DhcpHostname::Iface("eth0".to_string())
    );
}

#[test]
fn test_deleting_connection_unregisters_hostname() {
    let dir = tempfile::tempdir().unwrap();
    let paths = SysconfigPaths::new(dir.path());

    let mut old = NetConfig::new();
    old.interfaces.push(Interface::new_physical(eth0_hw()));
    let mut conn = ConnectionConfig::new("eth0");
    conn.ip
        .push(IpConfig::new("", "192.0.2.10/24".parse().unwrap()));
    conn.hostname = Some("foo.example.com".to_string());
    old.connections.push(conn);

    let setup_runner = RecordingRunner::new();
    ConfigWriter::new(paths.clone(), &setup_runner)
        .with_options(test_options())
        .write(&old, None)
        .unwrap();
    assert!(std::fs::read_to_string(paths.hosts_path())
        .unwrap()
        .contains("192.0.2.10"));

    let mut new = old.clone();
    new.connections.remove("eth0");

    let runner = RecordingRunner::new();
    ConfigWriter::new(paths.clone(), &runner)
        .with_options(test_options())
        .write(&new, Some(&old))
        .unwrap();

    assert!(!paths.ifcfg_path("eth0").exists());
    assert!(!std::fs::read_to_string(paths.hosts_path())
        .unwrap()
        .contains("192.0.2.10"));
}
