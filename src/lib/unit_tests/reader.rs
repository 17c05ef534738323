// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;
use std::path::Path;
use std::str::FromStr;

use crate::{
    BootProto, ConfigReader, ConnectionExtra, DhcpHostname, HwInfo,
    InterfaceKind, InterfaceType, SysconfigPaths,
};

fn write_under(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
}

fn reader(dir: &tempfile::TempDir, hw: Vec<HwInfo>) -> ConfigReader {
    ConfigReader::new(SysconfigPaths::new(dir.path()), hw)
}

#[test]
fn test_reader_physical_interface_from_probe() {
    let dir = tempfile::tempdir().unwrap();
    let hw = HwInfo::new("eth0", InterfaceType::Ethernet);
    let config = reader(&dir, vec![hw]).read().unwrap();
    let iface = config.interfaces.by_name("eth0").unwrap();
    assert_eq!(iface.kind, InterfaceKind::Physical);
    assert!(config.connections.is_empty());
}

#[test]
fn test_reader_fake_interface_for_configured_missing_hardware() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifcfg-eth5",
        "BOOTPROTO='dhcp'\nSTARTMODE='auto'\n",
    );
    let config = reader(&dir, vec![]).read().unwrap();
    let iface = config.interfaces.by_name("eth5").unwrap();
    assert_eq!(iface.kind, InterfaceKind::Fake);
    assert_eq!(iface.iface_type, InterfaceType::Ethernet);
    let conn = config.connections.by_id("eth5").unwrap();
    assert_eq!(conn.bootproto, BootProto::Dhcp);
}

#[test]
fn test_reader_virtual_interface_for_bridge() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifcfg-br0",
        "BOOTPROTO='dhcp'\nSTARTMODE='auto'\nBRIDGE='yes'\nBRIDGE_PORTS='eth0'\n",
    );
    let config = reader(&dir, vec![]).read().unwrap();
    let iface = config.interfaces.by_name("br0").unwrap();
    assert_eq!(iface.kind, InterfaceKind::Virtual);
    assert_eq!(iface.iface_type, InterfaceType::Bridge);
    match &config.connections.by_id("br0").unwrap().extra {
        ConnectionExtra::Bridge(bridge) => {
            assert_eq!(bridge.ports, vec!["eth0".to_string()]);
        }
        other => panic!("Expected bridge extra, got {other:?}"),
    }
}

#[test]
fn test_reader_skips_backups_and_loopback() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifcfg-eth0.bak",
        "BOOTPROTO='dhcp'\n",
    );
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifcfg-eth0.rpmsave",
        "BOOTPROTO='dhcp'\n",
    );
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifcfg-lo",
        "IPADDR='127.0.0.1/8'\n",
    );
    let config = reader(&dir, vec![]).read().unwrap();
    assert!(config.connections.is_empty());
    assert!(config.interfaces.is_empty());
}

#[test]
fn test_reader_merges_routes_and_binds_ifroute_device() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/sysconfig/network/routes",
        "default 192.168.1.1 - -\n192.0.2.0/24 - - eth0\n",
    );
    // Same route again, without a device column this time
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifroute-eth0",
        "192.0.2.0/24 - - -\n",
    );
    let hw = HwInfo::new("eth0", InterfaceType::Ethernet);
    let config = reader(&dir, vec![hw]).read().unwrap();
    let routes: Vec<_> = config.routing.routes().collect();
    assert_eq!(routes.len(), 2);
    assert_eq!(routes[1].iface.as_deref(), Some("eth0"));
}

#[test]
fn test_reader_forwarding_flags() {
    let dir = tempfile::tempdir().unwrap();
    write_under(dir.path(), "proc/sys/net/ipv4/ip_forward", "1\n");
    write_under(
        dir.path(),
        "proc/sys/net/ipv6/conf/all/forwarding",
        "0\n",
    );
    let config = reader(&dir, vec![]).read().unwrap();
    assert!(config.routing.forward_ipv4);
    assert!(!config.routing.forward_ipv6);
}

#[test]
fn test_reader_dns_settings() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/sysconfig/network/config",
        "NETCONFIG_DNS_POLICY='STATIC'\n\
         NETCONFIG_DNS_STATIC_SERVERS='192.0.2.53 not-an-ip 2001:db8::53'\n\
         NETCONFIG_DNS_STATIC_SEARCHLIST='example.com example.org'\n",
    );
    write_under(
        dir.path(),
        "etc/sysconfig/network/dhcp",
        "DHCLIENT_SET_HOSTNAME='yes'\n",
    );
    let config = reader(&dir, vec![]).read().unwrap();
    assert_eq!(config.dns.resolv_policy, "STATIC");
    assert_eq!(
        config.dns.nameservers,
        vec![
            IpAddr::from_str("192.0.2.53").unwrap(),
            IpAddr::from_str("2001:db8::53").unwrap()
        ]
    );
    assert_eq!(
        config.dns.searchlist,
        vec!["example.com".to_string(), "example.org".to_string()]
    );
    assert_eq!(config.dns.dhcp_hostname, DhcpHostname::Any);
}

#[test]
fn test_reader_dhcp_hostname_from_connection() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/sysconfig/network/dhcp",
        "DHCLIENT_SET_HOSTNAME='no'\n",
    );
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifcfg-eth0",
        "BOOTPROTO='dhcp'\nSTARTMODE='auto'\nDHCLIENT_SET_HOSTNAME='yes'\n",
    );
    let config = reader(&dir, vec![]).read().unwrap();
    assert_eq!(
        config.dns.dhcp_hostname,
        DhcpHostname::Iface("eth0".to_string())
    );
}

#[test]
fn test_reader_hostname_from_hosts_file() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifcfg-eth0",
        "BOOTPROTO='static'\nSTARTMODE='auto'\nIPADDR='192.0.2.10/24'\n",
    );
    write_under(
        dir.path(),
        "etc/hosts",
        "127.0.0.1 localhost\n192.0.2.10 foo.example.com foo\n",
    );
    let config = reader(&dir, vec![]).read().unwrap();
    let conn = config.connections.by_id("eth0").unwrap();
    assert_eq!(conn.hostname.as_deref(), Some("foo.example.com"));
}

#[test]
fn test_reader_static_hostname() {
    let dir = tempfile::tempdir().unwrap();
    write_under(dir.path(), "etc/hostname", "box.example.com\n");
    let config = reader(&dir, vec![]).read().unwrap();
    assert_eq!(
        config.hostname.static_hostname.as_deref(),
        Some("box.example.com")
    );
}

#[test]
fn test_reader_drivers_from_modprobe() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/modprobe.d/50-e1000e.conf",
        "options e1000e InterruptThrottleRate=3000\n",
    );
    write_under(dir.path(), "etc/modprobe.d/README", "not a conf file\n");
    let config = reader(&dir, vec![]).read().unwrap();
    assert_eq!(config.drivers.len(), 1);
    assert_eq!(config.drivers[0].name, "e1000e");
    assert_eq!(
        config.drivers[0].options.as_deref(),
        Some("InterruptThrottleRate=3000")
    );
}

#[test]
fn test_reader_out_of_range_integers_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifcfg-eth0",
        "BOOTPROTO='static'\nSTARTMODE='auto'\nMTU='-1500'\n\
         IPADDR='192.0.2.1'\nPREFIXLEN='280'\n",
    );
    let config = reader(&dir, vec![]).read().unwrap();
    let conn = config.connections.by_id("eth0").unwrap();
    assert_eq!(conn.mtu, None);
    // A prefix that fits no address family invalidates the address,
    // it must not wrap into a shorter valid one
    assert!(conn.ip.is_empty());
}

#[test]
fn test_reader_out_of_range_vlan_id_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifcfg-vlan7",
        "BOOTPROTO='dhcp'\nSTARTMODE='auto'\nETHERDEVICE='eth0'\n\
         VLAN_ID='70000'\n",
    );
    let config = reader(&dir, vec![]).read().unwrap();
    match &config.connections.by_id("vlan7").unwrap().extra {
        ConnectionExtra::Vlan(vlan) => {
            assert_eq!(vlan.parent, "eth0");
            assert_eq!(vlan.vlan_id, None);
        }
        other => panic!("Expected vlan extra, got {other:?}"),
    }
}

#[test]
fn test_reader_ip_prefix_sources() {
    let dir = tempfile::tempdir().unwrap();
    write_under(
        dir.path(),
        "etc/sysconfig/network/ifcfg-eth0",
        "BOOTPROTO='static'\nSTARTMODE='auto'\n\
         IPADDR='192.0.2.1'\nNETMASK='255.255.255.0'\n\
         IPADDR_1='192.0.2.2'\nPREFIXLEN_1='25'\n\
         IPADDR_2='192.0.2.3'\n",
    );
    let config = reader(&dir, vec![]).read().unwrap();
    let conn = config.connections.by_id("eth0").unwrap();
    let addrs: Vec<String> =
        conn.ip.iter().map(|i| i.address.to_string()).collect();
    assert_eq!(
        addrs,
        vec![
            "192.0.2.1/24".to_string(),
            "192.0.2.2/25".to_string(),
            "192.0.2.3/32".to_string()
        ]
    );
}
