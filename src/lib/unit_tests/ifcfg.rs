// SPDX-License-Identifier: Apache-2.0

use crate::{ErrorKind, IfcfgFile, InterfaceType, VarValue};

fn load_ifcfg(content: &str) -> (tempfile::TempDir, IfcfgFile) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ifcfg-eth0");
    std::fs::write(&path, content).unwrap();
    let mut file = IfcfgFile::new(&path);
    file.load().unwrap();
    (dir, file)
}

#[test]
fn test_ifcfg_typed_values() {
    let (_dir, file) =
        load_ifcfg("BOOTPROTO='DHCP'\nMTU='1500'\nNAME='Onboard NIC'\n");
    // Symbols are normalized to lower case, plain strings are not
    assert_eq!(file.get_str("BOOTPROTO"), Some("dhcp"));
    assert_eq!(file.get_int("MTU"), Some(1500));
    assert_eq!(file.get_str("NAME"), Some("Onboard NIC"));
}

#[test]
fn test_ifcfg_collection_suffixes() {
    let (_dir, file) = load_ifcfg(
        "IPADDR='192.0.2.1/24'\nIPADDR_1='192.0.2.2/24'\nLABEL_1='alias'\n",
    );
    let addrs = file.values("IPADDR").unwrap();
    assert_eq!(addrs.len(), 2);
    assert_eq!(
        addrs.get("").and_then(|v| v.as_str()),
        Some("192.0.2.1/24")
    );
    assert_eq!(
        addrs.get("_1").and_then(|v| v.as_str()),
        Some("192.0.2.2/24")
    );
    let labels = file.values("LABEL").unwrap();
    assert_eq!(labels.get("_1").and_then(|v| v.as_str()), Some("alias"));
    assert!(labels.get("").is_none());
}

#[test]
fn test_ifcfg_bad_integer_treated_as_unset() {
    let (_dir, file) = load_ifcfg("MTU='jumbo'\nBOOTPROTO='dhcp'\n");
    assert_eq!(file.get_int("MTU"), None);
    assert_eq!(file.get_str("BOOTPROTO"), Some("dhcp"));
}

#[test]
fn test_ifcfg_bad_ip_treated_as_unset() {
    let (_dir, file) = load_ifcfg("BROADCAST='not-an-ip'\n");
    assert!(file.get("BROADCAST").is_none());
}

#[test]
fn test_ifcfg_undeclared_key_preserved() {
    let (_dir, mut file) =
        load_ifcfg("FIREWALL='yes'\nBOOTPROTO='dhcp'\n");
    file.set("BOOTPROTO", VarValue::Symbol("static".to_string()))
        .unwrap();
    file.save().unwrap();
    let content = std::fs::read_to_string(file.path()).unwrap();
    assert!(content.contains("FIREWALL='yes'"));
    assert!(content.contains("BOOTPROTO='static'"));
}

#[test]
fn test_ifcfg_save_removes_unset_variable() {
    let (_dir, mut file) = load_ifcfg("BOOTPROTO='dhcp'\nMTU='1500'\n");
    file.unset("MTU");
    file.save().unwrap();
    let content = std::fs::read_to_string(file.path()).unwrap();
    assert!(!content.contains("MTU"));
    assert!(content.contains("BOOTPROTO='dhcp'"));
}

#[test]
fn test_ifcfg_save_replaces_collection() {
    let (_dir, mut file) = load_ifcfg(
        "IPADDR='192.0.2.1/24'\nIPADDR_1='192.0.2.2/24'\n",
    );
    file.unset("IPADDR");
    file.set("IPADDR", VarValue::Str("198.51.100.1/24".to_string()))
        .unwrap();
    file.save().unwrap();
    let content = std::fs::read_to_string(file.path()).unwrap();
    assert!(content.contains("IPADDR='198.51.100.1/24'"));
    assert!(!content.contains("IPADDR_1"));
}

#[test]
fn test_ifcfg_undeclared_variable_is_bug() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = IfcfgFile::new(&dir.path().join("ifcfg-eth0"));
    let e = file
        .set("NO_SUCH_VAR", VarValue::Str("x".to_string()))
        .unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Bug);
}

#[test]
fn test_ifcfg_type_explicit_beats_structure() {
    let (_dir, file) =
        load_ifcfg("INTERFACETYPE='bond'\nBRIDGE='yes'\n");
    assert_eq!(file.iface_type(), InterfaceType::Bond);
}

#[test]
fn test_ifcfg_type_bridge_beats_wireless() {
    let (_dir, file) =
        load_ifcfg("BRIDGE='yes'\nWIRELESS_ESSID='home'\n");
    assert_eq!(file.iface_type(), InterfaceType::Bridge);
}

#[test]
fn test_ifcfg_type_bonding_slave_implies_bond() {
    let (_dir, file) = load_ifcfg("BONDING_SLAVE0='eth1'\n");
    assert_eq!(file.iface_type(), InterfaceType::Bond);
}

#[test]
fn test_ifcfg_type_wireless() {
    let (_dir, file) = load_ifcfg("WIRELESS_MODE='managed'\n");
    assert_eq!(file.iface_type(), InterfaceType::Wireless);
}

#[test]
fn test_ifcfg_type_etherdevice_implies_vlan() {
    let (_dir, file) = load_ifcfg("ETHERDEVICE='eth0'\nVLAN_ID='10'\n");
    assert_eq!(file.iface_type(), InterfaceType::Vlan);
}

#[test]
fn test_ifcfg_type_ipoib_mode_implies_infiniband() {
    let (_dir, file) = load_ifcfg("IPOIB_MODE='connected'\n");
    assert_eq!(file.iface_type(), InterfaceType::InfiniBand);
}

#[test]
fn test_ifcfg_type_defaults_to_ethernet() {
    let (_dir, file) = load_ifcfg("BOOTPROTO='dhcp'\n");
    assert_eq!(file.iface_type(), InterfaceType::Ethernet);
}
