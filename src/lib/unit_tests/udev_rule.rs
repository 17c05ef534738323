// SPDX-License-Identifier: Apache-2.0

use crate::sysconfig::UdevRule;
use crate::{HwInfo, Interface, InterfaceType, RenameMechanism};

fn physical_eth0() -> Interface {
    let mut hw = HwInfo::new("eth0", InterfaceType::Ethernet);
    hw.mac_address = Some("aa:bb:cc:dd:ee:ff".to_string());
    hw.bus_id = Some("0000:00:1f.6".to_string());
    hw.modalias = Some("pci:v00008086d000015B8".to_string());
    Interface::new_physical(hw)
}

#[test]
fn test_rename_rule_by_mac() {
    let mut iface = physical_eth0();
    iface.rename("lan0", RenameMechanism::Mac);
    let rule = UdevRule::rename_rule(&iface).unwrap();
    assert_eq!(
        rule.to_string(),
        "SUBSYSTEM==\"net\", ACTION==\"add\", DRIVERS==\"?*\", \
         ATTR{address}==\"aa:bb:cc:dd:ee:ff\", ATTR{type}==\"1\", \
         NAME=\"lan0\""
    );
}

#[test]
fn test_rename_rule_by_bus_id() {
    let mut iface = physical_eth0();
    iface.rename("lan0", RenameMechanism::BusId);
    let rule = UdevRule::rename_rule(&iface).unwrap();
    assert_eq!(
        rule.to_string(),
        "SUBSYSTEM==\"net\", ACTION==\"add\", DRIVERS==\"?*\", \
         KERNELS==\"0000:00:1f.6\", NAME=\"lan0\""
    );
}

#[test]
fn test_rename_rule_requires_mechanism() {
    let iface = physical_eth0();
    assert!(UdevRule::rename_rule(&iface).is_none());
}

#[test]
fn test_rename_rule_requires_hardware() {
    let mut iface = Interface::new("eth0", InterfaceType::Ethernet);
    iface.rename("lan0", RenameMechanism::Mac);
    assert!(UdevRule::rename_rule(&iface).is_none());
}

#[test]
fn test_driver_rule() {
    let mut iface = physical_eth0();
    iface.custom_driver = Some("e1000e".to_string());
    let rule = UdevRule::driver_rule(&iface).unwrap();
    assert_eq!(
        rule.to_string(),
        "ENV{MODALIAS}==\"pci:v00008086d000015B8\", \
         ENV{MODALIAS}=\"e1000e\""
    );
}

#[test]
fn test_driver_rule_without_custom_driver() {
    let iface = physical_eth0();
    assert!(UdevRule::driver_rule(&iface).is_none());
}

#[test]
fn test_parse_round_trip() {
    let line = "SUBSYSTEM==\"net\", ACTION==\"add\", DRIVERS==\"?*\", \
                ATTR{address}==\"aa:bb:cc:dd:ee:ff\", ATTR{type}==\"1\", \
                NAME=\"eth1\"";
    let rule = UdevRule::parse(line).unwrap();
    assert_eq!(rule.name_target(), Some("eth1"));
    assert_eq!(UdevRule::parse(&rule.to_string()), Some(rule));
}

#[test]
fn test_parse_skips_comments_and_blanks() {
    assert!(UdevRule::parse("# a comment").is_none());
    assert!(UdevRule::parse("   ").is_none());
}

#[test]
fn test_name_target_ignores_match() {
    let rule = UdevRule::parse("NAME==\"eth0\", ENV{x}=\"1\"").unwrap();
    assert_eq!(rule.name_target(), None);
}
