// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::{HwInfo, InterfaceType};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
/// Where an [Interface] comes from.
pub enum InterfaceKind {
    /// Backed by real hardware. The device may still be unplugged.
    #[default]
    Physical,
    /// Bridge, bond, VLAN and friends, exists purely in configuration.
    Virtual,
    /// Placeholder for a configured connection whose device is not
    /// currently present, so connection configs always have an addressable
    /// target.
    Fake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// The udev matching strategy used to pin a persistent name to hardware.
pub enum RenameMechanism {
    Mac,
    BusId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", default)]
#[non_exhaustive]
pub struct Interface {
    pub name: String,
    /// Name this interface had before a rename, kept for udev rule and
    /// file cleanup on write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_name: Option<String>,
    pub iface_type: InterfaceType,
    pub kind: InterfaceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<HwInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renaming_mechanism: Option<RenameMechanism>,
    /// Kernel module requested for this device instead of the default one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_driver: Option<String>,
}

impl Interface {
    pub fn new(name: &str, iface_type: InterfaceType) -> Self {
        Self {
            name: name.to_string(),
            iface_type,
            ..Default::default()
        }
    }

    pub fn new_physical(hw: HwInfo) -> Self {
        Self {
            name: hw.name.clone(),
            iface_type: hw.iface_type.clone(),
            kind: InterfaceKind::Physical,
            hardware: Some(hw),
            ..Default::default()
        }
    }

    pub fn new_virtual(name: &str, iface_type: InterfaceType) -> Self {
        Self {
            name: name.to_string(),
            iface_type,
            kind: InterfaceKind::Virtual,
            ..Default::default()
        }
    }

    pub fn new_fake(name: &str, iface_type: InterfaceType) -> Self {
        Self {
            name: name.to_string(),
            iface_type,
            kind: InterfaceKind::Fake,
            ..Default::default()
        }
    }

    pub fn hardware_present(&self) -> bool {
        self.hardware.is_some()
    }

    /// Rename the interface keeping its identity. The original name is
    /// recorded once, further renames within the same session do not
    /// overwrite it.
    pub fn rename(&mut self, new_name: &str, mechanism: RenameMechanism) {
        if self.old_name.is_none() && self.name != new_name {
            self.old_name = Some(self.name.clone());
        }
        self.name = new_name.to_string();
        self.renaming_mechanism = Some(mechanism);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
/// Ordered collection of [Interface], unique by name.
pub struct InterfaceCollection {
    ifaces: Vec<Interface>,
}

impl InterfaceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interface. An existing interface with the same name is
    /// replaced in place, preserving its position.
    pub fn push(&mut self, iface: Interface) {
        if let Some(existing) =
            self.ifaces.iter_mut().find(|i| i.name == iface.name)
        {
            *existing = iface;
        } else {
            self.ifaces.push(iface);
        }
    }

    pub fn by_name(&self, name: &str) -> Option<&Interface> {
        self.ifaces.iter().find(|i| i.name == name)
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Interface> {
        self.ifaces.iter_mut().find(|i| i.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interface> {
        self.ifaces.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Interface> {
        self.ifaces.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.ifaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ifaces.is_empty()
    }
}
