// SPDX-License-Identifier: Apache-2.0

use crate::{Interface, RenameMechanism};

#[derive(Debug, Clone, PartialEq, Eq)]
struct RulePart {
    key: String,
    /// `==` for a match, `=` for an assignment.
    op: &'static str,
    value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One udev rule line, a comma-separated list of `key=="value"` matches
/// and `key="value"` assignments.
pub struct UdevRule {
    parts: Vec<RulePart>,
}

impl UdevRule {
    fn new() -> Self {
        Self { parts: Vec::new() }
    }

    fn match_part(mut self, key: &str, value: &str) -> Self {
        self.parts.push(RulePart {
            key: key.to_string(),
            op: "==",
            value: value.to_string(),
        });
        self
    }

    fn assign_part(mut self, key: &str, value: &str) -> Self {
        self.parts.push(RulePart {
            key: key.to_string(),
            op: "=",
            value: value.to_string(),
        });
        self
    }

    /// Parse a rule line. Returns None for comments, blank lines and
    /// anything else that does not look like a rule.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        let mut rule = Self::new();
        for chunk in trimmed.split(',') {
            let chunk = chunk.trim();
            let (key, op, rest) = if let Some(pos) = chunk.find("==") {
                (&chunk[..pos], "==", &chunk[pos + 2..])
            } else if let Some(pos) = chunk.find('=') {
                (&chunk[..pos], "=", &chunk[pos + 1..])
            } else {
                return None;
            };
            rule.parts.push(RulePart {
                key: key.trim().to_string(),
                op,
                value: rest.trim().trim_matches('"').to_string(),
            });
        }
        if rule.parts.is_empty() {
            None
        } else {
            Some(rule)
        }
    }

    /// The value assigned to `NAME`, when this is a renaming rule.
    pub fn name_target(&self) -> Option<&str> {
        self.parts.iter().find_map(|p| {
            if p.key == "NAME" && p.op == "=" {
                Some(p.value.as_str())
            } else {
                None
            }
        })
    }

    /// The persistent-name rule for an interface, derived from its
    /// renaming mechanism and hardware info. None when the interface
    /// carries no rename request or the needed hardware attribute is
    /// unknown.
    pub fn rename_rule(iface: &Interface) -> Option<Self> {
        let hw = iface.hardware.as_ref()?;
        let rule = Self::new()
            .match_part("SUBSYSTEM", "net")
            .match_part("ACTION", "add")
            .match_part("DRIVERS", "?*");
        let rule = match iface.renaming_mechanism? {
            RenameMechanism::Mac => rule
                .match_part("ATTR{address}", hw.mac_address.as_deref()?)
                .match_part("ATTR{type}", "1"),
            RenameMechanism::BusId => {
                rule.match_part("KERNELS", hw.bus_id.as_deref()?)
            }
        };
        Some(rule.assign_part("NAME", &iface.name))
    }

    /// The driver-binding rule for an interface with a custom driver.
    pub fn driver_rule(iface: &Interface) -> Option<Self> {
        let driver = iface.custom_driver.as_deref()?;
        let hw = iface.hardware.as_ref()?;
        let modalias = hw.modalias.as_deref()?;
        Some(
            Self::new()
                .match_part("ENV{MODALIAS}", modalias)
                .assign_part("ENV{MODALIAS}", driver),
        )
    }
}

impl std::fmt::Display for UdevRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .parts
            .iter()
            .map(|p| format!("{}{}\"{}\"", p.key, p.op, p.value))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
