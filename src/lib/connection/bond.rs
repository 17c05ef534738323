// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// Bond settings. Port order matters, it is the `BONDING_SLAVE<n>` order
/// on disk and the kernel enslaving order.
pub struct BondConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<String>,
    /// Free-form `BONDING_MODULE_OPTS` string, e.g.
    /// `mode=active-backup miimon=100`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl BondConfig {
    pub fn new(ports: Vec<String>) -> Self {
        Self {
            ports,
            options: None,
        }
    }
}
