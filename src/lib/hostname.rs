// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// Hostname identity, three layers of different provenance. They are never
/// merged into one value: the writer persists only the static layer, the
/// other two are informational.
pub struct Hostname {
    /// Hostname handed over by the installer (install.inf), only set
    /// during installation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installer: Option<String>,
    /// Content of /etc/hostname.
    #[serde(rename = "static", skip_serializing_if = "Option::is_none")]
    pub static_hostname: Option<String>,
    /// Live kernel hostname.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transient: Option<String>,
}

impl Hostname {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_static(name: &str) -> Self {
        Self {
            static_hostname: Some(name.to_string()),
            ..Default::default()
        }
    }
}
