// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// IP over InfiniBand transport mode.
pub enum IpoibMode {
    Connected,
    Datagram,
}

impl IpoibMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Datagram => "datagram",
        }
    }

    pub fn from_sysconfig(value: &str) -> Option<Self> {
        match value {
            "connected" => Some(Self::Connected),
            "datagram" => Some(Self::Datagram),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub struct InfinibandConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipoib_mode: Option<IpoibMode>,
}
