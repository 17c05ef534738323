// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum WirelessMode {
    #[default]
    Managed,
    AdHoc,
    Master,
}

impl WirelessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Managed => "managed",
            Self::AdHoc => "ad-hoc",
            Self::Master => "master",
        }
    }

    pub fn from_sysconfig(value: &str) -> Option<Self> {
        match value {
            "managed" => Some(Self::Managed),
            "ad-hoc" | "adhoc" => Some(Self::AdHoc),
            "master" => Some(Self::Master),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", default)]
#[non_exhaustive]
/// Wireless settings, the `WIRELESS_*` sysconfig variable family.
pub struct WirelessConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essid: Option<String>,
    pub mode: WirelessMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wpa_psk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<u32>,
}

impl WirelessConfig {
    pub fn new(essid: &str) -> Self {
        Self {
            essid: Some(essid.to_string()),
            ..Default::default()
        }
    }
}
