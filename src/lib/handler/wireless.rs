// SPDX-License-Identifier: Apache-2.0

use crate::{
    ConnectionConfig, ConnectionExtra, IfcfgFile, SysnetError, VarValue,
    WirelessConfig, WirelessMode,
};

use super::ConnectionHandler;

pub(crate) struct WirelessHandler;

impl ConnectionHandler for WirelessHandler {
    fn read_extra(
        &self,
        file: &IfcfgFile,
    ) -> Result<ConnectionExtra, SysnetError> {
        let mut config = WirelessConfig::default();
        config.essid = file.get_str("WIRELESS_ESSID").map(|s| s.to_string());
        if let Some(mode) = file.get_str("WIRELESS_MODE") {
            match WirelessMode::from_sysconfig(mode) {
                Some(m) => config.mode = m,
                None => {
                    log::warn!("Unknown WIRELESS_MODE {mode}, using managed")
                }
            }
        }
        config.auth_mode =
            file.get_str("WIRELESS_AUTH_MODE").map(|s| s.to_string());
        config.wpa_psk =
            file.get_str("WIRELESS_WPA_PSK").map(|s| s.to_string());
        config.channel = file.get_int("WIRELESS_CHANNEL").and_then(|i| {
            match u32::try_from(i) {
                Ok(ch) => Some(ch),
                Err(_) => {
                    log::warn!("Ignoring out of range WIRELESS_CHANNEL {i}");
                    None
                }
            }
        });
        Ok(ConnectionExtra::Wireless(config))
    }

    fn write_extra(
        &self,
        conn: &ConnectionConfig,
        file: &mut IfcfgFile,
    ) -> Result<(), SysnetError> {
        let ConnectionExtra::Wireless(config) = &conn.extra else {
            return Ok(());
        };
        if let Some(essid) = config.essid.as_deref() {
            file.set("WIRELESS_ESSID", VarValue::Str(essid.to_string()))?;
        }
        file.set(
            "WIRELESS_MODE",
            VarValue::Symbol(config.mode.as_str().to_string()),
        )?;
        if let Some(auth_mode) = config.auth_mode.as_deref() {
            file.set(
                "WIRELESS_AUTH_MODE",
                VarValue::Symbol(auth_mode.to_string()),
            )?;
        }
        if let Some(psk) = config.wpa_psk.as_deref() {
            file.set("WIRELESS_WPA_PSK", VarValue::Str(psk.to_string()))?;
        }
        if let Some(channel) = config.channel {
            file.set("WIRELESS_CHANNEL", VarValue::Integer(channel.into()))?;
        }
        Ok(())
    }
}
