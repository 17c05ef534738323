// SPDX-License-Identifier: Apache-2.0

use crate::{
    BridgeConfig, ConnectionConfig, ConnectionExtra, IfcfgFile, SysnetError,
    VarValue,
};

use super::ConnectionHandler;

pub(crate) struct BridgeHandler;

impl ConnectionHandler for BridgeHandler {
    fn read_extra(
        &self,
        file: &IfcfgFile,
    ) -> Result<ConnectionExtra, SysnetError> {
        let mut config = BridgeConfig::default();
        if let Some(ports) = file.get_str("BRIDGE_PORTS") {
            config.ports =
                ports.split_whitespace().map(|p| p.to_string()).collect();
        }
        config.stp = file.get_str("BRIDGE_STP").map(|v| v == "on");
        config.forward_delay =
            file.get_int("BRIDGE_FORWARDDELAY").and_then(|i| {
                match u32::try_from(i) {
                    Ok(delay) => Some(delay),
                    Err(_) => {
                        log::warn!(
                            "Ignoring out of range BRIDGE_FORWARDDELAY {i}"
                        );
                        None
                    }
                }
            });
        Ok(ConnectionExtra::Bridge(config))
    }

    fn write_extra(
        &self,
        conn: &ConnectionConfig,
        file: &mut IfcfgFile,
    ) -> Result<(), SysnetError> {
        let ConnectionExtra::Bridge(config) = &conn.extra else {
            return Ok(());
        };
        file.set("BRIDGE", VarValue::Symbol("yes".to_string()))?;
        file.set(
            "BRIDGE_PORTS",
            VarValue::Str(config.ports.join(" ")),
        )?;
        if let Some(stp) = config.stp {
            file.set(
                "BRIDGE_STP",
                VarValue::Symbol(
                    if stp { "on" } else { "off" }.to_string(),
                ),
            )?;
        }
        if let Some(delay) = config.forward_delay {
            file.set(
                "BRIDGE_FORWARDDELAY",
                VarValue::Integer(delay.into()),
            )?;
        }
        Ok(())
    }
}
