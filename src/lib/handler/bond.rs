// SPDX-License-Identifier: Apache-2.0

use crate::{
    BondConfig, ConnectionConfig, ConnectionExtra, IfcfgFile, SysnetError,
    VarValue,
};

use super::ConnectionHandler;

pub(crate) struct BondHandler;

impl ConnectionHandler for BondHandler {
    fn read_extra(
        &self,
        file: &IfcfgFile,
    ) -> Result<ConnectionExtra, SysnetError> {
        let mut config = BondConfig::default();
        if let Some(slaves) = file.values("BONDING_SLAVE") {
            // File order is the enslaving order
            config.ports = slaves
                .values()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect();
        }
        config.options = file
            .get_str("BONDING_MODULE_OPTS")
            .map(|s| s.to_string());
        Ok(ConnectionExtra::Bond(config))
    }

    fn write_extra(
        &self,
        conn: &ConnectionConfig,
        file: &mut IfcfgFile,
    ) -> Result<(), SysnetError> {
        let ConnectionExtra::Bond(config) = &conn.extra else {
            return Ok(());
        };
        file.set("BONDING_MASTER", VarValue::Symbol("yes".to_string()))?;
        for (i, port) in config.ports.iter().enumerate() {
            file.set_at(
                "BONDING_SLAVE",
                &i.to_string(),
                VarValue::Str(port.clone()),
            )?;
        }
        if let Some(options) = config.options.as_deref() {
            file.set(
                "BONDING_MODULE_OPTS",
                VarValue::Str(options.to_string()),
            )?;
        }
        Ok(())
    }
}
