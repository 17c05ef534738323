// SPDX-License-Identifier: Apache-2.0

use crate::{
    ConnectionConfig, ConnectionExtra, IfcfgFile, InfinibandConfig,
    IpoibMode, SysnetError, VarValue,
};

use super::ConnectionHandler;

pub(crate) struct InfinibandHandler;

impl ConnectionHandler for InfinibandHandler {
    fn read_extra(
        &self,
        file: &IfcfgFile,
    ) -> Result<ConnectionExtra, SysnetError> {
        let mut config = InfinibandConfig::default();
        if let Some(mode) = file.get_str("IPOIB_MODE") {
            match IpoibMode::from_sysconfig(mode) {
                Some(m) => config.ipoib_mode = Some(m),
                None => log::warn!("Unknown IPOIB_MODE {mode}, ignoring"),
            }
        }
        Ok(ConnectionExtra::Infiniband(config))
    }

    fn write_extra(
        &self,
        conn: &ConnectionConfig,
        file: &mut IfcfgFile,
    ) -> Result<(), SysnetError> {
        let ConnectionExtra::Infiniband(config) = &conn.extra else {
            return Ok(());
        };
        // IPOIB_MODE may be unset, the explicit tag keeps the type
        // recognizable on reload
        file.set(
            "INTERFACETYPE",
            VarValue::Symbol("infiniband".to_string()),
        )?;
        if let Some(mode) = config.ipoib_mode {
            file.set(
                "IPOIB_MODE",
                VarValue::Symbol(mode.as_str().to_string()),
            )?;
        }
        Ok(())
    }
}
