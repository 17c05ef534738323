// SPDX-License-Identifier: Apache-2.0

use crate::{
    ConnectionConfig, ConnectionExtra, ErrorKind, IfcfgFile, SysnetError,
    VarValue, VlanConfig,
};

use super::ConnectionHandler;

pub(crate) struct VlanHandler;

impl ConnectionHandler for VlanHandler {
    fn read_extra(
        &self,
        file: &IfcfgFile,
    ) -> Result<ConnectionExtra, SysnetError> {
        let parent = file.get_str("ETHERDEVICE").ok_or_else(|| {
            SysnetError::new(
                ErrorKind::InvalidArgument,
                format!(
                    "VLAN file {} has no ETHERDEVICE",
                    file.path().display()
                ),
            )
        })?;
        let mut config = VlanConfig::new(parent, None);
        config.vlan_id =
            file.get_int("VLAN_ID").and_then(|i| match u16::try_from(i) {
                Ok(id) => Some(id),
                Err(_) => {
                    log::warn!("Ignoring out of range VLAN_ID {i}");
                    None
                }
            });
        Ok(ConnectionExtra::Vlan(config))
    }

    fn write_extra(
        &self,
        conn: &ConnectionConfig,
        file: &mut IfcfgFile,
    ) -> Result<(), SysnetError> {
        let ConnectionExtra::Vlan(config) = &conn.extra else {
            return Ok(());
        };
        file.set("ETHERDEVICE", VarValue::Str(config.parent.clone()))?;
        if let Some(vlan_id) = config.vlan_id {
            file.set("VLAN_ID", VarValue::Integer(vlan_id.into()))?;
        }
        Ok(())
    }
}
