// SPDX-License-Identifier: Apache-2.0

use crate::{ConnectionConfig, ConnectionExtra, IfcfgFile, SysnetError};

use super::ConnectionHandler;

/// Plain ethernet, no variable family of its own.
pub(crate) struct EthernetHandler;

impl ConnectionHandler for EthernetHandler {
    fn read_extra(
        &self,
        _file: &IfcfgFile,
    ) -> Result<ConnectionExtra, SysnetError> {
        Ok(ConnectionExtra::Ethernet)
    }

    fn write_extra(
        &self,
        _conn: &ConnectionConfig,
        _file: &mut IfcfgFile,
    ) -> Result<(), SysnetError> {
        Ok(())
    }
}
