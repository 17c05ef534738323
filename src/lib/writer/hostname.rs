// SPDX-License-Identifier: Apache-2.0

use crate::{CommandRunner, Hostname, SysconfigPaths, SysnetError};

use super::{WriteOptions, HOSTNAME_BIN};

/// Persists the static hostname layer. Installer and transient layers are
/// informational, they are never written back.
pub(crate) struct HostnameWriter<'a> {
    paths: &'a SysconfigPaths,
    runner: &'a dyn CommandRunner,
    options: &'a WriteOptions,
}

impl<'a> HostnameWriter<'a> {
    pub(crate) fn new(
        paths: &'a SysconfigPaths,
        runner: &'a dyn CommandRunner,
        options: &'a WriteOptions,
    ) -> Self {
        Self {
            paths,
            runner,
            options,
        }
    }

    pub(crate) fn write(
        &self,
        hostname: &Hostname,
    ) -> Result<(), SysnetError> {
        let Some(name) = hostname.static_hostname.as_deref() else {
            // Nothing to persist, an absent static hostname leaves the
            // file alone
            return Ok(());
        };
        let path = self.paths.hostname_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, format!("{name}\n"))?;
        if !self.options.autoinstall {
            self.runner.run(HOSTNAME_BIN, &[name])?;
        }
        Ok(())
    }
}
