// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::path::Path;

use crate::sysconfig::UdevRule;
use crate::{
    CommandRunner, InterfaceCollection, SysconfigPaths, SysnetError,
};

use super::{WriteOptions, IFDOWN_BIN, UDEVADM_BIN};

/// Handles the hardware-identity side of a write: shutting down renamed
/// devices and regenerating the udev naming and driver rules.
pub(crate) struct InterfacesWriter<'a> {
    paths: &'a SysconfigPaths,
    runner: &'a dyn CommandRunner,
    options: &'a WriteOptions,
}

impl<'a> InterfacesWriter<'a> {
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
        interfaces: &InterfaceCollection,
    ) -> Result<(), SysnetError> {
        self.shut_down_renamed(interfaces)?;
        self.update_renaming_rules(interfaces)?;
        self.update_driver_rules(interfaces)?;
        if self.options.reload_udev {
            self.reload_udev()?;
        }
        Ok(())
    }

    /// A renamed device keeps running under its old name until ifdown.
    /// During autoinstall the device may not be live at all, skip it.
    fn shut_down_renamed(
        &self,
        interfaces: &InterfaceCollection,
    ) -> Result<(), SysnetError> {
        if self.options.autoinstall {
            return Ok(());
        }
        for iface in interfaces.iter() {
            if let Some(old_name) = iface.old_name.as_deref() {
                log::info!(
                    "Shutting down {old_name}, renamed to {}",
                    iface.name
                );
                self.runner.run(IFDOWN_BIN, &[old_name])?;
            }
        }
        Ok(())
    }

    /// Merge-and-replace of the persistent-net rules: hand-edited rules
    /// for devices this run does not know survive verbatim, rules for
    /// current interfaces are regenerated.
    fn update_renaming_rules(
        &self,
        interfaces: &InterfaceCollection,
    ) -> Result<(), SysnetError> {
        let path = self.paths.persistent_net_rules_path();
        let known_names: HashSet<&str> =
            interfaces.iter().map(|i| i.name.as_str()).collect();

        let mut lines: Vec<String> = Vec::new();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            for line in content.lines() {
                let Some(rule) = UdevRule::parse(line) else {
                    continue;
                };
                let keep = rule
                    .name_target()
                    .map(|name| !known_names.contains(name))
                    .unwrap_or(true);
                if keep {
                    lines.push(line.to_string());
                }
            }
        }
        for iface in interfaces.iter() {
            if let Some(rule) = UdevRule::rename_rule(iface) {
                lines.push(rule.to_string());
            }
        }

        if lines.is_empty() {
            remove_if_exists(&path)
        } else {
            write_lines(&path, &lines)
        }
    }

    fn update_driver_rules(
        &self,
        interfaces: &InterfaceCollection,
    ) -> Result<(), SysnetError> {
        let path = self.paths.driver_rules_path();
        let lines: Vec<String> = interfaces
            .iter()
            .filter_map(UdevRule::driver_rule)
            .map(|r| r.to_string())
            .collect();
        if lines.is_empty() {
            remove_if_exists(&path)
        } else {
            write_lines(&path, &lines)
        }
    }

    fn reload_udev(&self) -> Result<(), SysnetError> {
        self.runner.run(UDEVADM_BIN, &["control", "--reload"])?;
        self.runner.run(
            UDEVADM_BIN,
            &["trigger", "--subsystem-match=net", "--action=add"],
        )?;
        self.runner.run(UDEVADM_BIN, &["settle"])?;
        // Not a synchronization primitive: guarantees the rule files are
        // older than whatever a following network restart writes, mtime
        // comparisons elsewhere depend on it
        std::thread::sleep(std::time::Duration::from_secs(1));
        Ok(())
    }
}

fn write_lines(path: &Path, lines: &[String]) -> Result<(), SysnetError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<(), SysnetError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
