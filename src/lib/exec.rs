// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use crate::{ErrorKind, SysnetError};

/// Seam for the external commands the writers invoke (netconfig, sysctl,
/// udevadm, ifdown, hostname). The contract with all of them is "exit zero
/// on success", output is not interpreted.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<(), SysnetError>;
}

/// Executes commands on the live system, blocking until they finish.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<(), SysnetError> {
        log::debug!("Executing {program} {}", args.join(" "));
        let status = std::process::Command::new(program)
            .args(args)
            .status()
            .map_err(|e| {
                SysnetError::new(
                    ErrorKind::CommandFailed,
                    format!("Failed to execute {program}: {e}"),
                )
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(SysnetError::new(
                ErrorKind::CommandFailed,
                format!("{program} {} failed: {status}", args.join(" ")),
            ))
        }
    }
}

/// Records invocations instead of executing them. Used for dry runs and
/// tests.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<String>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded command lines, in invocation order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<(), SysnetError> {
        self.commands
            .borrow_mut()
            .push(format!("{program} {}", args.join(" ")));
        Ok(())
    }
}
