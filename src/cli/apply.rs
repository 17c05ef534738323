// SPDX-License-Identifier: Apache-2.0

use std::io::Read;
use std::path::Path;

use sysnet::{
    probe_hardware, CommandRunner, ConfigReader, ConfigWriter, NetConfig,
    RecordingRunner, SysconfigPaths, SystemRunner, WriteOptions,
};

use crate::CliError;

pub(crate) struct CommandApply;

impl CommandApply {
    pub(crate) const CMD: &'static str = "apply";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new(Self::CMD)
            .alias("a")
            .about("Apply a network configuration")
            .arg(
                clap::Arg::new("STATE_FILE")
                    .required(false)
                    .index(1)
                    .help("Network configuration file, '-' for stdin"),
            )
            .arg(
                clap::Arg::new("ROOT")
                    .long("root")
                    .default_value("/")
                    .help("Root directory to write configuration to"),
            )
            .arg(
                clap::Arg::new("NO_RELOAD")
                    .long("no-reload")
                    .action(clap::ArgAction::SetTrue)
                    .help("Do not reload udev rules after writing"),
            )
            .arg(
                clap::Arg::new("DRY_RUN")
                    .long("dry-run")
                    .short('n')
                    .action(clap::ArgAction::SetTrue)
                    .help(
                        "Skip external commands and print what would be \
                         executed; configuration files under --root are \
                         still written",
                    ),
            )
    }

    pub(crate) fn handle(
        matches: &clap::ArgMatches,
    ) -> Result<(), CliError> {
        let desired = config_from_file(
            matches
                .get_one::<String>("STATE_FILE")
                .map(String::as_str)
                .unwrap_or("-"),
        )?;

        let root = matches
            .get_one::<String>("ROOT")
            .map(String::as_str)
            .unwrap_or("/");
        let paths = SysconfigPaths::new(Path::new(root));
        let hw = match probe_hardware() {
            Ok(hw) => hw,
            Err(e) => {
                log::warn!("Hardware probing failed: {e}");
                Vec::new()
            }
        };
        let current = ConfigReader::new(paths.clone(), hw).read()?;

        let options = WriteOptions {
            reload_udev: !matches.get_flag("NO_RELOAD")
                && !matches.get_flag("DRY_RUN"),
            ..Default::default()
        };
        if matches.get_flag("DRY_RUN") {
            let runner = RecordingRunner::new();
            Self::write(&paths, &runner, options, &desired, &current)?;
            for cmd in runner.commands() {
                println!("would run: {cmd}");
            }
        } else {
            let runner = SystemRunner;
            Self::write(&paths, &runner, options, &desired, &current)?;
        }
        Ok(())
    }

    fn write(
        paths: &SysconfigPaths,
        runner: &dyn CommandRunner,
        options: WriteOptions,
        desired: &NetConfig,
        current: &NetConfig,
    ) -> Result<(), CliError> {
        ConfigWriter::new(paths.clone(), runner)
            .with_options(options)
            .write(desired, Some(current))?;
        Ok(())
    }
}

fn config_from_file(path: &str) -> Result<NetConfig, CliError> {
    let content = if path == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        content
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_yaml::from_str(&content)?)
}
