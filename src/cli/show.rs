// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use sysnet::{probe_hardware, ConfigReader, SysconfigPaths};

use crate::CliError;

pub(crate) struct CommandShow;

impl CommandShow {
    pub(crate) const CMD: &'static str = "show";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new(Self::CMD)
            .alias("s")
            .about("Show the current network configuration")
            .arg(
                clap::Arg::new("ROOT")
                    .long("root")
                    .default_value("/")
                    .help("Root directory to read configuration from"),
            )
    }

    pub(crate) fn handle(
        matches: &clap::ArgMatches,
    ) -> Result<(), CliError> {
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
        let config = ConfigReader::new(paths, hw).read()?;
        println!("{}", serde_yaml::to_string(&config)?);
        Ok(())
    }
}
