// SPDX-License-Identifier: Apache-2.0

mod apply;
mod error;
mod show;

pub(crate) use self::error::CliError;
use self::{apply::CommandApply, show::CommandShow};

fn main() -> Result<(), CliError> {
    let mut cli_cmd = clap::Command::new("snc")
        .about("sysnet CLI")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            clap::Arg::new("quiet")
                .short('q')
                .action(clap::ArgAction::SetTrue)
                .help("Disable logging")
                .global(true),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .action(clap::ArgAction::Count)
                .help("Increase verbose level")
                .global(true),
        )
        .subcommand(CommandShow::new_cmd())
        .subcommand(CommandApply::new_cmd());

    let matches = cli_cmd.get_matches_mut();

    let (log_groups, log_level) = match matches.get_count("verbose") {
        0 => (vec!["sysnet", "snc"], log::LevelFilter::Info),
        1 => (vec!["sysnet", "snc"], log::LevelFilter::Debug),
        2 => (vec!["sysnet", "snc"], log::LevelFilter::Trace),
        _ => (vec![""], log::LevelFilter::Trace),
    };

    if !matches.get_flag("quiet") {
        let mut log_builder = env_logger::Builder::new();
        if log_groups.is_empty() {
            log_builder.filter(None, log_level);
        } else {
            for log_group in log_groups {
                log_builder.filter(Some(log_group), log_level);
            }
        }
        log_builder.init();
    }

    log::debug!("snc version: {}", clap::crate_version!());

    if let Err(e) = call_subcommand(&matches) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    Ok(())
}

fn call_subcommand(matches: &clap::ArgMatches) -> Result<(), CliError> {
    if let Some(m) = matches.subcommand_matches(CommandShow::CMD) {
        CommandShow::handle(m)
    } else if let Some(m) = matches.subcommand_matches(CommandApply::CMD) {
        CommandApply::handle(m)
    } else {
        Err("Unknown sub-command".into())
    }
}
