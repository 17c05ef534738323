// SPDX-License-Identifier: Apache-2.0

mod file;
mod hosts;
mod ifcfg;
mod paths;
mod routes_file;
mod udev_rule;

pub use self::file::SysconfigFile;
pub use self::hosts::HostsFile;
pub use self::ifcfg::{IfcfgFile, VarKind, VarValue};
pub use self::paths::SysconfigPaths;
pub(crate) use self::routes_file::{
    find_routes_for_iface, routes_without_iface,
};
pub use self::routes_file::RoutesFile;
pub use self::udev_rule::UdevRule;
