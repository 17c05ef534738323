// SPDX-License-Identifier: Apache-2.0

mod ifcfg;
mod reader;
mod rename;
mod scenarios;
mod udev_rule;
