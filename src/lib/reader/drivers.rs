// SPDX-License-Identifier: Apache-2.0

use crate::{Driver, SysconfigPaths, SysnetError};

/// Collects `options <module> <args>` lines from modprobe configuration.
pub(crate) fn read_drivers(
    paths: &SysconfigPaths,
) -> Result<Vec<Driver>, SysnetError> {
    let dir = paths.modprobe_dir();
    let mut ret: Vec<Driver> = Vec::new();
    if !dir.exists() {
        return Ok(ret);
    }
    let mut files: Vec<_> = std::fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension().map(|e| e == "conf").unwrap_or(false)
        })
        .collect();
    files.sort();
    for path in files {
        let content = std::fs::read_to_string(&path)?;
        for line in content.lines() {
            let Some(rest) = line.trim().strip_prefix("options ") else {
                continue;
            };
            let mut fields = rest.split_whitespace();
            let Some(name) = fields.next() else {
                continue;
            };
            let options = fields.collect::<Vec<&str>>().join(" ");
            let driver = Driver::new(
                name,
                if options.is_empty() {
                    None
                } else {
                    Some(options.as_str())
                },
            );
            if !ret.iter().any(|d| d.name == driver.name) {
                ret.push(driver);
            }
        }
    }
    Ok(ret)
}
