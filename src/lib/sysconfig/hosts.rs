// SPDX-License-Identifier: Apache-2.0

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::SysnetError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostsLine {
    Raw(String),
    Entry { ip: IpAddr, names: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The /etc/hosts file, entries keyed by IP address. Lines we do not
/// manage are preserved verbatim.
pub struct HostsFile {
    path: PathBuf,
    lines: Vec<HostsLine>,
    dirty: bool,
}

impl HostsFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: Vec::new(),
            dirty: false,
        }
    }

    pub fn load(&mut self) -> Result<(), SysnetError> {
        self.lines.clear();
        self.dirty = false;
        if !self.path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.path)?;
        for raw in content.lines() {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                self.lines.push(HostsLine::Raw(raw.to_string()));
                continue;
            }
            let mut fields = trimmed.split_whitespace();
            match fields.next().map(IpAddr::from_str) {
                Some(Ok(ip)) => {
                    self.lines.push(HostsLine::Entry {
                        ip,
                        names: fields.map(|f| f.to_string()).collect(),
                    });
                }
                _ => self.lines.push(HostsLine::Raw(raw.to_string())),
            }
        }
        Ok(())
    }

    /// Set the names for an IP, replacing an existing entry or appending a
    /// new one.
    pub fn set_entry(&mut self, ip: IpAddr, names: Vec<String>) {
        for line in self.lines.iter_mut() {
            if let HostsLine::Entry { ip: i, names: n } = line {
                if *i == ip {
                    if *n != names {
                        *n = names;
                        self.dirty = true;
                    }
                    return;
                }
            }
        }
        self.lines.push(HostsLine::Entry { ip, names });
        self.dirty = true;
    }

    /// Drop the entry for an IP. Returns whether one was present.
    pub fn remove_entry(&mut self, ip: IpAddr) -> bool {
        let before = self.lines.len();
        self.lines
            .retain(|l| !matches!(l, HostsLine::Entry { ip: i, .. } if *i == ip));
        let removed = self.lines.len() != before;
        if removed {
            self.dirty = true;
        }
        removed
    }

    pub fn names_for(&self, ip: IpAddr) -> Option<&[String]> {
        self.lines.iter().find_map(|l| match l {
            HostsLine::Entry { ip: i, names } if *i == ip => {
                Some(names.as_slice())
            }
            _ => None,
        })
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the file back when modified, no-op otherwise.
    pub fn save(&mut self) -> Result<(), SysnetError> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = String::new();
        for line in &self.lines {
            match line {
                HostsLine::Raw(raw) => content.push_str(raw),
                HostsLine::Entry { ip, names } => {
                    content.push_str(&format!("{ip} {}", names.join(" ")));
                }
            }
            content.push('\n');
        }
        std::fs::write(&self.path, content)?;
        self.dirty = false;
        Ok(())
    }
}
