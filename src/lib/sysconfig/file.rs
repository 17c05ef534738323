// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use crate::SysnetError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    /// Comment, blank line or anything else we do not interpret, kept
    /// verbatim.
    Raw(String),
    Var { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One sysconfig file (`KEY='value'` lines) as an ordered list of lines.
///
/// Non-variable lines survive a load/save cycle untouched, removing a
/// variable removes its line instead of blanking the value.
pub struct SysconfigFile {
    path: PathBuf,
    lines: Vec<Line>,
}

impl SysconfigFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the file. A missing file is not an error, it loads as empty.
    pub fn load(&mut self) -> Result<(), SysnetError> {
        self.lines.clear();
        if !self.path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.path)?;
        for raw in content.lines() {
            self.lines.push(Self::parse_line(raw));
        }
        Ok(())
    }

    fn parse_line(raw: &str) -> Line {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Line::Raw(raw.to_string());
        }
        if let Some(pos) = trimmed.find('=') {
            let key = &trimmed[..pos];
            if !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !key.starts_with(|c: char| c.is_ascii_digit())
            {
                return Line::Var {
                    key: key.to_string(),
                    value: Self::unquote(&trimmed[pos + 1..]),
                };
            }
        }
        Line::Raw(raw.to_string())
    }

    fn unquote(value: &str) -> String {
        let value = value.trim();
        for quote in ['\'', '"'] {
            if value.len() >= 2
                && value.starts_with(quote)
                && value.ends_with(quote)
            {
                return value[1..value.len() - 1].to_string();
            }
        }
        value.to_string()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|l| match l {
            Line::Var { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set a variable, updating the existing line in place or appending a
    /// new one at the end.
    pub fn set(&mut self, key: &str, value: &str) {
        for line in self.lines.iter_mut() {
            if let Line::Var { key: k, value: v } = line {
                if k == key {
                    *v = value.to_string();
                    return;
                }
            }
        }
        self.lines.push(Line::Var {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    /// Remove a variable line entirely. Returns whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(
            |l| !matches!(l, Line::Var { key: k, .. } if k == key),
        );
        self.lines.len() != before
    }

    pub fn keys(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                Line::Var { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All variable keys starting with the given base, in file order.
    pub fn keys_with_prefix(&self, base: &str) -> Vec<String> {
        self.lines
            .iter()
            .filter_map(|l| match l {
                Line::Var { key, .. } if key.starts_with(base) => {
                    Some(key.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Write the file back, single-quoting every value. Parent directories
    /// are created as needed.
    pub fn save(&self) -> Result<(), SysnetError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = String::new();
        for line in &self.lines {
            match line {
                Line::Raw(raw) => content.push_str(raw),
                Line::Var { key, value } => {
                    content.push_str(&format!(
                        "{key}='{}'",
                        value.replace('\'', r"'\''")
                    ));
                }
            }
            content.push('\n');
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Delete the file. Missing file is not an error.
    pub fn remove_file(&self) -> Result<(), SysnetError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
