// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
/// Kernel module with its option string, written as a modprobe
/// `options` line. Independent of any interface.
pub struct Driver {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl Driver {
    pub fn new(name: &str, options: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            options: options.map(|o| o.to_string()),
        }
    }

    /// The modprobe configuration line for this driver.
    pub fn modprobe_line(&self) -> String {
        match self.options.as_deref() {
            Some(opts) if !opts.is_empty() => {
                format!("options {} {}\n", self.name, opts)
            }
            _ => format!("options {}\n", self.name),
        }
    }
}
