// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Please report this as bug to upstream
    Bug,
    /// Invalid argument
    InvalidArgument,
    /// Failed to read or write a configuration file
    FileAccess,
    /// External command returned non-zero exit code or failed to start
    CommandFailed,
    /// Not supported
    NoSupport,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Bug => "bug",
                Self::InvalidArgument => "invalid-argument",
                Self::FileAccess => "file-access",
                Self::CommandFailed => "command-failed",
                Self::NoSupport => "no-support",
            }
        )
    }
}

// Try not implement From for SysnetError here unless you are sure this
// error should always convert to certain type of ErrorKind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SysnetError {
    pub kind: ErrorKind,
    pub msg: String,
}

impl std::fmt::Display for SysnetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl SysnetError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }
}

impl std::error::Error for SysnetError {}

impl From<std::io::Error> for SysnetError {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::FileAccess, format!("std::io::Error: {e}"))
    }
}

impl From<std::net::AddrParseError> for SysnetError {
    fn from(e: std::net::AddrParseError) -> Self {
        Self::new(
            ErrorKind::InvalidArgument,
            format!("Invalid IP address: {e}"),
        )
    }
}

impl From<ipnet::AddrParseError> for SysnetError {
    fn from(e: ipnet::AddrParseError) -> Self {
        Self::new(
            ErrorKind::InvalidArgument,
            format!("Invalid IP network: {e}"),
        )
    }
}

impl From<nispor::NisporError> for SysnetError {
    fn from(e: nispor::NisporError) -> Self {
        Self::new(ErrorKind::Bug, format!("{}: {}", e.kind, e.msg))
    }
}
