use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version control system a backend drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsType {
    /// Git
    Git,
    /// Mercurial
    #[serde(rename = "hg")]
    Mercurial,
}

impl Default for VcsType {
    fn default() -> Self {
        Self::Git
    }
}

impl fmt::Display for VcsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VcsType::Git => write!(f, "git"),
            VcsType::Mercurial => write!(f, "hg"),
        }
    }
}

impl FromStr for VcsType {
    type Err = VcsTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "git" => Ok(VcsType::Git),
            "hg" | "mercurial" => Ok(VcsType::Mercurial),
            _ => Err(VcsTypeError::Unsupported(s.to_string())),
        }
    }
}

impl VcsType {
    /// All supported systems, in detection order.
    pub const ALL: [VcsType; 2] = [VcsType::Git, VcsType::Mercurial];

    /// Get the metadata directory name for this VCS
    pub fn metadata_dir(&self) -> &'static str {
        match self {
            VcsType::Git => ".git",
            VcsType::Mercurial => ".hg",
        }
    }

    /// Get the standard executable name for this VCS
    pub fn executable_name(&self) -> &'static str {
        match self {
            VcsType::Git => "git",
            VcsType::Mercurial => "hg",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            VcsType::Git => "Git",
            VcsType::Mercurial => "Mercurial",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VcsTypeError {
    #[error("Unsupported VCS type: '{0}'. Supported types are: git, hg")]
    Unsupported(String),
}
