use std::env;
use std::fmt;

use crate::domain::value_objects::VcsType;
use crate::infrastructure::process::DebugSink;

/// Environment variable overriding the git executable.
pub const GIT_EXECUTABLE_ENV: &str = "VCSVIEW_GIT";
/// Environment variable overriding the mercurial executable.
pub const HG_EXECUTABLE_ENV: &str = "VCSVIEW_HG";
/// Environment variable overriding the record channel capacity.
pub const CHANNEL_CAPACITY_ENV: &str = "VCSVIEW_CHANNEL_CAPACITY";

/// Default capacity of the bounded record channels.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Backend configuration shared by every query.
#[derive(Clone)]
pub struct VcsConfig {
    /// Program used for git invocations
    pub git_executable: String,

    /// Program used for mercurial invocations
    pub hg_executable: String,

    /// Capacity of the record channel handed to callers (at least 1)
    pub channel_capacity: usize,

    /// Receives human-readable operational messages
    pub debug_sink: Option<DebugSink>,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            git_executable: VcsType::Git.executable_name().to_string(),
            hg_executable: VcsType::Mercurial.executable_name().to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            debug_sink: None,
        }
    }
}

impl fmt::Debug for VcsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VcsConfig")
            .field("git_executable", &self.git_executable)
            .field("hg_executable", &self.hg_executable)
            .field("channel_capacity", &self.channel_capacity)
            .field("debug_sink", &self.debug_sink.is_some())
            .finish()
    }
}

impl VcsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `VCSVIEW_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `VCSVIEW_*`
    /// keys. Blank executables and an unparsable channel capacity are
    /// ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(git) = lookup(GIT_EXECUTABLE_ENV).filter(|v| !v.trim().is_empty()) {
            config.git_executable = git;
        }
        if let Some(hg) = lookup(HG_EXECUTABLE_ENV).filter(|v| !v.trim().is_empty()) {
            config.hg_executable = hg;
        }
        if let Some(capacity) = lookup(CHANNEL_CAPACITY_ENV) {
            match capacity.trim().parse::<usize>() {
                Ok(capacity) => config = config.with_channel_capacity(capacity),
                Err(_) => tracing::warn!("ignoring invalid {}={:?}", CHANNEL_CAPACITY_ENV, capacity),
            }
        }

        config
    }

    pub fn with_git_executable(mut self, executable: impl Into<String>) -> Self {
        self.git_executable = executable.into();
        self
    }

    pub fn with_hg_executable(mut self, executable: impl Into<String>) -> Self {
        self.hg_executable = executable.into();
        self
    }

    /// Set the record channel capacity, clamped to at least 1.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    pub fn with_debug_sink(mut self, sink: DebugSink) -> Self {
        self.debug_sink = Some(sink);
        self
    }
}
