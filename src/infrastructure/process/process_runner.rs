use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::{Child, Command};

use crate::common::error::VcsError;
use crate::common::result::VcsResult;

/// Receives human-readable operational messages (commands issued, exit
/// notices). No sink means silent operation.
pub type DebugSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Builds process handles for one external program.
#[derive(Clone)]
pub struct ProcessRunner {
    program: String,
    envs: Vec<(String, String)>,
    debug_sink: Option<DebugSink>,
}

impl fmt::Debug for ProcessRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessRunner")
            .field("program", &self.program)
            .field("envs", &self.envs)
            .field("debug_sink", &self.debug_sink.is_some())
            .finish()
    }
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            envs: Vec::new(),
            debug_sink: None,
        }
    }

    /// Set an environment variable on every process built by this runner.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn with_debug_sink(mut self, sink: Option<DebugSink>) -> Self {
        self.debug_sink = sink;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn debug_sink(&self) -> Option<&DebugSink> {
        self.debug_sink.as_ref()
    }

    /// Describe a process running `args` inside `working_dir`.
    ///
    /// Arguments are passed as a discrete vector and never reach a shell.
    /// Nothing is checked here: a missing program or directory surfaces as
    /// [`VcsError::Launch`] when the handle is spawned.
    pub fn build<I, S>(&self, working_dir: impl AsRef<Path>, args: I) -> ProcessHandle
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ProcessHandle {
            program: self.program.clone(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: working_dir.as_ref().to_path_buf(),
            envs: self.envs.clone(),
            debug_sink: self.debug_sink.clone(),
        }
    }
}

/// A fully composed, not yet started invocation.
#[derive(Clone)]
pub struct ProcessHandle {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
    envs: Vec<(String, String)>,
    debug_sink: Option<DebugSink>,
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("working_dir", &self.working_dir)
            .finish()
    }
}

impl ProcessHandle {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Program and arguments joined by single spaces, e.g. `git --no-pager branch -a -v`.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            return self.program.clone();
        }
        format!("{} {}", self.program, self.args.join(" "))
    }

    /// Send a message to the debug sink and to `tracing`.
    pub fn log(&self, message: &str) {
        tracing::debug!(working_dir = %self.working_dir.display(), "{}", message);
        if let Some(sink) = &self.debug_sink {
            sink(message);
        }
    }

    /// Start the process with stdout and stderr piped and stdin closed.
    ///
    /// The pipes are created before the child starts, so output written
    /// before anyone reads it waits in the pipe buffer.
    pub fn spawn(&self) -> VcsResult<Child> {
        self.log(&format!("execute command: {}", self.command_line()));

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        cmd.spawn()
            .map_err(|e| VcsError::launch(self.command_line(), e))
    }
}
