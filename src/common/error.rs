use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by repository queries.
///
/// Only structural failures appear here. A malformed field inside an
/// otherwise complete record is absorbed by the parser and never becomes
/// an error.
#[derive(Error, Debug)]
pub enum VcsError {
    /// The tool binary could not be started (missing, not executable,
    /// bad working directory).
    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and exited unsuccessfully.
    #[error("Command `{command}` failed with {}{}", describe_status(*status), describe_stderr(stderr))]
    Execution {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// Repository marker directory is missing or is not a directory.
    #[error("Repository not found at {}: {reason}", path.display())]
    Path { path: PathBuf, reason: String },

    #[error("No version number found in tool output: {output:?}")]
    VersionNotFound { output: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_status(status: Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {code}"),
        None => "non-zero status".to_string(),
    }
}

fn describe_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

impl VcsError {
    pub fn launch(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            command: command.into(),
            source,
        }
    }

    pub fn execution(command: impl Into<String>, status: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::Execution {
            command: command.into(),
            status,
            stderr: stderr.into(),
        }
    }

    pub fn path(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Path {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn version_not_found(output: impl Into<String>) -> Self {
        Self::VersionNotFound {
            output: output.into(),
        }
    }

    /// True when the failure came from the tool itself rather than from
    /// starting it.
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution { .. })
    }

    pub fn is_launch(&self) -> bool {
        matches!(self, Self::Launch { .. })
    }

    /// Exit status of a failed run, if the platform reported one.
    pub fn exit_status(&self) -> Option<i32> {
        match self {
            Self::Execution { status, .. } => *status,
            _ => None,
        }
    }
}
