use async_trait::async_trait;
use std::path::Path;
use tokio::sync::mpsc;

use crate::common::error::VcsError;
use crate::common::result::VcsResult;
use crate::domain::entities::{Branch, Commit};
use crate::domain::value_objects::{HistoryQuery, VcsType};
use crate::infrastructure::process::StreamingExecutor;

/// An executor ready to run, paired with the channel its records arrive on.
///
/// The caller must run the executor and drain the receiver concurrently:
/// the channel is bounded, so draining only after `run()` returns can
/// deadlock.
pub type RecordStream<T> = (StreamingExecutor, mpsc::Receiver<T>);

/// Read-only queries every version control backend supports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VcsBackend: Send + Sync {
    /// The system this backend drives
    fn vcs_type(&self) -> VcsType;

    /// Version of the installed tool, e.g. `2.39.2`
    async fn version(&self) -> VcsResult<String>;

    /// Name of the metadata directory at the repository root (`.git`, `.hg`)
    fn repository_marker_name(&self) -> &'static str;

    /// Fails unless `project_path` holds the marker directory.
    fn check_repository(&self, project_path: &Path) -> VcsResult<()> {
        check_marker(project_path, self.repository_marker_name())
    }

    /// Short working tree status, as printed by the tool
    async fn repository_status(&self, project_path: &Path) -> VcsResult<String>;

    /// Stream every local and remote branch.
    fn list_branches(&self, project_path: &Path) -> RecordStream<Branch>;

    /// Stream the single commit `commit_id` resolves to.
    ///
    /// An unknown id yields no records and the executor reports an
    /// execution error.
    fn read_commit(&self, project_path: &Path, commit_id: &str) -> RecordStream<Commit>;

    /// Stream history, newest first, restricted and paginated by `query`.
    fn read_history(&self, project_path: &Path, query: &HistoryQuery) -> RecordStream<Commit>;
}

/// Check that `project_path/marker` exists and is a directory.
pub fn check_marker(project_path: &Path, marker: &str) -> VcsResult<()> {
    let marker_path = project_path.join(marker);
    let metadata = std::fs::metadata(&marker_path)
        .map_err(|e| VcsError::path(project_path, format!("{} not found: {}", marker, e)))?;

    if !metadata.is_dir() {
        return Err(VcsError::path(
            project_path,
            format!("{} is not a directory", marker),
        ));
    }

    Ok(())
}
