use std::path::Path;
use std::sync::Arc;

use crate::common::error::VcsError;
use crate::common::result::VcsResult;
use crate::domain::entities::{Branch, Commit, RepositoryLocation};
use crate::domain::value_objects::HistoryQuery;
use crate::infrastructure::vcs::{RecordStream, VcsBackend};

/// Records collected from one query, plus the failure that ended it early.
///
/// A failed run still returns whatever was parsed before the tool exited.
/// Those records are a best-effort partial result, not a transaction.
#[derive(Debug)]
pub struct QueryOutcome<T> {
    pub records: Vec<T>,
    pub error: Option<VcsError>,
}

impl<T> QueryOutcome<T> {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Drop partial records on failure.
    pub fn into_result(self) -> VcsResult<Vec<T>> {
        match self.error {
            None => Ok(self.records),
            Some(e) => Err(e),
        }
    }
}

/// Run the executor and collect its records concurrently.
pub async fn drain<T>(stream: RecordStream<T>) -> QueryOutcome<T> {
    let mut records = Vec::new();
    let error = visit(stream, |record| records.push(record)).await.err();
    QueryOutcome { records, error }
}

/// Run the executor, handing each record to `on_record` as soon as it is
/// parsed.
pub async fn visit<T, F>(stream: RecordStream<T>, mut on_record: F) -> VcsResult<()>
where
    F: FnMut(T),
{
    let (executor, mut receiver) = stream;

    let consume = async move {
        while let Some(record) = receiver.recv().await {
            on_record(record);
        }
    };
    let (result, ()) = tokio::join!(executor.run(), consume);

    result
}

/// Queries against one verified repository.
#[derive(Clone)]
pub struct RepositoryQueryService {
    backend: Arc<dyn VcsBackend>,
    location: RepositoryLocation,
}

impl std::fmt::Debug for RepositoryQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryQueryService")
            .field("location", &self.location)
            .finish()
    }
}

impl RepositoryQueryService {
    /// Open the repository at `project_path`, failing if `backend` does not
    /// recognise it.
    pub fn open(project_path: impl AsRef<Path>, backend: Arc<dyn VcsBackend>) -> VcsResult<Self> {
        let project_path = project_path.as_ref();
        backend.check_repository(project_path)?;

        let location = RepositoryLocation::new(backend.vcs_type(), project_path);
        tracing::debug!(
            "opened {} repository at {}",
            location.vcs_type.display_name(),
            location.project_path.display()
        );

        Ok(Self { backend, location })
    }

    pub fn location(&self) -> &RepositoryLocation {
        &self.location
    }

    pub fn backend(&self) -> &Arc<dyn VcsBackend> {
        &self.backend
    }

    fn project_path(&self) -> &Path {
        &self.location.project_path
    }

    pub async fn status(&self) -> VcsResult<String> {
        self.backend.repository_status(self.project_path()).await
    }

    pub async fn branches(&self) -> QueryOutcome<Branch> {
        drain(self.backend.list_branches(self.project_path())).await
    }

    /// The branch the working copy is on, if the listing marks one.
    pub async fn current_branch(&self) -> VcsResult<Option<Branch>> {
        let branches = self.branches().await.into_result()?;
        Ok(branches.into_iter().find(Branch::is_current))
    }

    /// Look up one commit. `Ok(None)` only if the tool succeeded without
    /// printing a commit.
    pub async fn commit(&self, commit_id: &str) -> VcsResult<Option<Commit>> {
        let commits = drain(self.backend.read_commit(self.project_path(), commit_id))
            .await
            .into_result()?;
        Ok(commits.into_iter().next())
    }

    pub async fn history(&self, query: &HistoryQuery) -> QueryOutcome<Commit> {
        drain(self.backend.read_history(self.project_path(), query)).await
    }

    /// History handed to `on_commit` one commit at a time.
    pub async fn visit_history<F>(&self, query: &HistoryQuery, on_commit: F) -> VcsResult<()>
    where
        F: FnMut(Commit),
    {
        visit(self.backend.read_history(self.project_path(), query), on_commit).await
    }

    /// Branches handed to `on_branch` one at a time.
    pub async fn visit_branches<F>(&self, on_branch: F) -> VcsResult<()>
    where
        F: FnMut(Branch),
    {
        visit(self.backend.list_branches(self.project_path()), on_branch).await
    }
}
