use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::vcs_type::VcsType;

/// Where a verified repository lives on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryLocation {
    /// Backend that recognised the repository
    pub vcs_type: VcsType,

    /// Project root (not the metadata directory)
    pub project_path: PathBuf,

    /// Metadata directory, e.g. `/path/to/project/.git`
    pub repository_path: PathBuf,
}

impl RepositoryLocation {
    /// Build a location for `project_path`, joining the backend's marker name.
    pub fn new(vcs_type: VcsType, project_path: impl AsRef<Path>) -> Self {
        let project_path = project_path.as_ref().to_path_buf();
        let repository_path = project_path.join(vcs_type.metadata_dir());
        Self {
            vcs_type,
            project_path,
            repository_path,
        }
    }
}
