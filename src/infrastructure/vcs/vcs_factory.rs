use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;

use super::git_vcs::GitVcs;
use super::hg_vcs::MercurialVcs;
use super::vcs_interface::VcsBackend;
use crate::common::config::VcsConfig;
use crate::common::error::VcsError;
use crate::common::result::VcsResult;
use crate::domain::value_objects::VcsType;

/// Factory for creating backend instances
pub struct VcsFactory;

impl VcsFactory {
    /// Create a backend for the given VCS type
    pub fn create(vcs_type: VcsType, config: &VcsConfig) -> Arc<dyn VcsBackend> {
        match vcs_type {
            VcsType::Git => Arc::new(GitVcs::from_config(config)),
            VcsType::Mercurial => Arc::new(MercurialVcs::from_config(config)),
        }
    }

    /// Detect the VCS of `project_path` from its marker directory
    pub fn detect(project_path: &Path) -> Option<VcsType> {
        VcsType::ALL
            .into_iter()
            .find(|vcs_type| project_path.join(vcs_type.metadata_dir()).is_dir())
    }

    /// Create the backend matching the repository at `project_path`
    pub fn for_path(project_path: &Path, config: &VcsConfig) -> VcsResult<Arc<dyn VcsBackend>> {
        let vcs_type = Self::detect(project_path).ok_or_else(|| {
            VcsError::path(project_path, "no .git or .hg directory found")
        })?;
        Ok(Self::create(vcs_type, config))
    }

    /// Probe every tool's `--version` concurrently.
    pub async fn versions(config: &VcsConfig) -> Vec<(VcsType, VcsResult<String>)> {
        let lookups = VcsType::ALL.into_iter().map(|vcs_type| async move {
            let version = Self::create(vcs_type, config).version().await;
            (vcs_type, version)
        });
        join_all(lookups).await
    }

    /// Get all VCS types whose tool answers `--version`
    pub async fn available(config: &VcsConfig) -> Vec<VcsType> {
        Self::versions(config)
            .await
            .into_iter()
            .filter_map(|(vcs_type, version)| match version {
                Ok(version) => {
                    tracing::debug!("{} {} available", vcs_type.display_name(), version);
                    Some(vcs_type)
                }
                Err(e) => {
                    tracing::debug!("{} unavailable: {}", vcs_type.display_name(), e);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_backends() {
        let config = VcsConfig::default();
        assert_eq!(VcsFactory::create(VcsType::Git, &config).vcs_type(), VcsType::Git);
        assert_eq!(
            VcsFactory::create(VcsType::Mercurial, &config).vcs_type(),
            VcsType::Mercurial
        );
    }

    #[test]
    fn test_detect_vcs_type() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(VcsFactory::detect(temp_dir.path()), None);

        std::fs::create_dir(temp_dir.path().join(".hg")).unwrap();
        assert_eq!(VcsFactory::detect(temp_dir.path()), Some(VcsType::Mercurial));

        std::fs::create_dir(temp_dir.path().join(".git")).unwrap();
        assert_eq!(VcsFactory::detect(temp_dir.path()), Some(VcsType::Git));
    }

    #[test]
    fn test_for_path_without_repository() {
        let temp_dir = TempDir::new().unwrap();
        let err = VcsFactory::for_path(temp_dir.path(), &VcsConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, VcsError::Path { .. }));
    }

    #[tokio::test]
    async fn test_available_skips_missing_tools() {
        let config = VcsConfig::new()
            .with_git_executable("non_git_binary_for_tests")
            .with_hg_executable("non_hg_binary_for_tests");
        assert!(VcsFactory::available(&config).await.is_empty());
    }

    #[tokio::test]
    async fn test_versions_reports_each_tool() {
        let config = VcsConfig::new()
            .with_git_executable("non_git_binary_for_tests")
            .with_hg_executable("non_hg_binary_for_tests");
        let versions = VcsFactory::versions(&config).await;

        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].0, VcsType::Git);
        assert_eq!(versions[1].0, VcsType::Mercurial);
        assert!(versions.iter().all(|(_, v)| matches!(v, Err(e) if e.is_launch())));
    }
}
