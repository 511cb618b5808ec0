use async_trait::async_trait;
use std::path::Path;

use super::tool_cli::{args, ToolCli};
use super::vcs_interface::{RecordStream, VcsBackend};
use crate::common::config::{VcsConfig, DEFAULT_CHANNEL_CAPACITY};
use crate::common::result::VcsResult;
use crate::domain::entities::{Branch, Commit};
use crate::domain::value_objects::{HistoryQuery, VcsType};
use crate::infrastructure::parsing::{BranchLineParser, CommitBlockParser, GIT_COMMIT_FORMAT};
use crate::infrastructure::process::ProcessRunner;

/// Marks the end of options so a caller-supplied revision starting with
/// `-` is never read as a flag.
const END_OF_OPTIONS: &str = "--end-of-options";

/// Git implementation of the read-only queries.
///
/// Every invocation starts with `--no-pager` so output is never handed to
/// an interactive pager.
#[derive(Debug, Clone)]
pub struct GitVcs {
    cli: ToolCli,
}

impl Default for GitVcs {
    fn default() -> Self {
        Self::with_executable(VcsType::Git.executable_name())
    }
}

impl GitVcs {
    /// Create a new Git backend using `git` from `PATH`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Git backend with custom executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self::with_runner(ProcessRunner::new(executable), DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn from_config(config: &VcsConfig) -> Self {
        let runner = ProcessRunner::new(&config.git_executable)
            .with_debug_sink(config.debug_sink.clone());
        Self::with_runner(runner, config.channel_capacity)
    }

    fn with_runner(runner: ProcessRunner, channel_capacity: usize) -> Self {
        Self {
            cli: ToolCli::new(runner, channel_capacity).with_global_args(["--no-pager"]),
        }
    }

    fn pretty_format() -> String {
        format!("--pretty=format:{}", GIT_COMMIT_FORMAT.template)
    }

    fn history_args(query: &HistoryQuery) -> Vec<String> {
        let mut log_args = args(["log", "--no-color", "--date=default"]);
        log_args.push(Self::pretty_format());
        log_args.push(format!("--skip={}", query.offset));

        if let Some(limit) = query.limit() {
            log_args.push(format!("--max-count={}", limit));
        }

        match query.branch() {
            Some(branch) => {
                log_args.push(END_OF_OPTIONS.to_string());
                log_args.push(branch.to_string());
            }
            None => log_args.extend(args(["--branches", "--remotes"])),
        }

        if let Some(path) = query.path() {
            log_args.push("--".to_string());
            log_args.push(path.to_string());
        }

        log_args
    }
}

#[async_trait]
impl VcsBackend for GitVcs {
    fn vcs_type(&self) -> VcsType {
        VcsType::Git
    }

    async fn version(&self) -> VcsResult<String> {
        self.cli.version().await
    }

    fn repository_marker_name(&self) -> &'static str {
        ".git"
    }

    async fn repository_status(&self, project_path: &Path) -> VcsResult<String> {
        self.cli
            .capture(project_path, args(["status", "--short"]))
            .await
    }

    fn list_branches(&self, project_path: &Path) -> RecordStream<Branch> {
        self.cli.stream(
            project_path,
            args(["branch", "-a", "-v", "--no-color"]),
            BranchLineParser::new(),
        )
    }

    fn read_commit(&self, project_path: &Path, commit_id: &str) -> RecordStream<Commit> {
        let mut show_args = args(["show", "--quiet", "--no-color", "--date=default"]);
        show_args.push(Self::pretty_format());
        show_args.push(END_OF_OPTIONS.to_string());
        show_args.push(commit_id.to_string());

        self.cli.stream(
            project_path,
            show_args,
            CommitBlockParser::new(GIT_COMMIT_FORMAT),
        )
    }

    fn read_history(&self, project_path: &Path, query: &HistoryQuery) -> RecordStream<Commit> {
        self.cli.stream(
            project_path,
            Self::history_args(query),
            CommitBlockParser::new(GIT_COMMIT_FORMAT),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args_of<T>(stream: &RecordStream<T>) -> Vec<String> {
        stream.0.handle().args().to_vec()
    }

    #[test]
    fn test_repository_marker_name() {
        assert_eq!(GitVcs::new().repository_marker_name(), ".git");
        assert_eq!(GitVcs::new().vcs_type(), VcsType::Git);
    }

    #[test]
    fn test_list_branches_command() {
        let git = GitVcs::new();
        let stream = git.list_branches(Path::new("/repo"));
        assert_eq!(args_of(&stream), ["--no-pager", "branch", "-a", "-v", "--no-color"]);
        assert_eq!(stream.0.handle().working_dir(), Path::new("/repo"));
    }

    #[test]
    fn test_read_commit_command() {
        let git = GitVcs::new();
        let stream = git.read_commit(Path::new("/repo"), "747ad57");
        assert_eq!(
            args_of(&stream),
            [
                "--no-pager",
                "show",
                "--quiet",
                "--no-color",
                "--date=default",
                "--pretty=format:%H%n%P%n%an%n%ae%n%ad%n%s%n",
                "--end-of-options",
                "747ad57",
            ]
        );
    }

    #[test]
    fn test_history_whole_repository() {
        let git = GitVcs::new();
        let stream = git.read_history(Path::new("/repo"), &HistoryQuery::new());
        let args = args_of(&stream);
        assert!(args.contains(&"--skip=0".to_string()));
        assert!(args.ends_with(&["--branches".to_string(), "--remotes".to_string()]));
        assert!(!args.contains(&"--all".to_string()));
        assert!(!args.contains(&"--end-of-options".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("--max-count")));
        assert!(!args.contains(&"--".to_string()));
    }

    #[test]
    fn test_history_with_filters() {
        let git = GitVcs::new();
        let query = HistoryQuery::new()
            .with_path("src/main.rs")
            .with_branch("develop")
            .with_offset(20)
            .with_limit(10);
        let args = args_of(&git.read_history(Path::new("/repo"), &query));

        assert_eq!(
            &args[args.len() - 6..],
            ["--skip=20", "--max-count=10", "--end-of-options", "develop", "--", "src/main.rs"]
        );
        assert!(!args.contains(&"--branches".to_string()));
    }

    #[test]
    fn test_dash_prefixed_revisions_follow_end_of_options() {
        let git = GitVcs::new();

        let query = HistoryQuery::new().with_branch("--output=/tmp/log.txt");
        let log_args = args_of(&git.read_history(Path::new("/repo"), &query));
        let pos = log_args.iter().position(|a| a == "--output=/tmp/log.txt").unwrap();
        assert_eq!(log_args[pos - 1], "--end-of-options");

        let show_args = args_of(&git.read_commit(Path::new("/repo"), "--output=/tmp/show.txt"));
        assert_eq!(
            &show_args[show_args.len() - 2..],
            ["--end-of-options", "--output=/tmp/show.txt"]
        );
    }

    #[test]
    fn test_from_config_uses_executable() {
        let config = VcsConfig::new().with_git_executable("/opt/git/bin/git");
        let git = GitVcs::from_config(&config);
        let stream = git.list_branches(Path::new("."));
        assert_eq!(stream.0.handle().program(), "/opt/git/bin/git");
    }
}
