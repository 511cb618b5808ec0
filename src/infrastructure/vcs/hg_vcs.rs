use async_trait::async_trait;
use std::path::Path;

use super::tool_cli::{args, ToolCli};
use super::vcs_interface::{RecordStream, VcsBackend};
use crate::common::config::{VcsConfig, DEFAULT_CHANNEL_CAPACITY};
use crate::common::result::VcsResult;
use crate::domain::entities::{Branch, Commit};
use crate::domain::value_objects::{HistoryQuery, VcsType};
use crate::infrastructure::parsing::{BranchLineParser, CommitBlockParser, HG_COMMIT_FORMAT};
use crate::infrastructure::process::ProcessRunner;

/// Renders `hg branches` in the line shape [`BranchLineParser`] expects.
const HG_BRANCH_TEMPLATE: &str = "{if(current, '*', ' ')} {branch} {node} {rev}\\n";

/// Upper bound handed to `limit()` when the query has none.
const HG_UNLIMITED: usize = i32::MAX as usize;

/// Mercurial implementation of the read-only queries.
///
/// Runs with `HGPLAIN=1` so user configuration (pager, aliases,
/// localisation) cannot change the output format.
#[derive(Debug, Clone)]
pub struct MercurialVcs {
    cli: ToolCli,
}

impl Default for MercurialVcs {
    fn default() -> Self {
        Self::with_executable(VcsType::Mercurial.executable_name())
    }
}

impl MercurialVcs {
    /// Create a new Mercurial backend using `hg` from `PATH`
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new Mercurial backend with custom executable path
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self::with_runner(ProcessRunner::new(executable), DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn from_config(config: &VcsConfig) -> Self {
        let runner = ProcessRunner::new(&config.hg_executable)
            .with_debug_sink(config.debug_sink.clone());
        Self::with_runner(runner, config.channel_capacity)
    }

    fn with_runner(runner: ProcessRunner, channel_capacity: usize) -> Self {
        let runner = runner.with_env("HGPLAIN", "1");
        Self {
            cli: ToolCli::new(runner, channel_capacity).with_global_args(["--noninteractive"]),
        }
    }

    fn template_args(revset: String) -> Vec<String> {
        let mut log_args = args(["log", "-r"]);
        log_args.push(revset);
        log_args.push("--template".to_string());
        log_args.push(HG_COMMIT_FORMAT.template.to_string());
        log_args
    }

    /// Revset resolving `commit_id` as a single symbol (hash, rev number,
    /// tag or bookmark), never as a revset expression.
    fn commit_revset(commit_id: &str) -> String {
        format!("limit({}, 1)", revset_string(commit_id))
    }

    /// Revset selecting one page of history, newest first.
    fn history_revset(query: &HistoryQuery) -> String {
        let mut set = match query.branch() {
            Some(branch) => format!("branch({})", revset_string(branch)),
            None => "all()".to_string(),
        };

        if let Some(path) = query.path() {
            set = format!("{} and file({})", set, revset_string(&format!("path:{}", path)));
        }

        format!(
            "limit(reverse({}), {}, {})",
            set,
            query.limit().unwrap_or(HG_UNLIMITED),
            query.offset
        )
    }
}

/// Quote `value` as a revset string literal.
fn revset_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[async_trait]
impl VcsBackend for MercurialVcs {
    fn vcs_type(&self) -> VcsType {
        VcsType::Mercurial
    }

    async fn version(&self) -> VcsResult<String> {
        self.cli.version().await
    }

    fn repository_marker_name(&self) -> &'static str {
        ".hg"
    }

    async fn repository_status(&self, project_path: &Path) -> VcsResult<String> {
        self.cli.capture(project_path, args(["status"])).await
    }

    fn list_branches(&self, project_path: &Path) -> RecordStream<Branch> {
        self.cli.stream(
            project_path,
            args(["branches", "--template", HG_BRANCH_TEMPLATE]),
            BranchLineParser::new(),
        )
    }

    fn read_commit(&self, project_path: &Path, commit_id: &str) -> RecordStream<Commit> {
        self.cli.stream(
            project_path,
            Self::template_args(Self::commit_revset(commit_id)),
            CommitBlockParser::new(HG_COMMIT_FORMAT),
        )
    }

    fn read_history(&self, project_path: &Path, query: &HistoryQuery) -> RecordStream<Commit> {
        self.cli.stream(
            project_path,
            Self::template_args(Self::history_revset(query)),
            CommitBlockParser::new(HG_COMMIT_FORMAT),
        )
    }
}
