use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use crate::common::error::VcsError;
use crate::common::result::VcsResult;
use crate::infrastructure::parsing::{LineParser, ParserConsumer, RawLineParser};
use crate::infrastructure::process::{ProcessHandle, ProcessRunner, StreamingExecutor};

use super::vcs_interface::RecordStream;

fn version_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+\.?(\d+)?\.(\d+)?").expect("version pattern is valid"))
}

/// Pull a `major.minor[.patch]` substring out of `--version` output.
pub fn extract_version(output: &str) -> Option<&str> {
    version_regex().find(output).map(|m| m.as_str())
}

/// Command line plumbing shared by the backends.
///
/// Prepends the backend's global flags to every invocation and binds
/// parsers to executors.
#[derive(Debug, Clone)]
pub struct ToolCli {
    runner: ProcessRunner,
    global_args: Vec<String>,
    channel_capacity: usize,
}

impl ToolCli {
    pub fn new(runner: ProcessRunner, channel_capacity: usize) -> Self {
        Self {
            runner,
            global_args: Vec::new(),
            channel_capacity: channel_capacity.max(1),
        }
    }

    pub fn with_global_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.global_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        self.runner.program()
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    /// Build a handle for `args` with the global flags in front.
    pub fn command(&self, dir: &Path, args: Vec<String>) -> ProcessHandle {
        let full_args = self.global_args.iter().cloned().chain(args);
        self.runner.build(dir, full_args)
    }

    /// Bind `parser` to a fresh channel and an executor for `args`.
    pub fn stream<P>(&self, dir: &Path, args: Vec<String>, parser: P) -> RecordStream<P::Record>
    where
        P: LineParser + 'static,
    {
        let (consumer, receiver) = ParserConsumer::channel(parser, self.channel_capacity);
        (StreamingExecutor::new(self.command(dir, args), consumer), receiver)
    }

    /// Run `args` to completion and return stdout, one `\n` per line.
    pub async fn capture(&self, dir: &Path, args: Vec<String>) -> VcsResult<String> {
        let (executor, mut receiver) = self.stream(dir, args, RawLineParser);

        let collect = async move {
            let mut output = String::new();
            while let Some(line) = receiver.recv().await {
                output.push_str(&line);
                output.push('\n');
            }
            output
        };
        let (result, output) = tokio::join!(executor.run(), collect);

        result.map(|_| output)
    }

    /// Run `<tool> --version` and extract the version number.
    pub async fn version(&self) -> VcsResult<String> {
        let output = self.capture(Path::new("."), vec!["--version".to_string()]).await?;
        extract_version(&output)
            .map(str::to_string)
            .ok_or_else(|| VcsError::version_not_found(output.trim()))
    }
}

/// Turn a list of string literals into owned arguments.
pub(crate) fn args<const N: usize>(items: [&str; N]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
