/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Process execution (spawning, line streaming, cancellation)
/// - Output parsing (branch lines, commit blocks)
/// - VCS backends (Git, Mercurial) and backend detection
pub mod parsing;
pub mod process;
pub mod vcs;

// Re-export commonly used types
pub use parsing::{BranchLineParser, CommitBlockParser, LineParser};
pub use process::{DebugSink, ProcessRunner, StreamingExecutor};
pub use vcs::{GitVcs, MercurialVcs, RecordStream, VcsBackend, VcsFactory};
