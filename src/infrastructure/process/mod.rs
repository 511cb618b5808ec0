//! Subprocess launching and output streaming.

pub mod process_runner;
pub mod streaming_executor;

pub use process_runner::{DebugSink, ProcessHandle, ProcessRunner};
pub use streaming_executor::{feed_lines, LineConsumer, StreamingExecutor};
