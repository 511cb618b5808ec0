use async_trait::async_trait;
use std::fmt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use super::process_runner::ProcessHandle;
use crate::common::error::VcsError;
use crate::common::result::VcsResult;

/// How much of stderr is kept for error reports.
const STDERR_TAIL_BYTES: usize = 4096;

/// Receives the stdout of one process, one line at a time.
#[async_trait]
pub trait LineConsumer: Send {
    /// Called for each line in stdout order, without its line terminator.
    async fn consume_line(&mut self, line: String);

    /// Called once after the last line, when stdout reached EOF.
    async fn finish(&mut self) {}
}

/// Feed every line of `reader` to `consumer`, then call `finish`.
///
/// Invalid UTF-8 is replaced rather than rejected, and a trailing `\r` is
/// stripped. A read error ends the stream early; the consumer is still
/// finished so its output channel closes.
pub async fn feed_lines<R, C>(mut reader: R, consumer: &mut C)
where
    R: AsyncBufRead + Unpin,
    C: LineConsumer + ?Sized,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                consumer
                    .consume_line(String::from_utf8_lossy(&buf).into_owned())
                    .await;
            }
            Err(e) => {
                tracing::warn!("stopped reading command output: {}", e);
                break;
            }
        }
    }
    consumer.finish().await;
}

/// Runs one process to completion while a concurrent task streams its
/// stdout through a [`LineConsumer`].
pub struct StreamingExecutor {
    handle: ProcessHandle,
    consumer: Box<dyn LineConsumer>,
    cancel: CancellationToken,
}

impl fmt::Debug for StreamingExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingExecutor")
            .field("handle", &self.handle)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

impl StreamingExecutor {
    pub fn new(handle: ProcessHandle, consumer: impl LineConsumer + 'static) -> Self {
        Self {
            handle,
            consumer: Box::new(consumer),
            cancel: CancellationToken::new(),
        }
    }

    pub fn handle(&self) -> &ProcessHandle {
        &self.handle
    }

    pub fn command_line(&self) -> String {
        self.handle.command_line()
    }

    /// Token raised once the process has exited, whatever the outcome.
    ///
    /// Cancelling it before that kills the process; the run then reports
    /// a failed execution.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Start the process and stream its output to the consumer.
    ///
    /// Returns once the process has exited and the consumer has seen the
    /// end of stdout. The consumer is dropped before this returns, so it is
    /// never called afterwards. Records the consumer produced before a
    /// failure are not retracted.
    pub async fn run(self) -> VcsResult<()> {
        let Self {
            handle,
            mut consumer,
            cancel,
        } = self;
        let command = handle.command_line();

        let mut child = match handle.spawn() {
            Ok(child) => child,
            Err(e) => {
                handle.log(&format!("Command {} finished with non-zero status code", command));
                consumer.finish().await;
                drop(consumer);
                cancel.cancel();
                return Err(e);
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let reader = tokio::spawn(async move {
            if let Some(stdout) = stdout {
                feed_lines(BufReader::new(stdout), consumer.as_mut()).await;
            } else {
                consumer.finish().await;
            }
        });
        let stderr_tail = tokio::spawn(async move {
            match stderr {
                Some(stderr) => read_tail(stderr, STDERR_TAIL_BYTES).await,
                None => String::new(),
            }
        });

        let exited = tokio::select! {
            status = child.wait() => Some(status),
            _ = cancel.cancelled() => None,
        };
        let status = match exited {
            Some(status) => status,
            None => {
                handle.log(&format!("Command {} cancelled, killing process", command));
                if let Err(e) = child.start_kill() {
                    tracing::warn!("failed to kill `{}`: {}", command, e);
                }
                child.wait().await
            }
        };
        cancel.cancel();

        if let Err(e) = reader.await {
            if e.is_panic() {
                std::panic::resume_unwind(e.into_panic());
            }
        }
        let stderr = stderr_tail.await.unwrap_or_default();

        let status = status?;
        if status.success() {
            return Ok(());
        }

        match status.code() {
            Some(code) => handle.log(&format!("Command {} finished with {} status code", command, code)),
            None => handle.log(&format!("Command {} finished with non-zero status code", command)),
        }
        Err(VcsError::execution(command, status.code(), stderr))
    }
}

/// Read a stream to EOF keeping only its last `limit` bytes.
async fn read_tail<R: AsyncRead + Unpin>(mut reader: R, limit: usize) -> String {
    let mut tail: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                tail.extend_from_slice(&chunk[..n]);
                if tail.len() > limit {
                    let excess = tail.len() - limit;
                    tail.drain(..excess);
                }
            }
            Err(_) => break,
        }
    }
    String::from_utf8_lossy(&tail).into_owned()
}
