use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::infrastructure::process::LineConsumer;

/// Folds raw output lines into records, one record at a time.
///
/// A parser keeps whatever state it needs between lines and returns a
/// record as soon as the last line belonging to it has been fed.
pub trait LineParser: Send {
    type Record: Send + 'static;

    fn feed(&mut self, line: &str) -> Option<Self::Record>;
}

/// Passes every line through unchanged.
#[derive(Debug, Default, Clone)]
pub struct RawLineParser;

impl LineParser for RawLineParser {
    type Record = String;

    fn feed(&mut self, line: &str) -> Option<String> {
        Some(line.to_string())
    }
}

/// Binds a [`LineParser`] to the sending half of a bounded channel.
///
/// The channel closes when stdout is exhausted. If the receiver goes away
/// early, parsing continues and records are discarded so the process is
/// never left blocked on a full pipe.
pub struct ParserConsumer<P: LineParser> {
    parser: P,
    sender: Option<mpsc::Sender<P::Record>>,
}

impl<P: LineParser> ParserConsumer<P> {
    pub fn new(parser: P, sender: mpsc::Sender<P::Record>) -> Self {
        Self {
            parser,
            sender: Some(sender),
        }
    }

    /// Create a consumer together with the receiver its records arrive on.
    pub fn channel(parser: P, capacity: usize) -> (Self, mpsc::Receiver<P::Record>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(parser, tx), rx)
    }
}

#[async_trait]
impl<P> LineConsumer for ParserConsumer<P>
where
    P: LineParser + 'static,
{
    async fn consume_line(&mut self, line: String) {
        let Some(record) = self.parser.feed(&line) else {
            return;
        };
        if let Some(sender) = &self.sender {
            if sender.send(record).await.is_err() {
                tracing::debug!("record receiver dropped, discarding remaining output");
                self.sender = None;
            }
        }
    }

    async fn finish(&mut self) {
        self.sender = None;
    }
}
