//! Incremental parsers turning tool output lines into records.

pub mod branch_parser;
pub mod commit_format;
pub mod commit_parser;
pub mod line_parser;

pub use branch_parser::BranchLineParser;
pub use commit_format::{CommitField, CommitFormat, GIT_COMMIT_FORMAT, HG_COMMIT_FORMAT};
pub use commit_parser::CommitBlockParser;
pub use line_parser::{LineParser, ParserConsumer, RawLineParser};
