//! # vcsview - Read-only version control queries
//!
//! `vcsview` answers questions about a Git or Mercurial working copy by
//! running the installed command line tool and parsing what it prints.
//! Records are streamed over channels while the tool is still running, so
//! long histories never have to be buffered as a whole.
//!
//! ## Features
//!
//! - **Branches**: List local and remote branches, with the current one marked
//! - **Commits**: Look up a single commit or page through history
//! - **Filtering**: Restrict history to a branch or a path
//! - **Backend detection**: Pick Git or Mercurial from the repository markers
//! - **Cancellation**: Abort a running query and kill the child process
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: Branch, commit and contributor records
//! - [`application`]: Queries that drain streams into results
//! - [`infrastructure`]: Process execution, output parsing and VCS backends
//! - [`presentation`]: CLI interface
//! - [`common`]: Shared configuration and error handling
//!
//! ## Error Handling
//!
//! - [`common::error::VcsError`]: Launch, execution and path failures
//! - [`common::result::VcsResult`]: Type alias for `Result<T, VcsError>`
//!
//! ## Examples
//!
//! ### Paging through history
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vcsview::application::services::RepositoryQueryService;
//! use vcsview::common::VcsConfig;
//! use vcsview::domain::value_objects::HistoryQuery;
//! use vcsview::infrastructure::vcs::VcsFactory;
//!
//! # async fn example() -> vcsview::Result<()> {
//! let config = VcsConfig::from_env();
//! let backend = VcsFactory::for_path(Path::new("."), &config)?;
//! let service = RepositoryQueryService::open(".", backend)?;
//!
//! let query = HistoryQuery::new().with_branch("master").with_limit(20);
//! let outcome = service.history(&query).await;
//! for commit in &outcome.records {
//!     println!("{} {}", commit.id(), commit.message());
//! }
//! if let Some(error) = outcome.error {
//!     eprintln!("history incomplete: {}", error);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Streaming records directly
//!
//! ```rust,no_run
//! use std::path::Path;
//! use vcsview::infrastructure::vcs::{GitVcs, VcsBackend};
//!
//! # async fn example() -> vcsview::Result<()> {
//! let git = GitVcs::new();
//! let (executor, mut branches) = git.list_branches(Path::new("."));
//!
//! let run = tokio::spawn(executor.run());
//! while let Some(branch) = branches.recv().await {
//!     println!("{}{}", if branch.is_current() { "* " } else { "  " }, branch.id());
//! }
//! run.await.expect("executor task panicked")?;
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::VcsError;
pub use crate::common::result::VcsResult as Result;
