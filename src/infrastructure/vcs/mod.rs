//! Version control backends.
//!
//! Each backend supplies its own argument vectors and parsers and shares
//! the process machinery through [`tool_cli::ToolCli`].

pub mod git_vcs;
pub mod hg_vcs;
pub mod tool_cli;
pub mod vcs_factory;
pub mod vcs_interface;

pub use git_vcs::GitVcs;
pub use hg_vcs::MercurialVcs;
pub use tool_cli::{extract_version, ToolCli};
pub use vcs_factory::VcsFactory;
pub use vcs_interface::{check_marker, RecordStream, VcsBackend};
