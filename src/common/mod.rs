//! Shared error, result and configuration types.

pub mod config;
pub mod error;
pub mod result;

pub use config::VcsConfig;
pub use error::VcsError;
pub use result::VcsResult;
