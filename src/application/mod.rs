//! Application layer: queries composed from a backend and a repository path.

pub mod services;
