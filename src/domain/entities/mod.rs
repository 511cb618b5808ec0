pub mod branch;
pub mod commit;
pub mod contributor;
pub mod repository;

pub use branch::Branch;
pub use commit::Commit;
pub use contributor::Contributor;
pub use repository::RepositoryLocation;
