pub mod history_query;
pub mod vcs_type;

pub use history_query::HistoryQuery;
pub use vcs_type::{VcsType, VcsTypeError};
