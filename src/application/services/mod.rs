pub mod repository_query_service;

pub use repository_query_service::{drain, visit, QueryOutcome, RepositoryQueryService};
