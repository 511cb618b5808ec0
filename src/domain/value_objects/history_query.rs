/// Filters and pagination for a history listing.
///
/// Empty filters mean "everything": the whole repository for
/// `path_filter`, every branch for `branch_filter`. A `limit` of zero means
/// no upper bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub path_filter: String,
    pub branch_filter: String,
    pub offset: usize,
    pub limit: usize,
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path_filter = path.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch_filter = branch.into();
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn path(&self) -> Option<&str> {
        Some(self.path_filter.as_str()).filter(|p| !p.is_empty())
    }

    pub fn branch(&self) -> Option<&str> {
        Some(self.branch_filter.as_str()).filter(|b| !b.is_empty())
    }

    pub fn limit(&self) -> Option<usize> {
        Some(self.limit).filter(|l| *l > 0)
    }
}
