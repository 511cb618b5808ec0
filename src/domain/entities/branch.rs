use serde::Serialize;

/// A branch as listed by the VCS.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Branch {
    /// Branch identifier, e.g. `master` or `remotes/origin/feature`
    id: String,

    /// Revision the branch head points at
    head: String,

    /// Whether the working copy is on this branch
    is_current: bool,
}

impl Branch {
    pub fn new(id: impl Into<String>, head: impl Into<String>, is_current: bool) -> Self {
        Self {
            id: id.into(),
            head: head.into(),
            is_current,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn head(&self) -> &str {
        &self.head
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }
}
