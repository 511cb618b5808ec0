use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use super::contributor::Contributor;

/// A single commit.
///
/// Parents are referenced by identifier only; no commit graph is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// Full hash for git, changeset node for mercurial
    id: String,

    /// Author date in the author's own offset
    date: DateTime<FixedOffset>,

    author: Contributor,

    /// First line of the commit message
    message: String,

    /// Empty for a root commit, two or more for a merge
    parents: Vec<String>,
}

impl Commit {
    pub fn new(
        id: impl Into<String>,
        date: DateTime<FixedOffset>,
        author: Contributor,
        message: impl Into<String>,
        parents: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            author,
            message: message.into(),
            parents,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    pub fn author(&self) -> &Contributor {
        &self.author
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Timestamp used when a date field cannot be parsed.
pub fn epoch() -> DateTime<FixedOffset> {
    DateTime::<Utc>::UNIX_EPOCH.fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(parents: Vec<String>) -> Commit {
        let date = FixedOffset::east_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2016, 10, 4, 22, 7, 27)
            .unwrap();
        Commit::new(
            "747ad5712f0ddbb482ebb6e07eb779e70b94687f",
            date,
            Contributor::new("Max Kalyabin", "maksim@kalyabin.ru"),
            "random commit for random file",
            parents,
        )
    }

    #[test]
    fn test_commit_accessors() {
        let commit = sample(vec!["81cb0276737ca3345faaaec5a5df2a3e1ff5d775".into()]);
        assert_eq!(commit.id(), "747ad5712f0ddbb482ebb6e07eb779e70b94687f");
        assert_eq!(commit.author().to_string(), "Max Kalyabin <maksim@kalyabin.ru>");
        assert_eq!(commit.message(), "random commit for random file");
        assert_eq!(commit.parents().len(), 1);
        assert_eq!(commit.date().offset().local_minus_utc(), 3 * 3600);
        assert!(!commit.is_merge());
        assert!(!commit.is_root());
    }

    #[test]
    fn test_root_and_merge() {
        assert!(sample(Vec::new()).is_root());
        assert!(sample(vec!["a".into(), "b".into()]).is_merge());
    }

    #[test]
    fn test_epoch() {
        assert_eq!(epoch().timestamp(), 0);
    }
}
