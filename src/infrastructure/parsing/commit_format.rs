//! The wire contract between backends and [`CommitBlockParser`].
//!
//! A backend prints each commit as one line per [`CommitField`], in the
//! order of [`CommitField::ORDER`], followed by a blank separator line. Any
//! new field goes into the enum and into every template below together.
//!
//! [`CommitBlockParser`]: super::commit_parser::CommitBlockParser

/// One line of a serialized commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitField {
    Id,
    /// Space separated parent ids, empty for a root commit
    Parents,
    AuthorName,
    AuthorEmail,
    Date,
    /// First line of the message
    Subject,
}

impl CommitField {
    pub const ORDER: [CommitField; 6] = [
        CommitField::Id,
        CommitField::Parents,
        CommitField::AuthorName,
        CommitField::AuthorEmail,
        CommitField::Date,
        CommitField::Subject,
    ];

    /// Number of lines in one block.
    pub const COUNT: usize = Self::ORDER.len();

    pub fn index(self) -> usize {
        self as usize
    }
}

/// How a backend asks its tool to print commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitFormat {
    /// Tool-native template producing the fields in order
    pub template: &'static str,
    /// `chrono` layout of the date field
    pub date_layout: &'static str,
}

/// `Mon Jan 2 15:04:05 2006 -0700`, as printed by `git --date=default`
/// and by mercurial's `date` filter.
pub const CLASSIC_DATE_LAYOUT: &str = "%a %b %d %H:%M:%S %Y %z";

pub const GIT_COMMIT_FORMAT: CommitFormat = CommitFormat {
    template: "%H%n%P%n%an%n%ae%n%ad%n%s%n",
    date_layout: CLASSIC_DATE_LAYOUT,
};

/// Mercurial's `parents` keyword hides a single parent that directly
/// precedes the changeset, so both parents are spelled out. The null
/// revision renders as nothing.
pub const HG_COMMIT_FORMAT: CommitFormat = CommitFormat {
    template: "{node}\\n{ifeq(p1rev, '-1', '', p1node)} {ifeq(p2rev, '-1', '', p2node)}\\n{author|person}\\n{author|email}\\n{date|date}\\n{desc|firstline}\\n\\n",
    date_layout: CLASSIC_DATE_LAYOUT,
};
