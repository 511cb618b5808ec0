use serde::Serialize;
use std::fmt;

/// Author of a commit.
///
/// Either field may be empty; the VCS decides what it records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Contributor {
    name: String,
    email: String,
}

impl Contributor {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// `name <email>` when an email is known, otherwise just the name.
///
/// The name is not trimmed, so an anonymous author with an email renders
/// with a leading space.
impl fmt::Display for Contributor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}
