use colored::Colorize;
use serde::Serialize;

use crate::domain::entities::{Branch, Commit};

/// Number of hash characters shown in text output.
const SHORT_ID_LEN: usize = 12;

/// Date layout used for commit lines.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// `* master  747ad571b84b` with the current branch highlighted.
pub fn format_branch(branch: &Branch) -> String {
    let marker = if branch.is_current() { "*" } else { " " };
    let name = if branch.is_current() {
        branch.id().green().bold().to_string()
    } else {
        branch.id().to_string()
    };
    format!("{} {} {}", marker, name, short_id(branch.head()).yellow())
}

/// One line per commit: short id, date, author and subject.
pub fn format_commit_line(commit: &Commit) -> String {
    format!(
        "{} {} {} {}",
        short_id(commit.id()).yellow(),
        commit.date().format(DATE_FORMAT).to_string().dimmed(),
        commit.author().name().cyan(),
        commit.message()
    )
}

/// Multi-line description of a single commit.
pub fn format_commit_details(commit: &Commit) -> String {
    let mut lines = vec![format!("{} {}", "commit".yellow(), commit.id().yellow())];

    match commit.parents() {
        [] => lines.push("Parents: (root)".to_string()),
        parents => lines.push(format!("Parents: {}", parents.join(" "))),
    }
    if commit.is_merge() {
        lines.push(format!("{}", "Merge commit".magenta()));
    }
    lines.push(format!("Author:  {}", commit.author()));
    lines.push(format!("Date:    {}", commit.date().format(DATE_FORMAT)));
    lines.push(String::new());
    lines.push(format!("    {}", commit.message()));

    lines.join("\n")
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Contributor;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn sample_commit(parents: &[&str]) -> Commit {
        Commit::new(
            "747ad571b84b4a2a8d8d1b3c6a5d7f1e3a0b9c2d",
            DateTime::parse_from_rfc3339("2016-10-04T22:07:27+03:00").unwrap(),
            Contributor::new("Max Kalyabin", "maksim@kalyabin.ru"),
            "Fixed tests",
            parents.iter().map(|p| p.to_string()).collect(),
        )
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("747ad571b84b4a2a8d8d"), "747ad571b84b");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_format_branch() {
        colored::control::set_override(false);
        let current = Branch::new("master", "747ad571b84b4a2a8d8d", true);
        assert_eq!(format_branch(&current), "* master 747ad571b84b");

        let remote = Branch::new("remotes/origin/feature", "81cb0276", false);
        assert_eq!(format_branch(&remote), "  remotes/origin/feature 81cb0276");
    }

    #[test]
    fn test_format_commit_line() {
        colored::control::set_override(false);
        assert_eq!(
            format_commit_line(&sample_commit(&["81cb0276"])),
            "747ad571b84b 2016-10-04 22:07:27 +0300 Max Kalyabin Fixed tests"
        );
    }

    #[test]
    fn test_format_commit_details() {
        colored::control::set_override(false);
        let details = format_commit_details(&sample_commit(&[]));
        assert!(details.contains("Parents: (root)"));
        assert!(details.contains("Author:  Max Kalyabin <maksim@kalyabin.ru>"));
        assert!(!details.contains("Merge commit"));

        let merge = format_commit_details(&sample_commit(&["a1", "b2"]));
        assert!(merge.contains("Parents: a1 b2"));
        assert!(merge.contains("Merge commit"));
    }

    #[test]
    fn test_commit_json_fields() {
        let json = to_json(&sample_commit(&["81cb0276"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], "747ad571b84b4a2a8d8d1b3c6a5d7f1e3a0b9c2d");
        assert_eq!(value["author"]["email"], "maksim@kalyabin.ru");
        assert_eq!(value["parents"][0], "81cb0276");
        assert_eq!(value["date"], "2016-10-04T22:07:27+03:00");
    }
}
