use regex::Regex;
use std::sync::OnceLock;

use super::line_parser::LineParser;
use crate::domain::entities::Branch;

/// `[*] <id> <head-hex> <free text>`, the shape of `git branch -a -v`.
const BRANCH_LINE_PATTERN: &str =
    r"^\*?\s+(?P<id>\S+)\s+(?P<head>[a-fA-F0-9]+)\s+(?P<message>.*)$";

fn branch_line_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(BRANCH_LINE_PATTERN).expect("branch line pattern is valid"))
}

/// Turns branch listing lines into [`Branch`] records.
///
/// Lines that do not look like a branch (headers, `HEAD -> origin/master`
/// aliases, detached heads) are skipped. Duplicates are passed through.
#[derive(Debug, Default, Clone)]
pub struct BranchLineParser;

impl BranchLineParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_line(line: &str) -> Option<Branch> {
        let captures = branch_line_regex().captures(line)?;
        Some(Branch::new(
            &captures["id"],
            &captures["head"],
            line.starts_with('*'),
        ))
    }
}

impl LineParser for BranchLineParser {
    type Record = Branch;

    fn feed(&mut self, line: &str) -> Option<Branch> {
        Self::parse_line(line)
    }
}
