use chrono::DateTime;

use super::commit_format::{CommitField, CommitFormat};
use super::line_parser::LineParser;
use crate::domain::entities::commit::{epoch, Commit};
use crate::domain::entities::Contributor;

/// Assembles [`Commit`] records from fixed-size blocks of lines.
///
/// Each block holds one line per [`CommitField`]. Blank lines between
/// blocks are skipped; inside a block every line counts, since an empty
/// parents line is how a root commit looks. A block cut short by the end
/// of the stream is dropped.
#[derive(Debug, Clone)]
pub struct CommitBlockParser {
    date_layout: &'static str,
    fields: Vec<String>,
}

impl CommitBlockParser {
    pub fn new(format: CommitFormat) -> Self {
        Self {
            date_layout: format.date_layout,
            fields: Vec::with_capacity(CommitField::COUNT),
        }
    }

    /// Lines held for a block that is not complete yet.
    pub fn pending_lines(&self) -> usize {
        self.fields.len()
    }

    fn field(&self, field: CommitField) -> &str {
        &self.fields[field.index()]
    }

    fn assemble(&self) -> Commit {
        let parents = self
            .field(CommitField::Parents)
            .split_whitespace()
            .map(str::to_string)
            .collect();

        Commit::new(
            self.field(CommitField::Id).trim(),
            self.parse_date(self.field(CommitField::Date)),
            Contributor::new(
                self.field(CommitField::AuthorName),
                self.field(CommitField::AuthorEmail),
            ),
            self.field(CommitField::Subject),
            parents,
        )
    }

    /// Falls back to the Unix epoch; one bad date must not lose the record.
    fn parse_date(&self, value: &str) -> chrono::DateTime<chrono::FixedOffset> {
        let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
        match DateTime::parse_from_str(&normalized, self.date_layout) {
            Ok(date) => date,
            Err(e) => {
                tracing::trace!("unparsable commit date {:?}: {}", value, e);
                epoch()
            }
        }
    }
}

impl LineParser for CommitBlockParser {
    type Record = Commit;

    fn feed(&mut self, line: &str) -> Option<Commit> {
        if self.fields.is_empty() && line.trim().is_empty() {
            return None;
        }

        self.fields.push(line.to_string());
        if self.fields.len() < CommitField::COUNT {
            return None;
        }

        let commit = self.assemble();
        self.fields.clear();
        Some(commit)
    }
}
