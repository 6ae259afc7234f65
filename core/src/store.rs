//! Ordered clause storage and pipeline rendering.
//!
//! A [`ClauseStore`] keeps one slot per [`Command`], in the order each command
//! was first introduced. Setting a command again replaces its slot in place, so
//! a later overwrite never moves a clause. METADATA and custom fragments are kept
//! in side lists: metadata decorates the FROM stage, custom text is appended after
//! the last stage.

use core::fmt::{self, Write};

use compact_str::CompactString;
use esql_types::Command;
use smallvec::SmallVec;

use crate::enrich::EnrichClause;
use crate::error::{EsqlError, Result};
use crate::esql_trace_query;
use crate::expressions::write_joined;

/// The rendered value of one clause slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Single stage; an empty text renders the bare keyword
    Text(CompactString),
    /// One stage per entry, each prefixed with the keyword
    Repeated(SmallVec<[CompactString; 2]>),
    /// ENRICH stages, still editable through their sub-builder. They share a
    /// single keyword and are joined with `| `.
    Enrich(SmallVec<[EnrichClause; 1]>),
}

impl Fragment {
    /// Number of pipeline stages this fragment renders to.
    #[must_use]
    pub fn stages(&self) -> usize {
        match self {
            Fragment::Text(_) => 1,
            Fragment::Repeated(items) => items.len(),
            Fragment::Enrich(clauses) => clauses.len(),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Fragment::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseStore {
    entries: SmallVec<[(Command, Fragment); 8]>,
    metadata: SmallVec<[CompactString; 2]>,
    custom: SmallVec<[CompactString; 2]>,
}

impl ClauseStore {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: SmallVec::new_const(),
            metadata: SmallVec::new_const(),
            custom: SmallVec::new_const(),
        }
    }

    // ==================== lookups ====================

    #[must_use]
    pub fn get(&self, command: Command) -> Option<&Fragment> {
        self.entries
            .iter()
            .find(|(kind, _)| *kind == command)
            .map(|(_, fragment)| fragment)
    }

    fn get_mut(&mut self, command: Command) -> Option<&mut Fragment> {
        self.entries
            .iter_mut()
            .find(|(kind, _)| *kind == command)
            .map(|(_, fragment)| fragment)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, command: Command) -> bool {
        self.get(command).is_some()
    }

    /// The text of a single-stage clause.
    #[must_use]
    pub fn text(&self, command: Command) -> Option<&str> {
        self.get(command).and_then(Fragment::as_text)
    }

    pub(crate) fn text_mut(&mut self, command: Command) -> Option<&mut CompactString> {
        match self.get_mut(command)? {
            Fragment::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Commands in rendering order.
    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.entries.iter().map(|(command, _)| *command)
    }

    #[must_use]
    pub fn has_source(&self) -> bool {
        self.commands().any(|command| command.is_source())
    }

    #[must_use]
    pub fn metadata(&self) -> &[CompactString] {
        &self.metadata
    }

    #[must_use]
    pub fn custom(&self) -> &[CompactString] {
        &self.custom
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.custom.is_empty()
    }

    // ==================== mutation ====================

    /// Sets a single-stage clause, replacing any previous value in its original position.
    pub fn set_text(&mut self, command: Command, text: impl Into<CompactString>) {
        self.set_fragment(command, Fragment::Text(text.into()));
    }

    /// Appends to an existing single-stage clause with `separator`, or sets it.
    pub fn append_text(&mut self, command: Command, text: &str, separator: &str) {
        match self.text_mut(command) {
            Some(existing) => {
                existing.push_str(separator);
                existing.push_str(text);
            }
            None => self.set_text(command, text),
        }
    }

    /// Adds one more stage to a repeatable clause.
    pub fn push_repeated(&mut self, command: Command, item: impl Into<CompactString>) {
        let item = item.into();
        match self.get_mut(command) {
            Some(Fragment::Repeated(items)) => items.push(item),
            _ => self.set_fragment(command, Fragment::Repeated(smallvec::smallvec![item])),
        }
    }

    /// Adds an ENRICH stage and returns its position among the ENRICH stages.
    pub(crate) fn push_enrich(&mut self, clause: EnrichClause) -> usize {
        match self.get_mut(Command::Enrich) {
            Some(Fragment::Enrich(clauses)) => {
                clauses.push(clause);
                clauses.len() - 1
            }
            _ => {
                self.set_fragment(Command::Enrich, Fragment::Enrich(smallvec::smallvec![clause]));
                0
            }
        }
    }

    pub(crate) fn enrich_mut(&mut self, index: usize) -> Option<&mut EnrichClause> {
        match self.get_mut(Command::Enrich)? {
            Fragment::Enrich(clauses) => clauses.get_mut(index),
            _ => None,
        }
    }

    pub(crate) fn push_metadata(&mut self, fields: impl Into<CompactString>) {
        self.metadata.push(fields.into());
    }

    pub(crate) fn push_custom(&mut self, fragment: impl Into<CompactString>) {
        self.custom.push(fragment.into());
    }

    fn set_fragment(&mut self, command: Command, fragment: Fragment) {
        match self.get_mut(command) {
            Some(slot) => *slot = fragment,
            None => self.entries.push((command, fragment)),
        }
    }

    // ==================== rendering ====================

    /// Renders the full query.
    ///
    /// Fails with [`EsqlError::MissingSource`] unless a FROM, ROW, SHOW or TS
    /// clause is present.
    pub fn render(&self) -> Result<String> {
        if !self.has_source() {
            return Err(EsqlError::MissingSource);
        }
        let query = self.render_pipeline();
        esql_trace_query!(&query, self.stages());
        Ok(query)
    }

    /// Renders the stages without requiring a source, as FORK branches do.
    #[must_use]
    pub fn render_pipeline(&self) -> String {
        let mut buf = String::with_capacity(self.entries.len() * 24);
        let _ = self.write_pipeline(&mut buf);
        buf
    }

    /// Total number of pipeline stages, custom fragments excluded.
    #[must_use]
    pub fn stages(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, fragment)| fragment.stages())
            .sum()
    }

    fn write_pipeline(&self, buf: &mut impl Write) -> fmt::Result {
        for (i, (command, fragment)) in self.entries.iter().enumerate() {
            if i > 0 {
                buf.write_str(" | ")?;
            }
            self.write_entry(buf, *command, fragment)?;
        }
        if !self.custom.is_empty() {
            buf.write_char(' ')?;
            write_joined(buf, &self.custom, " ")?;
        }
        Ok(())
    }

    fn write_entry(&self, buf: &mut impl Write, command: Command, fragment: &Fragment) -> fmt::Result {
        match fragment {
            Fragment::Text(text) => {
                buf.write_str(command.keyword())?;
                if !text.is_empty() {
                    buf.write_char(' ')?;
                    buf.write_str(text)?;
                }
                if command == Command::From && !self.metadata.is_empty() {
                    buf.write_char(' ')?;
                    buf.write_str(Command::Metadata.keyword())?;
                    buf.write_char(' ')?;
                    write_joined(buf, &self.metadata, ", ")?;
                }
                Ok(())
            }
            Fragment::Repeated(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        buf.write_str(" | ")?;
                    }
                    write!(buf, "{} {}", command.keyword(), item)?;
                }
                Ok(())
            }
            // One keyword for every stage, joined by `| `
            Fragment::Enrich(clauses) => {
                buf.write_str(command.keyword())?;
                buf.write_char(' ')?;
                write_joined(buf, clauses, "| ")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from(index: &str) -> ClauseStore {
        let mut store = ClauseStore::new();
        store.set_text(Command::From, index);
        store
    }

    #[test]
    fn test_render_requires_source() {
        let mut store = ClauseStore::new();
        store.set_text(Command::Where, "a > 1");
        assert_eq!(store.render(), Err(EsqlError::MissingSource));
        assert_eq!(store.render_pipeline(), "WHERE a > 1");
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut store = from("sample_data");
        store.set_text(Command::Limit, "2");
        store.set_text(Command::Where, "a > 1");
        store.set_text(Command::Limit, "10");
        assert_eq!(
            store.render().unwrap(),
            "FROM sample_data | LIMIT 10 | WHERE a > 1"
        );
        assert_eq!(
            store.commands().collect::<Vec<_>>(),
            [Command::From, Command::Limit, Command::Where]
        );
    }

    #[test]
    fn test_append_text() {
        let mut store = from("sample_data");
        store.append_text(Command::Where, "a", " AND ");
        store.append_text(Command::Where, "b", " AND ");
        assert_eq!(store.text(Command::Where), Some("a AND b"));
    }

    #[test]
    fn test_empty_text_renders_keyword() {
        let mut store = from("books");
        store.set_text(Command::Fuse, "");
        assert_eq!(store.render().unwrap(), "FROM books | FUSE");
    }

    #[test]
    fn test_metadata_decorates_from() {
        let mut store = from("sample_data");
        store.set_text(Command::Limit, "1");
        store.push_metadata("_index, _id");
        store.push_metadata("_source");
        assert_eq!(
            store.render().unwrap(),
            "FROM sample_data METADATA _index, _id, _source | LIMIT 1"
        );
    }

    #[test]
    fn test_repeated_and_custom() {
        let mut store = from("sample_data");
        store.push_repeated(Command::LookupJoin, "threat_list ON field_name");
        store.set_text(Command::Limit, "3");
        store.push_repeated(Command::LookupJoin, "host_inventory ON host.name");
        store.push_custom("| MY_VALUE = 1");
        store.push_custom("| OTHER");
        assert_eq!(store.stages(), 4);
        assert_eq!(
            store.render().unwrap(),
            "FROM sample_data | LOOKUP JOIN threat_list ON field_name \
             | LOOKUP JOIN host_inventory ON host.name | LIMIT 3 | MY_VALUE = 1 | OTHER"
        );
    }

    #[test]
    fn test_enrich_stages_share_keyword() {
        let mut store = from("sample_data");
        store.push_enrich(EnrichClause::new("first"));
        store.set_text(Command::Limit, "5");
        store.push_enrich(EnrichClause::new("second"));
        assert_eq!(store.stages(), 3);
        assert_eq!(
            store.render().unwrap(),
            "FROM sample_data | ENRICH first| second | LIMIT 5"
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let base = from("sample_data");
        let mut copy = base.clone();
        copy.push_custom("| X");
        copy.set_text(Command::Limit, "1");
        assert_eq!(base.render().unwrap(), "FROM sample_data");
        assert_ne!(base, copy);
    }
}
