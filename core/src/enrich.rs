//! ENRICH stages and the sub-builder that edits them.

use core::borrow::{Borrow, BorrowMut};
use core::fmt::{self, Display};

use compact_str::CompactString;
use esql_types::Command;

use crate::builder::Esql;
use crate::error::Result;
use crate::expressions::Expressions;
use crate::store::Fragment;

/// The `WITH` part of an ENRICH stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichFields {
    /// Field list written as given, e.g. `name` or `name = language_name`
    Raw(CompactString),
    /// `new_name = enrich_field` pairs
    Renamed(Expressions),
}

impl Display for EnrichFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichFields::Raw(text) => f.write_str(text),
            EnrichFields::Renamed(expressions) => expressions.fmt(f),
        }
    }
}

impl From<&str> for EnrichFields {
    fn from(text: &str) -> Self {
        Self::Raw(text.into())
    }
}

impl From<String> for EnrichFields {
    fn from(text: String) -> Self {
        Self::Raw(text.into())
    }
}

impl From<Expressions> for EnrichFields {
    fn from(expressions: Expressions) -> Self {
        Self::Renamed(expressions)
    }
}

impl<K: Display, V: Display, const N: usize> From<[(K, V); N]> for EnrichFields {
    fn from(pairs: [(K, V); N]) -> Self {
        Self::Renamed(Expressions::pairs(pairs))
    }
}

impl<K: Display, V: Display> From<Vec<(K, V)>> for EnrichFields {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::Renamed(Expressions::pairs(pairs))
    }
}

/// One ENRICH stage: `policy [ON match_field] [WITH fields]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichClause {
    pub(crate) policy: CompactString,
    pub(crate) match_field: Option<CompactString>,
    pub(crate) fields: Option<EnrichFields>,
}

impl EnrichClause {
    pub fn new(policy: impl AsRef<str>) -> Self {
        Self {
            policy: policy.as_ref().into(),
            match_field: None,
            fields: None,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &str {
        &self.policy
    }

    #[must_use]
    pub fn match_field(&self) -> Option<&str> {
        self.match_field.as_deref()
    }

    #[must_use]
    pub fn fields(&self) -> Option<&EnrichFields> {
        self.fields.as_ref()
    }
}

impl Display for EnrichClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.policy)?;
        if let Some(match_field) = &self.match_field {
            f.write_str(" ON ")?;
            f.write_str(match_field)?;
        }
        if let Some(fields) = &self.fields {
            f.write_str(" WITH ")?;
            write!(f, "{fields}")?;
        }
        Ok(())
    }
}

/// Sub-builder returned by [`Esql::enrich`] and [`Esql::enrich_mut`].
///
/// It owns (or mutably borrows) the builder it was created from and edits the
/// ENRICH stage it added there. [`Enrich::end`] hands the builder back so the
/// chain can continue with other commands:
///
/// ```
/// let query = esql_core::from("sample_data")
///     .enrich("languages_policy")
///     .on("a")
///     .with([("name", "language_name")])
///     .end()
///     .limit(10)
///     .query()
///     .unwrap();
///
/// assert_eq!(
///     query,
///     "FROM sample_data | ENRICH languages_policy ON a WITH name = language_name | LIMIT 10"
/// );
/// ```
#[derive(Debug)]
pub struct Enrich<B> {
    parent: B,
    index: usize,
}

impl<B: BorrowMut<Esql>> Enrich<B> {
    pub(crate) fn attach(mut parent: B, policy: impl AsRef<str>) -> Self {
        let index = parent
            .borrow_mut()
            .store
            .push_enrich(EnrichClause::new(policy));
        Self { parent, index }
    }

    /// Sets the match field used to look up records in the enrich index.
    pub fn on(mut self, match_field: impl AsRef<str>) -> Self {
        if let Some(clause) = self.clause_mut() {
            clause.match_field = Some(match_field.as_ref().into());
        }
        self
    }

    /// Sets the enrich fields added to the result.
    pub fn with(mut self, fields: impl Into<EnrichFields>) -> Self {
        if let Some(clause) = self.clause_mut() {
            clause.fields = Some(fields.into());
        }
        self
    }

    /// Returns the builder this stage belongs to.
    pub fn end(self) -> B {
        self.parent
    }

    /// Renders the whole query of the owning builder.
    pub fn query(&self) -> Result<String> {
        self.parent.borrow().query()
    }

    fn clause_mut(&mut self) -> Option<&mut EnrichClause> {
        self.parent.borrow_mut().store.enrich_mut(self.index)
    }
}

/// Writes this stage alone, without the ENRICH keyword.
impl<B: Borrow<Esql>> Display for Enrich<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(Fragment::Enrich(clauses)) = self.parent.borrow().store.get(Command::Enrich) {
            if let Some(clause) = clauses.get(self.index) {
                return clause.fmt(f);
            }
        }
        Ok(())
    }
}
