//! The [`Esql`] query builder.
//!
//! Every operation comes in two flavors. `op_mut` edits the builder in place
//! and returns it for chaining; `op` leaves the receiver untouched and returns
//! an edited copy:
//!
//! ```
//! let base = esql_core::from("sample_data");
//! let limited = base.limit(2);
//!
//! assert_eq!(base.query().unwrap(), "FROM sample_data");
//! assert_eq!(limited.query().unwrap(), "FROM sample_data | LIMIT 2");
//! ```

use core::fmt::{self, Display};

use compact_str::{CompactString, ToCompactString, format_compact};
use esql_types::{Command, FuseMethod};
use paste::paste;

use crate::change_point::ChangePoint;
use crate::enrich::Enrich;
use crate::error::{EsqlError, Result};
use crate::esql_trace_error;
use crate::expressions::{Expressions, write_joined};
use crate::fields::Fields;
use crate::stats::StatsSpecs;
use crate::store::ClauseStore;

/// Generates the copy variant `op` of each `op_mut`.
#[doc(hidden)]
macro_rules! copy_on_call {
    ($($(#[$meta:meta])* fn $name:ident($($arg:ident: $ty:ty),* $(,)?);)*) => {
        paste! {
            $(
                $(#[$meta])*
                #[must_use]
                pub fn $name(&self, $($arg: $ty),*) -> Self {
                    let mut esql = self.clone();
                    esql.[<$name _mut>]($($arg),*);
                    esql
                }
            )*
        }
    };
}

/// Like [`copy_on_call!`], for operations that validate their input.
#[doc(hidden)]
macro_rules! try_copy_on_call {
    ($($(#[$meta:meta])* fn $name:ident($($arg:ident: $ty:ty),* $(,)?);)*) => {
        paste! {
            $(
                $(#[$meta])*
                pub fn $name(&self, $($arg: $ty),*) -> Result<Self> {
                    let mut esql = self.clone();
                    esql.[<$name _mut>]($($arg),*)?;
                    Ok(esql)
                }
            )*
        }
    };
}

/// An ES|QL query under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Esql {
    pub(crate) store: ClauseStore,
}

impl Esql {
    /// An empty builder. Add a source command before rendering.
    #[inline]
    pub const fn new() -> Self {
        Self {
            store: ClauseStore::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn clauses(&self) -> &ClauseStore {
        &self.store
    }

    /// Renders the query.
    ///
    /// Fails with [`EsqlError::MissingSource`] when no FROM, ROW, SHOW or TS
    /// clause was added.
    pub fn query(&self) -> Result<String> {
        self.store.render()
    }

    /// Same as [`Esql::query`].
    #[inline]
    pub fn render(&self) -> Result<String> {
        self.query()
    }

    // ==================== source commands ====================

    /// `FROM index_pattern`. Replaces an existing FROM in place.
    ///
    /// The rest of the pipeline is kept: `from("a").limit(3).from("b")` renders
    /// `FROM b | LIMIT 3`. It does not start a fresh pipeline; build a new
    /// [`Esql`] for that.
    pub fn from_mut(&mut self, index_pattern: impl AsRef<str>) -> &mut Self {
        self.store.set_text(Command::From, index_pattern.as_ref());
        self
    }

    /// `ROW a = 1, b = two`
    pub fn row_mut(&mut self, columns: impl Into<Expressions>) -> &mut Self {
        self.store
            .set_text(Command::Row, columns.into().to_compact_string());
        self
    }

    /// `TS index_pattern`, enabling time series aggregations in STATS.
    pub fn ts_mut(&mut self, index_pattern: impl AsRef<str>) -> &mut Self {
        self.store.set_text(Command::Ts, index_pattern.as_ref());
        self
    }

    /// `TS index_pattern METADATA fields`
    pub fn ts_with_metadata_mut(
        &mut self,
        index_pattern: impl AsRef<str>,
        fields: impl Into<Fields>,
    ) -> &mut Self {
        let fields = fields.into();
        let text = if fields.is_empty() {
            CompactString::from(index_pattern.as_ref())
        } else {
            format_compact!(
                "{} {} {}",
                index_pattern.as_ref(),
                Command::Metadata.keyword(),
                fields
            )
        };
        self.store.set_text(Command::Ts, text);
        self
    }

    /// `SHOW INFO`
    pub fn show_mut(&mut self) -> &mut Self {
        self.store.set_text(Command::Show, "INFO");
        self
    }

    /// Adds metadata fields to the FROM clause.
    ///
    /// Repeated calls accumulate and an empty field list adds nothing. Fails
    /// with [`EsqlError::MetadataWithoutFrom`] when there is no FROM clause.
    pub fn metadata_mut(&mut self, fields: impl Into<Fields>) -> Result<&mut Self> {
        if !self.store.contains(Command::From) {
            let err = EsqlError::MetadataWithoutFrom;
            esql_trace_error!(Command::Metadata, &err);
            return Err(err);
        }
        let fields = fields.into();
        if !fields.is_empty() {
            self.store.push_metadata(fields.to_compact_string());
        }
        Ok(self)
    }

    // ==================== filtering and ordering ====================

    /// `WHERE condition`. Repeated calls are joined with `AND`.
    pub fn where_mut(&mut self, condition: impl AsRef<str>) -> &mut Self {
        self.store
            .append_text(Command::Where, condition.as_ref(), " AND ");
        self
    }

    #[must_use]
    pub fn r#where(&self, condition: impl AsRef<str>) -> Self {
        let mut esql = self.clone();
        esql.where_mut(condition);
        esql
    }

    /// `SORT column`. Replaces an existing SORT, modifiers included.
    pub fn sort_mut(&mut self, column: impl AsRef<str>) -> &mut Self {
        self.store.set_text(Command::Sort, column.as_ref());
        self
    }

    pub fn ascending_mut(&mut self) -> Result<&mut Self> {
        self.sort_modifier("ASC")
    }

    pub fn descending_mut(&mut self) -> Result<&mut Self> {
        self.sort_modifier("DESC")
    }

    pub fn nulls_first_mut(&mut self) -> Result<&mut Self> {
        self.sort_modifier("NULLS FIRST")
    }

    pub fn nulls_last_mut(&mut self) -> Result<&mut Self> {
        self.sort_modifier("NULLS LAST")
    }

    #[inline]
    pub fn asc_mut(&mut self) -> Result<&mut Self> {
        self.ascending_mut()
    }

    #[inline]
    pub fn desc_mut(&mut self) -> Result<&mut Self> {
        self.descending_mut()
    }

    fn sort_modifier(&mut self, modifier: &str) -> Result<&mut Self> {
        let Some(sort) = self.store.text_mut(Command::Sort) else {
            let err = EsqlError::NoSortField;
            esql_trace_error!(Command::Sort, &err);
            return Err(err);
        };
        sort.push(' ');
        sort.push_str(modifier);
        Ok(self)
    }

    pub fn limit_mut(&mut self, max_rows: u32) -> &mut Self {
        self.store
            .set_text(Command::Limit, max_rows.to_compact_string());
        self
    }

    // ==================== column processing ====================

    /// `EVAL name = expression, ...`
    pub fn eval_mut(&mut self, columns: impl Into<Expressions>) -> &mut Self {
        self.store
            .set_text(Command::Eval, columns.into().to_compact_string());
        self
    }

    pub fn keep_mut(&mut self, columns: impl Into<Fields>) -> &mut Self {
        self.store
            .set_text(Command::Keep, columns.into().to_compact_string());
        self
    }

    pub fn drop_mut(&mut self, columns: impl Into<Fields>) -> &mut Self {
        self.store
            .set_text(Command::Drop, columns.into().to_compact_string());
        self
    }

    /// `RENAME old AS new, ...`, given `old = new` pairs.
    pub fn rename_mut(&mut self, columns: impl Into<Expressions>) -> &mut Self {
        self.store
            .set_text(Command::Rename, columns.into().render_renames());
        self
    }

    /// `DISSECT input """pattern"""`
    pub fn dissect_mut(&mut self, input: impl AsRef<str>, pattern: impl AsRef<str>) -> &mut Self {
        self.store
            .set_text(Command::Dissect, quoted_pattern(input.as_ref(), pattern.as_ref()));
        self
    }

    /// `DISSECT input """pattern""" APPEND_SEPARATOR="separator"`
    pub fn dissect_with_separator_mut(
        &mut self,
        input: impl AsRef<str>,
        pattern: impl AsRef<str>,
        separator: impl AsRef<str>,
    ) -> &mut Self {
        let mut text = quoted_pattern(input.as_ref(), pattern.as_ref());
        text.push_str(&format_compact!(" APPEND_SEPARATOR=\"{}\"", separator.as_ref()));
        self.store.set_text(Command::Dissect, text);
        self
    }

    /// `GROK input """pattern"""`
    pub fn grok_mut(&mut self, input: impl AsRef<str>, pattern: impl AsRef<str>) -> &mut Self {
        self.store
            .set_text(Command::Grok, quoted_pattern(input.as_ref(), pattern.as_ref()));
        self
    }

    // ==================== aggregation ====================

    /// `STATS spec, ...`
    ///
    /// Fails with [`EsqlError::NoAggregation`] for an empty spec list, and with
    /// [`EsqlError::TimeSeriesAggregation`] when a time series function is used
    /// in a pipeline whose source is not TS.
    pub fn stats_mut(&mut self, specs: impl Into<StatsSpecs>) -> Result<&mut Self> {
        let specs = specs.into();
        if specs.is_empty() {
            let err = EsqlError::NoAggregation;
            esql_trace_error!(Command::Stats, &err);
            return Err(err);
        }
        if let Some(function) = specs.time_series_function() {
            if self.store.has_source() && !self.store.contains(Command::Ts) {
                let err = EsqlError::TimeSeriesAggregation {
                    function: function.keyword().into(),
                };
                esql_trace_error!(Command::Stats, &err);
                return Err(err);
            }
        }
        self.store
            .set_text(Command::Stats, specs.to_compact_string());
        Ok(self)
    }

    /// Appends ` BY grouping` to the STATS clause.
    pub fn by_mut(&mut self, grouping: impl AsRef<str>) -> Result<&mut Self> {
        let Some(stats) = self.store.text_mut(Command::Stats) else {
            let err = EsqlError::NoStats;
            esql_trace_error!(Command::Stats, &err);
            return Err(err);
        };
        stats.push_str(" BY ");
        stats.push_str(grouping.as_ref());
        Ok(self)
    }

    // ==================== enrichment and joins ====================

    /// Adds an ENRICH stage and returns its editor on a copy of this builder.
    pub fn enrich(&self, policy: impl AsRef<str>) -> Enrich<Esql> {
        Enrich::attach(self.clone(), policy)
    }

    /// Adds an ENRICH stage to this builder and returns its editor.
    pub fn enrich_mut(&mut self, policy: impl AsRef<str>) -> Enrich<&mut Esql> {
        Enrich::attach(self, policy)
    }

    /// `LOOKUP JOIN lookup_index ON field_name`. Each call adds a stage.
    pub fn lookup_join_mut(
        &mut self,
        lookup_index: impl AsRef<str>,
        field_name: impl AsRef<str>,
    ) -> &mut Self {
        self.store.push_repeated(
            Command::LookupJoin,
            format_compact!("{} ON {}", lookup_index.as_ref(), field_name.as_ref()),
        );
        self
    }

    /// `CHANGE_POINT column [ON key] [AS type_name, pvalue_name]`
    pub fn change_point_mut(&mut self, spec: impl Into<ChangePoint>) -> Result<&mut Self> {
        let text = spec.into().render().inspect_err(|_err| {
            esql_trace_error!(Command::ChangePoint, _err);
        })?;
        self.store.set_text(Command::ChangePoint, text);
        Ok(self)
    }

    // ==================== branching ====================

    /// `FORK (branch) (branch) ...`, each branch built from [`branch`](crate::branch).
    pub fn fork_mut(&mut self, branches: impl IntoIterator<Item = Esql>) -> &mut Self {
        let mut text = String::new();
        let rendered = branches
            .into_iter()
            .map(|branch| ForkBranch(branch.store.render_pipeline()));
        let _ = write_joined(&mut text, rendered, " ");
        self.store.set_text(Command::Fork, text);
        self
    }

    /// `FUSE`, merging the results of a FORK.
    pub fn fuse_mut(&mut self) -> &mut Self {
        self.store.set_text(Command::Fuse, "");
        self
    }

    /// `FUSE method`
    pub fn fuse_with_mut(&mut self, method: FuseMethod) -> &mut Self {
        self.store.set_text(Command::Fuse, method.keyword());
        self
    }

    /// Appends `fragment` verbatim after the last stage.
    ///
    /// No pipe is added; include `| ` in the fragment to start a new stage.
    pub fn custom_mut(&mut self, fragment: impl AsRef<str>) -> &mut Self {
        self.store.push_custom(fragment.as_ref());
        self
    }

    copy_on_call! {
        /// Copy variant of [`Esql::from_mut`].
        fn from(index_pattern: impl AsRef<str>);
        fn row(columns: impl Into<Expressions>);
        fn ts(index_pattern: impl AsRef<str>);
        fn ts_with_metadata(index_pattern: impl AsRef<str>, fields: impl Into<Fields>);
        fn show();
        fn sort(column: impl AsRef<str>);
        fn limit(max_rows: u32);
        fn eval(columns: impl Into<Expressions>);
        fn keep(columns: impl Into<Fields>);
        fn drop(columns: impl Into<Fields>);
        fn rename(columns: impl Into<Expressions>);
        fn dissect(input: impl AsRef<str>, pattern: impl AsRef<str>);
        fn dissect_with_separator(
            input: impl AsRef<str>,
            pattern: impl AsRef<str>,
            separator: impl AsRef<str>,
        );
        fn grok(input: impl AsRef<str>, pattern: impl AsRef<str>);
        fn lookup_join(lookup_index: impl AsRef<str>, field_name: impl AsRef<str>);
        fn fork(branches: impl IntoIterator<Item = Esql>);
        fn fuse();
        fn fuse_with(method: FuseMethod);
        fn custom(fragment: impl AsRef<str>);
    }

    try_copy_on_call! {
        fn metadata(fields: impl Into<Fields>);
        fn ascending();
        fn descending();
        fn nulls_first();
        fn nulls_last();
        fn asc();
        fn desc();
        fn stats(specs: impl Into<StatsSpecs>);
        fn by(grouping: impl AsRef<str>);
        fn change_point(spec: impl Into<ChangePoint>);
    }
}

impl Display for Esql {
    /// Writes the rendered query, or the bare pipeline when there is no source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.store.render() {
            Ok(query) => f.write_str(&query),
            Err(_) => f.write_str(&self.store.render_pipeline()),
        }
    }
}

struct ForkBranch(String);

impl Display for ForkBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}

fn quoted_pattern(input: &str, pattern: &str) -> CompactString {
    format_compact!("{input} \"\"\"{pattern}\"\"\"")
}
