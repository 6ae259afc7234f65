//! Source commands as free functions, the usual way to start a query.

use crate::builder::Esql;
use crate::expressions::Expressions;
use crate::fields::Fields;

/// `FROM index_pattern`
///
/// ```
/// assert_eq!(esql_core::from("sample_data").query().unwrap(), "FROM sample_data");
/// ```
pub fn from(index_pattern: impl AsRef<str>) -> Esql {
    let mut esql = Esql::new();
    esql.from_mut(index_pattern);
    esql
}

/// `ROW name = value, ...`
///
/// ```
/// let esql = esql_core::row([("a", "1"), ("b", "two"), ("c", "null")]);
/// assert_eq!(esql.query().unwrap(), "ROW a = 1, b = two, c = null");
/// ```
pub fn row(columns: impl Into<Expressions>) -> Esql {
    let mut esql = Esql::new();
    esql.row_mut(columns);
    esql
}

/// `TS index_pattern`
pub fn ts(index_pattern: impl AsRef<str>) -> Esql {
    let mut esql = Esql::new();
    esql.ts_mut(index_pattern);
    esql
}

/// `TS index_pattern METADATA fields`
pub fn ts_with_metadata(index_pattern: impl AsRef<str>, fields: impl Into<Fields>) -> Esql {
    let mut esql = Esql::new();
    esql.ts_with_metadata_mut(index_pattern, fields);
    esql
}

/// `SHOW INFO`
pub fn show() -> Esql {
    let mut esql = Esql::new();
    esql.show_mut();
    esql
}

/// An empty pipeline to pass to [`Esql::fork`].
#[inline]
pub const fn branch() -> Esql {
    Esql::new()
}
