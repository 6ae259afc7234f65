//! Core of the ES|QL query builder.
//!
//! Queries are assembled as a pipeline of clauses, each stored once per
//! [`Command`] in the order it was introduced, and rendered into a single
//! `" | "` separated string:
//!
//! ```
//! let query = esql_core::from("sample_data")
//!     .sort("@timestamp")
//!     .ascending()
//!     .unwrap()
//!     .limit(2)
//!     .r#where("value > 10");
//!
//! assert_eq!(
//!     query.query().unwrap(),
//!     "FROM sample_data | SORT @timestamp ASC | LIMIT 2 | WHERE value > 10"
//! );
//! ```

pub mod builder;
pub mod change_point;
pub mod enrich;
pub mod error;
pub mod expressions;
pub mod fields;
#[cfg(feature = "serde")]
pub mod json;
pub mod source;
pub mod stats;
pub mod store;
mod tracing;

pub use builder::Esql;
pub use change_point::ChangePoint;
pub use enrich::{Enrich, EnrichClause, EnrichFields};
pub use error::{EsqlError, Result};
pub use expressions::Expressions;
pub use fields::Fields;
pub use source::{branch, from, row, show, ts, ts_with_metadata};
pub use stats::{AggExpr, StatsSpec, StatsSpecs};
pub use store::{ClauseStore, Fragment};

pub use esql_types::{AggFunction, ChangePointType, Command, FuseMethod};
