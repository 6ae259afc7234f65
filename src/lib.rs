//! # ES|QL for Rust
//!
//! A fluent builder for pipe-delimited ES|QL queries.
//!
//! ## Quick Start
//!
//! ```rust
//! use esql::prelude::*;
//!
//! # fn main() -> esql::Result<()> {
//! let query = esql::from("sample_data")
//!     .r#where("event_duration > 5000000")
//!     .sort("@timestamp")
//!     .descending()?
//!     .limit(3)
//!     .query()?;
//!
//! assert_eq!(
//!     query,
//!     "FROM sample_data | WHERE event_duration > 5000000 | SORT @timestamp DESC | LIMIT 3"
//! );
//!
//! let stats = esql::from("employees")
//!     .stats(StatsSpec::new(AggFunction::Avg, "salary").column("avg_salary"))?
//!     .by("languages")?
//!     .query()?;
//!
//! assert_eq!(stats, "FROM employees | STATS avg_salary = AVG(salary) BY languages");
//! # Ok(())
//! # }
//! ```
//!
//! ## Mutating and copying calls
//!
//! Every operation has an `_mut` variant that edits the builder in place, and
//! a plain variant that returns an edited copy:
//!
//! ```rust
//! let mut esql = esql::from("sample_data");
//! esql.limit_mut(5);
//!
//! let other = esql.limit(10);
//! assert_eq!(esql.query().unwrap(), "FROM sample_data | LIMIT 5");
//! assert_eq!(other.query().unwrap(), "FROM sample_data | LIMIT 10");
//! ```
//!
//! ## Features
//!
//! | Feature   | Default | Description                                      |
//! |-----------|---------|--------------------------------------------------|
//! | `std`     | ✅      | Standard library support                         |
//! | `serde`   | ✅      | serde derives and `serde_json` input conversions |
//! | `tracing` |         | Structured events for renders and rejections     |

#![cfg_attr(docsrs, feature(doc_cfg))]

// =============================================================================
// Root-level exports
// =============================================================================

/// Result type for builder operations
pub use esql_core::error::Result;

/// Error types
pub mod error {
    pub use esql_core::error::EsqlError;
}

pub use esql_core::{
    AggExpr, ChangePoint, ClauseStore, Enrich, EnrichClause, EnrichFields, Esql, EsqlError,
    Expressions, Fields, Fragment, StatsSpec, StatsSpecs,
};

/// Source commands
pub use esql_core::{branch, from, row, show, ts, ts_with_metadata};

/// Keyword vocabularies
pub use esql_types as types;
pub use esql_types::{AggFunction, ChangePointType, Command, FuseMethod};

/// Import this to build queries.
pub mod prelude {
    pub use esql_core::{
        AggExpr, ChangePoint, Esql, EsqlError, Expressions, Fields, StatsSpec, StatsSpecs,
    };
    pub use esql_types::prelude::*;
}
