//! Errors raised by builder operations.

use esql_types::{ChangePointType, Command};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EsqlError {
    /// Rendering a pipeline that has no FROM, ROW, SHOW or TS clause
    #[error("No source command found, a query must start with FROM, ROW, SHOW or TS")]
    MissingSource,

    /// A sort modifier was used before any SORT clause
    #[error("No sort field specified")]
    NoSortField,

    /// The expression renderer got something other than pairs or a single assignment
    #[error(
        "{command} needs either a column name and a value, or an ordered list of \
         column names paired with the function or expression to calculate"
    )]
    InvalidExpressionArguments { command: Command },

    #[error(
        "Invalid change point type `{name}`. {description}",
        description = ChangePointType::DESCRIPTION
    )]
    InvalidChangePointType { name: String },

    /// Metadata fields were neither a string nor a list of strings
    #[error(
        "The fields parameter for {command} is a comma-separated list of metadata fields, \
         passed as a list (['_index', '_id']) or a string ('_index, _id')"
    )]
    InvalidFieldsArgument { command: Command },

    #[error("A FROM source command must be used for metadata")]
    MetadataWithoutFrom,

    /// BY grouping requested with no STATS clause to attach it to
    #[error("No STATS clause to group")]
    NoStats,

    #[error("No aggregation function specified for STATS")]
    NoAggregation,

    #[error("Time series aggregation {function} needs a TS source command")]
    TimeSeriesAggregation { function: String },

    #[error("Aggregation expression is invalid: {0}")]
    InvalidAggregationExpression(String),
}

/// Result type for builder operations
pub type Result<T> = std::result::Result<T, EsqlError>;
