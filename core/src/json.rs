//! Conversions from loosely shaped `serde_json` values.
//!
//! These are the entry points for inputs whose shape is only known at runtime,
//! so they are also where malformed arguments are rejected.
//!
//! ```
//! use esql_core::{StatsSpecs, from};
//! use serde_json::json;
//!
//! let specs = StatsSpecs::try_from(&json!({
//!     "column": "distinct_word_count",
//!     "count_distinct": { "split": "words, \";\"" }
//! }))
//! .unwrap();
//!
//! assert_eq!(
//!     from("sample_data").stats(specs).unwrap().query().unwrap(),
//!     "FROM sample_data | STATS distinct_word_count = COUNT_DISTINCT(SPLIT(words, \";\"))"
//! );
//! ```

use compact_str::{CompactString, ToCompactString};
use esql_types::{AggFunction, Command};
use serde_json::Value;
use smallvec::SmallVec;

use crate::error::{EsqlError, Result};
use crate::expressions::Expressions;
use crate::fields::Fields;
use crate::stats::{AggExpr, StatsSpec, StatsSpecs};

const COLUMN: &str = "column";
const WHERE: &str = "where";
const BY: &str = "by";

/// Strings are taken without quotes, everything else in its JSON form.
fn scalar_text(value: &Value) -> CompactString {
    match value {
        Value::String(text) => text.as_str().into(),
        other => other.to_compact_string(),
    }
}

fn string_field<'a>(object: &'a serde_json::Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match object.get(key) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(other) => Err(EsqlError::InvalidAggregationExpression(other.to_string())),
    }
}

impl Fields {
    /// Accepts a string or an array of strings.
    pub fn from_json(command: Command, value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::from(text.as_str())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(CompactString::from))
                .collect::<Option<SmallVec<_>>>()
                .map(Self::List)
                .ok_or(EsqlError::InvalidFieldsArgument { command }),
            _ => Err(EsqlError::InvalidFieldsArgument { command }),
        }
    }
}

impl Expressions {
    /// Accepts an object of `name: value` pairs or a `[name, value]` array.
    pub fn from_json(command: Command, value: &Value) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(Self::Pairs(
                object
                    .iter()
                    .map(|(name, value)| (name.as_str().into(), scalar_text(value)))
                    .collect(),
            )),
            Value::Array(items) => {
                let args = items
                    .iter()
                    .map(Value::as_str)
                    .collect::<Option<SmallVec<[&str; 2]>>>()
                    .ok_or(EsqlError::InvalidExpressionArguments { command })?;
                Self::positional(command, &args)
            }
            _ => Err(EsqlError::InvalidExpressionArguments { command }),
        }
    }
}

impl TryFrom<&Value> for AggExpr {
    type Error = EsqlError;

    /// A string, or a single-key object `{ "function": inner }`.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::literal(text)),
            Value::Object(object) if object.len() == 1 => {
                let (function, inner) = object
                    .iter()
                    .next()
                    .ok_or_else(|| EsqlError::InvalidAggregationExpression(value.to_string()))?;
                Ok(Self::call(function, Self::try_from(inner)?))
            }
            other => Err(EsqlError::InvalidAggregationExpression(other.to_string())),
        }
    }
}

impl TryFrom<&Value> for StatsSpec {
    type Error = EsqlError;

    /// An object whose aggregation function keys become the aggregations,
    /// alongside the optional `column`, `where` and `by` keys. Other keys are
    /// ignored.
    fn try_from(value: &Value) -> Result<Self> {
        let Value::Object(object) = value else {
            return Err(EsqlError::InvalidAggregationExpression(value.to_string()));
        };

        let mut spec: Option<StatsSpec> = None;
        for (key, inner) in object {
            let Some(function) = AggFunction::parse(key) else {
                continue;
            };
            let expr = AggExpr::try_from(inner)?;
            spec = Some(match spec {
                Some(spec) => spec.and(function, expr),
                None => StatsSpec::new(function, expr),
            });
        }
        let mut spec = spec.ok_or(EsqlError::NoAggregation)?;

        if let Some(column) = string_field(object, COLUMN)? {
            spec = spec.column(column);
        }
        if let Some(filter) = string_field(object, WHERE)? {
            spec = spec.r#where(filter);
        }
        if let Some(by) = string_field(object, BY)? {
            spec = spec.by(by);
        }
        Ok(spec)
    }
}

impl TryFrom<&Value> for StatsSpecs {
    type Error = EsqlError;

    /// One spec object, or an array of them.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Object(_) => StatsSpec::try_from(value).map(Self::from),
            Value::Array(items) => items.iter().map(StatsSpec::try_from).collect(),
            other => Err(EsqlError::InvalidAggregationExpression(other.to_string())),
        }
    }
}
