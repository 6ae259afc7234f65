//! STATS aggregation specs.
//!
//! A STATS clause is a comma-separated list of [`StatsSpec`]s. Each spec renders
//! as `[column =] FUNC(expr)[, FUNC(expr)...] [WHERE cond] [BY grouping]`, with
//! the function arguments given as [`AggExpr`] trees:
//!
//! ```
//! use esql_core::{AggExpr, AggFunction, StatsSpec};
//!
//! let spec = StatsSpec::new(AggFunction::CountDistinct, AggExpr::call("split", "words, \";\""))
//!     .column("distinct_word_count");
//! assert_eq!(spec.to_string(), "distinct_word_count = COUNT_DISTINCT(SPLIT(words, \";\"))");
//! ```

use core::fmt::{self, Display, Write};

use compact_str::CompactString;
use esql_types::AggFunction;
use smallvec::SmallVec;

use crate::expressions::write_joined;

const CAST: &str = "::";

/// Argument of an aggregation function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggExpr {
    /// Expression text, e.g. `salary` or `salary::LONG`
    Literal(CompactString),
    /// `FUNCTION(arg)`, for any function name
    Call {
        function: CompactString,
        arg: Box<AggExpr>,
    },
}

impl AggExpr {
    #[inline]
    pub fn literal(text: impl AsRef<str>) -> Self {
        Self::Literal(text.as_ref().into())
    }

    /// Wraps `arg` in a call to `function`. The name is upper-cased on render.
    pub fn call(function: impl AsRef<str>, arg: impl Into<AggExpr>) -> Self {
        Self::Call {
            function: function.as_ref().into(),
            arg: Box::new(arg.into()),
        }
    }

    /// Function names from the outermost call inwards.
    pub fn functions(&self) -> impl Iterator<Item = &str> {
        let mut next = Some(self);
        core::iter::from_fn(move || match next.take()? {
            AggExpr::Literal(_) => None,
            AggExpr::Call { function, arg } => {
                next = Some(arg.as_ref());
                Some(function.as_str())
            }
        })
    }

    /// Writes the expression as the argument of a top-level aggregation.
    ///
    /// A literal `expr::TYPE` moves the cast outside the call: `FUNC(expr)::TYPE`.
    fn write_aggregated(&self, buf: &mut impl Write, function: AggFunction) -> fmt::Result {
        match self {
            AggExpr::Literal(text) if text.contains(CAST) => {
                let mut parts = text.split(CAST);
                let value = parts.next().unwrap_or_default();
                let cast = parts.next().unwrap_or_default();
                write!(buf, "{}({}){}{}", function.keyword(), value, CAST, cast)
            }
            expr => write!(buf, "{}({})", function.keyword(), expr),
        }
    }
}

impl Display for AggExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggExpr::Literal(text) => f.write_str(text),
            AggExpr::Call { function, arg } => {
                for c in function.chars() {
                    f.write_char(c.to_ascii_uppercase())?;
                }
                write!(f, "({arg})")
            }
        }
    }
}

impl From<&str> for AggExpr {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for AggExpr {
    fn from(text: String) -> Self {
        Self::Literal(text.into())
    }
}

impl From<(AggFunction, AggExpr)> for AggExpr {
    /// Nests a vocabulary function, e.g. `MAX(ABSENT_OVER_TIME(x))`.
    fn from((function, arg): (AggFunction, AggExpr)) -> Self {
        Self::call(function.name(), arg)
    }
}

/// One aggregation unit of a STATS clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSpec {
    pub(crate) column: Option<CompactString>,
    pub(crate) aggregations: SmallVec<[(AggFunction, AggExpr); 2]>,
    pub(crate) filter: Option<CompactString>,
    pub(crate) by: Option<CompactString>,
}

impl StatsSpec {
    pub fn new(function: AggFunction, expr: impl Into<AggExpr>) -> Self {
        Self {
            column: None,
            aggregations: smallvec::smallvec![(function, expr.into())],
            filter: None,
            by: None,
        }
    }

    /// Adds another aggregation to this spec, rendered after the previous ones.
    pub fn and(mut self, function: AggFunction, expr: impl Into<AggExpr>) -> Self {
        self.aggregations.push((function, expr.into()));
        self
    }

    /// Name of the output column.
    pub fn column(mut self, name: impl AsRef<str>) -> Self {
        self.column = Some(name.as_ref().into());
        self
    }

    /// Only rows matching `condition` take part in this aggregation.
    pub fn r#where(mut self, condition: impl AsRef<str>) -> Self {
        self.filter = Some(condition.as_ref().into());
        self
    }

    pub fn by(mut self, grouping: impl AsRef<str>) -> Self {
        self.by = Some(grouping.as_ref().into());
        self
    }

    #[must_use]
    pub fn aggregations(&self) -> &[(AggFunction, AggExpr)] {
        &self.aggregations
    }

    /// The first time series aggregation used anywhere in this spec.
    #[must_use]
    pub fn time_series_function(&self) -> Option<AggFunction> {
        self.aggregations.iter().find_map(|(function, expr)| {
            if function.is_time_series() {
                return Some(*function);
            }
            expr.functions()
                .filter_map(AggFunction::parse)
                .find(AggFunction::is_time_series)
        })
    }
}

impl Display for StatsSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(column) = &self.column {
            write!(f, "{column} = ")?;
        }
        for (i, (function, expr)) in self.aggregations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            expr.write_aggregated(f, *function)?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " WHERE {filter}")?;
        }
        if let Some(by) = &self.by {
            write!(f, " BY {by}")?;
        }
        Ok(())
    }
}

/// The specs of one STATS clause, joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSpecs(pub(crate) SmallVec<[StatsSpec; 1]>);

impl StatsSpecs {
    #[must_use]
    pub fn time_series_function(&self) -> Option<AggFunction> {
        self.0.iter().find_map(StatsSpec::time_series_function)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for StatsSpecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.0, ", ")
    }
}

impl From<StatsSpec> for StatsSpecs {
    fn from(spec: StatsSpec) -> Self {
        Self(smallvec::smallvec![spec])
    }
}

impl From<Vec<StatsSpec>> for StatsSpecs {
    fn from(specs: Vec<StatsSpec>) -> Self {
        Self(specs.into_iter().collect())
    }
}

impl<const N: usize> From<[StatsSpec; N]> for StatsSpecs {
    fn from(specs: [StatsSpec; N]) -> Self {
        Self(specs.into_iter().collect())
    }
}

impl FromIterator<StatsSpec> for StatsSpecs {
    fn from_iter<I: IntoIterator<Item = StatsSpec>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_where_by() {
        let spec = StatsSpec::new(AggFunction::Count, "emp_no")
            .column("fernando")
            .by("language")
            .r#where("a = 1");
        assert_eq!(spec.to_string(), "fernando = COUNT(emp_no) WHERE a = 1 BY language");
    }

    #[test]
    fn test_cast_moves_outside_call() {
        let spec = StatsSpec::new(AggFunction::Avg, "salary::LONG").column("avg50s");
        assert_eq!(spec.to_string(), "avg50s = AVG(salary)::LONG");
    }

    #[test]
    fn test_cast_inside_nested_call_is_kept() {
        let spec = StatsSpec::new(AggFunction::Max, AggExpr::call("to_long", "salary::LONG"));
        assert_eq!(spec.to_string(), "MAX(TO_LONG(salary::LONG))");
    }

    #[test]
    fn test_multiple_functions() {
        let spec = StatsSpec::new(AggFunction::Median, "salary")
            .and(AggFunction::MedianAbsoluteDeviation, "salary");
        assert_eq!(spec.to_string(), "MEDIAN(salary), MEDIAN_ABSOLUTE_DEVIATION(salary)");
    }

    #[test]
    fn test_deep_nesting() {
        let expr = AggExpr::call("a", AggExpr::call("b", AggExpr::call("c", "x")));
        assert_eq!(expr.to_string(), "A(B(C(x)))");
        assert_eq!(expr.functions().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn test_time_series_detection() {
        let plain = StatsSpec::new(AggFunction::Avg, AggExpr::call("split", "x"));
        assert_eq!(plain.time_series_function(), None);

        let nested = StatsSpec::new(
            AggFunction::Max,
            AggExpr::from((AggFunction::AbsentOverTime, AggExpr::from("events_received"))),
        );
        assert_eq!(nested.time_series_function(), Some(AggFunction::AbsentOverTime));

        let top = StatsSpec::new(AggFunction::Rate, "requests");
        assert_eq!(top.time_series_function(), Some(AggFunction::Rate));
    }

    #[test]
    fn test_specs_are_comma_joined() {
        let specs = StatsSpecs::from([
            StatsSpec::new(AggFunction::Min, "a"),
            StatsSpec::new(AggFunction::Max, "b").column("top"),
        ]);
        assert_eq!(specs.to_string(), "MIN(a), top = MAX(b)");
    }
}
