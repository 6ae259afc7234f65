//! Aggregation function vocabulary
//!
//! STATS only accepts functions from two fixed sets: the standard aggregations
//! and the time series aggregations, which are only legal after a `TS` source.

macro_rules! agg_functions {
    (
        standard { $($std_variant:ident => $std_name:literal / $std_keyword:literal),* $(,)? }
        time_series { $($ts_variant:ident => $ts_name:literal / $ts_keyword:literal),* $(,)? }
    ) => {
        /// An aggregation function usable at the top level of a STATS expression.
        ///
        /// # Examples
        ///
        /// ```
        /// use esql_types::AggFunction;
        ///
        /// assert_eq!(AggFunction::CountDistinct.name(), "count_distinct");
        /// assert_eq!(AggFunction::CountDistinct.keyword(), "COUNT_DISTINCT");
        /// assert!(AggFunction::Rate.is_time_series());
        /// ```
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
        pub enum AggFunction {
            $($std_variant,)*
            $($ts_variant,)*
        }

        impl AggFunction {
            /// Standard aggregation functions.
            pub const STANDARD: &'static [AggFunction] = &[$(AggFunction::$std_variant),*];

            /// Time series aggregation functions.
            pub const TIME_SERIES: &'static [AggFunction] = &[$(AggFunction::$ts_variant),*];

            /// Lower-case name, as accepted by [`AggFunction::parse`].
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $(AggFunction::$std_variant => $std_name,)*
                    $(AggFunction::$ts_variant => $ts_name,)*
                }
            }

            /// Upper-cased name written into the query.
            #[must_use]
            pub const fn keyword(&self) -> &'static str {
                match self {
                    $(AggFunction::$std_variant => $std_keyword,)*
                    $(AggFunction::$ts_variant => $ts_keyword,)*
                }
            }

            /// Returns `true` for the `*_over_time` family and the other
            /// functions that need a time series source.
            #[must_use]
            pub const fn is_time_series(&self) -> bool {
                !matches!(self, $(AggFunction::$std_variant)|*)
            }
        }
    };
}

agg_functions! {
    standard {
        Absent => "absent" / "ABSENT",
        Avg => "avg" / "AVG",
        Count => "count" / "COUNT",
        CountDistinct => "count_distinct" / "COUNT_DISTINCT",
        Max => "max" / "MAX",
        Median => "median" / "MEDIAN",
        MedianAbsoluteDeviation => "median_absolute_deviation" / "MEDIAN_ABSOLUTE_DEVIATION",
        Min => "min" / "MIN",
        Percentile => "percentile" / "PERCENTILE",
        Present => "present" / "PRESENT",
        Sample => "sample" / "SAMPLE",
        StCentroidAgg => "st_centroid_agg" / "ST_CENTROID_AGG",
        StExtentAgg => "st_extent_agg" / "ST_EXTENT_AGG",
        StdDev => "std_dev" / "STD_DEV",
        Sum => "sum" / "SUM",
        Top => "top" / "TOP",
        Values => "values" / "VALUES",
        Variance => "variance" / "VARIANCE",
        WeightedAvg => "weighted_avg" / "WEIGHTED_AVG",
    }
    time_series {
        AbsentOverTime => "absent_over_time" / "ABSENT_OVER_TIME",
        AvgOverTime => "avg_over_time" / "AVG_OVER_TIME",
        CountOverTime => "count_over_time" / "COUNT_OVER_TIME",
        CountDistinctOverTime => "count_distinct_over_time" / "COUNT_DISTINCT_OVER_TIME",
        Delta => "delta" / "DELTA",
        Deriv => "deriv" / "DERIV",
        FirstOverTime => "first_over_time" / "FIRST_OVER_TIME",
        Idelta => "idelta" / "IDELTA",
        Increase => "increase" / "INCREASE",
        Irate => "irate" / "IRATE",
        LastOverTime => "last_over_time" / "LAST_OVER_TIME",
        MaxOverTime => "max_over_time" / "MAX_OVER_TIME",
        MinOverTime => "min_over_time" / "MIN_OVER_TIME",
        PercentileOverTime => "percentile_over_time" / "PERCENTILE_OVER_TIME",
        PresentOverTime => "present_over_time" / "PRESENT_OVER_TIME",
        Rate => "rate" / "RATE",
        StddevOverTime => "stddev_over_time" / "STDDEV_OVER_TIME",
        SumOverTime => "sum_over_time" / "SUM_OVER_TIME",
        VarianceOverTime => "variance_over_time" / "VARIANCE_OVER_TIME",
    }
}

impl AggFunction {
    /// Parse a function name (case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().find(|function| function.name().eq_ignore_ascii_case(s))
    }

    /// Every function, standard ones first.
    pub fn all() -> impl Iterator<Item = AggFunction> {
        Self::STANDARD
            .iter()
            .chain(Self::TIME_SERIES.iter())
            .copied()
    }
}

impl core::fmt::Display for AggFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl core::str::FromStr for AggFunction {
    type Err = AggFunctionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggFunction::parse(s).ok_or(AggFunctionParseError)
    }
}

/// Error returned when parsing a name outside the aggregation vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggFunctionParseError;

impl core::fmt::Display for AggFunctionParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown aggregation function")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AggFunctionParseError {}
