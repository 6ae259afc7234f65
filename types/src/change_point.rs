//! CHANGE_POINT output type names

/// The kind of change CHANGE_POINT reports in its type column.
///
/// # Examples
///
/// ```
/// use esql_types::ChangePointType;
///
/// assert_eq!(ChangePointType::parse("spike"), Some(ChangePointType::Spike));
/// assert_eq!(ChangePointType::parse("bump"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChangePointType {
    Dip,
    DistributionChange,
    Spike,
    StepChange,
    TrendChange,
}

impl ChangePointType {
    pub const ALL: [ChangePointType; 5] = [
        ChangePointType::Dip,
        ChangePointType::DistributionChange,
        ChangePointType::Spike,
        ChangePointType::StepChange,
        ChangePointType::TrendChange,
    ];

    /// Every type with its meaning, one per line.
    pub const DESCRIPTION: &'static str = "The possible change point types are:\n\n\
        dip: a significant dip occurs at this change point\n\
        distribution_change: the overall distribution of the values has changed significantly\n\
        spike: a significant spike occurs at this point\n\
        step_change: the change indicates a statistically significant step up or down in value distribution\n\
        trend_change: there is an overall trend change occurring at this point";

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChangePointType::Dip => "dip",
            ChangePointType::DistributionChange => "distribution_change",
            ChangePointType::Spike => "spike",
            ChangePointType::StepChange => "step_change",
            ChangePointType::TrendChange => "trend_change",
        }
    }

    /// Parse a type name. Matching is exact, the query language is case-sensitive here.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }
}

impl core::fmt::Display for ChangePointType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for ChangePointType {
    type Err = ChangePointTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChangePointType::parse(s).ok_or(ChangePointTypeParseError)
    }
}

/// Error returned when parsing an unknown change point type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangePointTypeParseError;

impl core::fmt::Display for ChangePointTypeParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown change point type")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ChangePointTypeParseError {}
