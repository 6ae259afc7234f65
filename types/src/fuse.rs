//! FUSE scoring methods

/// How FUSE merges the scores of FORK branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FuseMethod {
    /// Reciprocal rank fusion, the query language default
    #[default]
    Rrf,
    /// Linear combination of the branch scores
    Linear,
}

impl FuseMethod {
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            FuseMethod::Rrf => "RRF",
            FuseMethod::Linear => "LINEAR",
        }
    }

    /// Parse a scoring method (case-insensitive)
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("rrf") {
            Some(FuseMethod::Rrf)
        } else if s.eq_ignore_ascii_case("linear") {
            Some(FuseMethod::Linear)
        } else {
            None
        }
    }
}

impl core::fmt::Display for FuseMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword())
    }
}
