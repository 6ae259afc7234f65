//! `NAME = expression` rendering shared by EVAL, ROW, RENAME and ENRICH ... WITH.

use core::fmt::{self, Display, Write};

use compact_str::{CompactString, ToCompactString};
use esql_types::Command;
use smallvec::SmallVec;

use crate::error::{EsqlError, Result};

/// Column assignments for a clause.
///
/// Built from an ordered list of pairs, or from a single name and value:
///
/// ```
/// use esql_core::Expressions;
///
/// let pairs = Expressions::from([("height_feet", "height * 3.281"), ("height_cm", "height * 100")]);
/// assert_eq!(pairs.to_string(), "height_feet = height * 3.281, height_cm = height * 100");
///
/// let single = Expressions::from(("duration_ms", "event_duration/10000.0"));
/// assert_eq!(single.to_string(), "duration_ms = event_duration/10000.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expressions {
    /// Ordered `name = value` pairs, rendered in iteration order
    Pairs(SmallVec<[(CompactString, CompactString); 4]>),
    /// One `name = value` assignment
    Assign(CompactString, CompactString),
}

impl Expressions {
    /// Collects ordered pairs, rendering both sides with `Display`.
    pub fn pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
        V: Display,
    {
        Self::Pairs(
            pairs
                .into_iter()
                .map(|(name, value)| (name.to_compact_string(), value.to_compact_string()))
                .collect(),
        )
    }

    #[inline]
    pub fn assign(name: impl Display, value: impl Display) -> Self {
        Self::Assign(name.to_compact_string(), value.to_compact_string())
    }

    /// Builds an assignment from positional string arguments.
    ///
    /// Exactly two arguments are accepted: the column name and its value.
    pub fn positional(command: Command, args: &[&str]) -> Result<Self> {
        match args {
            [name, value] => Ok(Self::assign(name, value)),
            _ => Err(EsqlError::InvalidExpressionArguments { command }),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Expressions::Pairs(pairs) => pairs.is_empty(),
            Expressions::Assign(..) => false,
        }
    }

    /// Renders with ` AS ` in place of ` = `, the RENAME form.
    ///
    /// Every `=` is rewritten, including any inside the names themselves.
    pub(crate) fn render_renames(&self) -> CompactString {
        self.to_string().replace("=", "AS").into()
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let (pairs, single) = match self {
            Expressions::Pairs(pairs) => (pairs.as_slice(), None),
            Expressions::Assign(name, value) => (&[][..], Some((name.as_str(), value.as_str()))),
        };
        pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .chain(single)
    }
}

impl Display for Expressions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
            f.write_str(" = ")?;
            f.write_str(value)?;
        }
        Ok(())
    }
}

impl<K: Display, V: Display> From<(K, V)> for Expressions {
    fn from((name, value): (K, V)) -> Self {
        Self::assign(name, value)
    }
}

impl<K: Display, V: Display, const N: usize> From<[(K, V); N]> for Expressions {
    fn from(pairs: [(K, V); N]) -> Self {
        Self::pairs(pairs)
    }
}

impl<K: Display, V: Display> From<Vec<(K, V)>> for Expressions {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Self::pairs(pairs)
    }
}

impl<K: Display, V: Display> FromIterator<(K, V)> for Expressions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::pairs(iter)
    }
}

/// Writes `items` separated by `separator`.
pub(crate) fn write_joined<W, I>(buf: &mut W, items: I, separator: &str) -> fmt::Result
where
    W: Write,
    I: IntoIterator,
    I::Item: Display,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            buf.write_str(separator)?;
        }
        write!(buf, "{item}")?;
    }
    Ok(())
}
