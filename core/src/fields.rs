//! Column and metadata field lists.

use core::fmt::{self, Display};

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::expressions::write_joined;

/// A list of column or metadata field names.
///
/// Accepts one string that may already contain commas, or several names that
/// are joined with `", "`:
///
/// ```
/// use esql_core::Fields;
///
/// assert_eq!(Fields::from("column1, column2").to_string(), "column1, column2");
/// assert_eq!(Fields::from(["column1", "column2"]).to_string(), "column1, column2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fields {
    /// Already comma-separated text, written as is
    Joined(CompactString),
    List(SmallVec<[CompactString; 4]>),
}

impl Fields {
    pub fn list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::List(names.into_iter().map(|name| name.as_ref().into()).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Fields::Joined(text) => text.is_empty(),
            Fields::List(names) => names.is_empty(),
        }
    }
}

impl Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fields::Joined(text) => f.write_str(text),
            Fields::List(names) => write_joined(f, names, ", "),
        }
    }
}

impl From<&str> for Fields {
    fn from(text: &str) -> Self {
        Self::Joined(text.into())
    }
}

impl From<String> for Fields {
    fn from(text: String) -> Self {
        Self::Joined(text.into())
    }
}

impl From<&String> for Fields {
    fn from(text: &String) -> Self {
        Self::Joined(text.as_str().into())
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for Fields {
    fn from(names: [S; N]) -> Self {
        Self::list(names)
    }
}

impl<S: AsRef<str>> From<&[S]> for Fields {
    fn from(names: &[S]) -> Self {
        Self::list(names)
    }
}

impl<S: AsRef<str>> From<Vec<S>> for Fields {
    fn from(names: Vec<S>) -> Self {
        Self::list(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_is_verbatim() {
        assert_eq!(Fields::from("`1.field`").to_string(), "`1.field`");
        assert_eq!(
            Fields::from(String::from("_index, _id, _source")).to_string(),
            "_index, _id, _source"
        );
    }

    #[test]
    fn test_list_is_comma_joined() {
        let names = vec!["source.ip", "action", "threat_type"];
        assert_eq!(Fields::from(names).to_string(), "source.ip, action, threat_type");
        assert_eq!(Fields::from(["only"]).to_string(), "only");
    }

    #[test]
    fn test_empty() {
        assert!(Fields::from("").is_empty());
        assert!(Fields::list(Vec::<String>::new()).is_empty());
        assert!(!Fields::from(["a"]).is_empty());
    }
}
