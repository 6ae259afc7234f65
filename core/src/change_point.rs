//! CHANGE_POINT arguments.

use compact_str::{CompactString, format_compact};
use esql_types::ChangePointType;

use crate::error::{EsqlError, Result};

const DEFAULT_TYPE_NAME: &str = "type";
const DEFAULT_PVALUE_NAME: &str = "pvalue";

/// `column [ON key] [AS type_name, pvalue_name]`
///
/// ```
/// use esql_core::ChangePoint;
///
/// let spec = ChangePoint::new("my_column").key("my_key").type_name("spike").pvalue_name("pvalue");
/// assert_eq!(
///     esql_core::from("sample_data").change_point(spec).unwrap().query().unwrap(),
///     "FROM sample_data | CHANGE_POINT my_column ON my_key AS spike, pvalue"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePoint {
    column: CompactString,
    key: Option<CompactString>,
    type_name: Option<CompactString>,
    pvalue_name: Option<CompactString>,
}

impl ChangePoint {
    pub fn new(column: impl AsRef<str>) -> Self {
        Self {
            column: column.as_ref().into(),
            key: None,
            type_name: None,
            pvalue_name: None,
        }
    }

    /// Column to order the values by, `@timestamp` when unset.
    pub fn key(mut self, key: impl AsRef<str>) -> Self {
        self.key = Some(key.as_ref().into());
        self
    }

    /// Must name one of the [`ChangePointType`]s.
    pub fn type_name(mut self, name: impl AsRef<str>) -> Self {
        self.type_name = Some(name.as_ref().into());
        self
    }

    pub fn pvalue_name(mut self, name: impl AsRef<str>) -> Self {
        self.pvalue_name = Some(name.as_ref().into());
        self
    }

    pub(crate) fn render(&self) -> Result<CompactString> {
        if let Some(name) = &self.type_name {
            if ChangePointType::parse(name).is_none() {
                return Err(EsqlError::InvalidChangePointType {
                    name: name.to_string(),
                });
            }
        }

        let mut out = self.column.clone();
        if let Some(key) = &self.key {
            out.push_str(" ON ");
            out.push_str(key);
        }
        if self.type_name.is_some() || self.pvalue_name.is_some() {
            let type_name = self.type_name.as_deref().unwrap_or(DEFAULT_TYPE_NAME);
            let pvalue_name = self.pvalue_name.as_deref().unwrap_or(DEFAULT_PVALUE_NAME);
            out.push_str(&format_compact!(" AS {type_name}, {pvalue_name}"));
        }
        Ok(out)
    }
}

impl From<&str> for ChangePoint {
    fn from(column: &str) -> Self {
        Self::new(column)
    }
}

impl From<String> for ChangePoint {
    fn from(column: String) -> Self {
        Self::new(column)
    }
}
