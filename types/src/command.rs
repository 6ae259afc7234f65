//! Pipeline commands of the query language
//!
//! Every stage of a pipe-delimited query starts with one of these keywords.
//! [`Command`] is the single source of truth for the keyword spelling and for
//! which commands may open a pipeline.

/// A clause kind of the query language.
///
/// # Examples
///
/// ```
/// use esql_types::Command;
///
/// assert_eq!(Command::LookupJoin.keyword(), "LOOKUP JOIN");
/// assert!(Command::Ts.is_source());
/// assert!(!Command::Where.is_source());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Command {
    /// `FROM index_pattern`
    From,
    /// `ROW column = value, ...`
    Row,
    /// `TS index_pattern`, the time series flavour of FROM
    Ts,
    /// `SHOW INFO`
    Show,
    Where,
    Sort,
    Limit,
    Eval,
    Keep,
    Drop,
    Rename,
    Dissect,
    Grok,
    Stats,
    Enrich,
    /// `LOOKUP JOIN index ON field`
    LookupJoin,
    ChangePoint,
    Fork,
    Fuse,
    /// Directive attached to FROM, never a stage of its own
    Metadata,
}

impl Command {
    /// Commands that can start a pipeline.
    pub const SOURCES: [Command; 4] = [Command::From, Command::Row, Command::Show, Command::Ts];

    /// Returns `true` if this command can start a pipeline.
    #[inline]
    #[must_use]
    pub const fn is_source(&self) -> bool {
        matches!(
            self,
            Command::From | Command::Row | Command::Show | Command::Ts
        )
    }

    /// The upper-cased keyword written into the query.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Command::From => "FROM",
            Command::Row => "ROW",
            Command::Ts => "TS",
            Command::Show => "SHOW",
            Command::Where => "WHERE",
            Command::Sort => "SORT",
            Command::Limit => "LIMIT",
            Command::Eval => "EVAL",
            Command::Keep => "KEEP",
            Command::Drop => "DROP",
            Command::Rename => "RENAME",
            Command::Dissect => "DISSECT",
            Command::Grok => "GROK",
            Command::Stats => "STATS",
            Command::Enrich => "ENRICH",
            Command::LookupJoin => "LOOKUP JOIN",
            Command::ChangePoint => "CHANGE_POINT",
            Command::Fork => "FORK",
            Command::Fuse => "FUSE",
            Command::Metadata => "METADATA",
        }
    }

    /// Parse a command from its keyword (case-insensitive)
    ///
    /// ```
    /// use esql_types::Command;
    ///
    /// assert_eq!(Command::parse("where"), Some(Command::Where));
    /// assert_eq!(Command::parse("lookup join"), Some(Command::LookupJoin));
    /// assert_eq!(Command::parse("select"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        ALL.iter()
            .copied()
            .find(|command| command.keyword().eq_ignore_ascii_case(s))
    }
}

const ALL: [Command; 20] = [
    Command::From,
    Command::Row,
    Command::Ts,
    Command::Show,
    Command::Where,
    Command::Sort,
    Command::Limit,
    Command::Eval,
    Command::Keep,
    Command::Drop,
    Command::Rename,
    Command::Dissect,
    Command::Grok,
    Command::Stats,
    Command::Enrich,
    Command::LookupJoin,
    Command::ChangePoint,
    Command::Fork,
    Command::Fuse,
    Command::Metadata,
];

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.keyword())
    }
}

impl core::str::FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s).ok_or(CommandParseError)
    }
}

/// Error returned when parsing an unknown command keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandParseError;

impl core::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown command")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("FROM"), Some(Command::From));
        assert_eq!(Command::parse("from"), Some(Command::From));
        assert_eq!(Command::parse("change_point"), Some(Command::ChangePoint));
        assert_eq!(Command::parse("LOOKUP JOIN"), Some(Command::LookupJoin));

        assert_eq!(Command::parse("lookup_join"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_every_keyword_parses_back() {
        for command in ALL {
            assert_eq!(command.keyword().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn test_sources() {
        for command in ALL {
            assert_eq!(command.is_source(), Command::SOURCES.contains(&command));
        }
    }

    #[test]
    fn test_command_display() {
        assert_eq!(format!("{}", Command::ChangePoint), "CHANGE_POINT");
        assert_eq!(format!("{}", Command::Ts), "TS");
    }
}
