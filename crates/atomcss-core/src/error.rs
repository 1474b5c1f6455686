//! Error types for configuration loading and compilation.

use std::fmt;
use std::path::PathBuf;

/// Result type alias for atomcss operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A section of the configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Design tokens (`variables`).
    Variables,
    /// Responsive thresholds (`breakpoints`).
    Breakpoints,
    /// Always-emitted raw selectors (`plainSelectors`).
    PlainSelectors,
    /// Named style macros (`components`).
    Components,
}

impl Section {
    /// The section's key as written in the configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Variables => "variables",
            Self::Breakpoints => "breakpoints",
            Self::PlainSelectors => "plainSelectors",
            Self::Components => "components",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in the configuration a problem was found.
///
/// `offset` is a byte offset into the shorthand body of the definition named
/// by `key`, when the problem can be pinned to a single token. When
/// `breakpoint` is set, the body is that breakpoint's section of a structured
/// definition rather than its `selectors` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub section: Section,
    pub key: String,
    pub breakpoint: Option<String>,
    pub offset: Option<usize>,
}

impl Location {
    /// Location of a whole definition.
    pub fn new(section: Section, key: impl Into<String>) -> Self {
        Self {
            section,
            key: key.into(),
            breakpoint: None,
            offset: None,
        }
    }

    /// Location of a section as a whole.
    pub fn section(section: Section) -> Self {
        Self::new(section, "")
    }

    /// The same definition, narrowed to one of its breakpoint sections.
    pub fn with_breakpoint(&self, breakpoint: impl Into<String>) -> Self {
        Self {
            breakpoint: Some(breakpoint.into()),
            offset: None,
            ..self.clone()
        }
    }

    /// The same body, pinned to a byte offset within it.
    pub fn with_offset(&self, offset: usize) -> Self {
        Self {
            offset: Some(offset),
            ..self.clone()
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            return write!(f, "{}", self.section);
        }
        write!(f, "{}[{}]", self.section, self.key)?;
        if let Some(breakpoint) = &self.breakpoint {
            write!(f, ".breakpoints[{breakpoint}]")?;
        }
        if let Some(offset) = self.offset {
            write!(f, "@{offset}")?;
        }
        Ok(())
    }
}

/// Classification of errors, independent of their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Parse,
    UnresolvedVariable,
    VariableCycle,
    UnknownBreakpoint,
    MacroCycle,
    UnknownMacroReference,
    Io,
}

/// What exactly was wrong with a shorthand token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The token has no `property:value` separator.
    MissingColon,
    /// Nothing before the separating colon.
    EmptyProperty,
    /// Nothing after the separating colon.
    EmptyValue,
    /// A variant prefix that is neither a breakpoint nor a pseudo-class.
    UnknownPrefix,
    /// More than one breakpoint applies to the same declaration.
    ConflictingBreakpoints,
    /// A `__` escape with nothing on one side, or an ambiguous underscore run.
    UnterminatedEscape,
    /// A quote opened inside the token is never closed.
    UnterminatedQuote,
    /// Parentheses or brackets do not balance.
    UnbalancedBracket,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::MissingColon => "expected `property:value`",
            Self::EmptyProperty => "empty property name",
            Self::EmptyValue => "empty value",
            Self::UnknownPrefix => "unknown breakpoint or pseudo-class prefix",
            Self::ConflictingBreakpoints => "more than one breakpoint prefix",
            Self::UnterminatedEscape => "unterminated `__` escape",
            Self::UnterminatedQuote => "unterminated quoted string",
            Self::UnbalancedBracket => "unbalanced parentheses or brackets",
        };
        f.write_str(message)
    }
}

/// Errors raised while loading a configuration or resolving its definitions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed, missing or duplicate definitions.
    #[error("invalid configuration at {location}: {message}")]
    Config { message: String, location: Location },

    /// Malformed shorthand declaration.
    #[error("cannot parse `{token}` at {location}: {kind}")]
    Parse {
        kind: ParseErrorKind,
        token: String,
        location: Location,
    },

    /// A `$name` reference with no entry in the variable table.
    #[error("unresolved variable `${name}` at {location}")]
    UnresolvedVariable { name: String, location: Location },

    /// Variables that reference each other, or nest deeper than the limit.
    #[error("variable cycle {} at {location}", .chain.join(" -> "))]
    VariableCycle { chain: Vec<String>, location: Location },

    /// A breakpoint name missing from the breakpoint table.
    #[error("unknown breakpoint `{name}` at {location}")]
    UnknownBreakpoint { name: String, location: Location },

    /// Components whose selector chains loop back on themselves.
    #[error("component chain cycle {} at {location}", .cycle.join(" -> "))]
    MacroCycle { cycle: Vec<String>, location: Location },

    /// A selector chain naming a component that does not exist.
    #[error("component `{referenced_by}` chains unknown component `{name}` at {location}")]
    UnknownMacroReference {
        name: String,
        referenced_by: String,
        location: Location,
    },

    /// The configuration could not be decoded.
    #[error("failed to decode configuration from {origin}: {message}")]
    Deserialize { origin: String, message: String },

    /// File I/O error.
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>, location: Location) -> Self {
        Self::Config {
            message: message.into(),
            location,
        }
    }

    /// Create a shorthand parse error.
    pub fn parse(kind: ParseErrorKind, token: impl Into<String>, location: Location) -> Self {
        Self::Parse {
            kind,
            token: token.into(),
            location,
        }
    }

    /// Create an unresolved variable error.
    pub fn unresolved_variable(name: impl Into<String>, location: Location) -> Self {
        Self::UnresolvedVariable {
            name: name.into(),
            location,
        }
    }

    /// Create a variable cycle error.
    pub fn variable_cycle(chain: Vec<String>, location: Location) -> Self {
        Self::VariableCycle { chain, location }
    }

    /// Create an unknown breakpoint error.
    pub fn unknown_breakpoint(name: impl Into<String>, location: Location) -> Self {
        Self::UnknownBreakpoint {
            name: name.into(),
            location,
        }
    }

    /// Create a component chain cycle error.
    pub fn macro_cycle(cycle: Vec<String>, location: Location) -> Self {
        Self::MacroCycle { cycle, location }
    }

    /// Create an unknown chain reference error.
    pub fn unknown_macro_reference(
        name: impl Into<String>,
        referenced_by: impl Into<String>,
        location: Location,
    ) -> Self {
        Self::UnknownMacroReference {
            name: name.into(),
            referenced_by: referenced_by.into(),
            location,
        }
    }

    /// Create a decoding error.
    pub fn deserialize(origin: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Deserialize {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config { .. } | Self::Deserialize { .. } => ErrorKind::Config,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::UnresolvedVariable { .. } => ErrorKind::UnresolvedVariable,
            Self::VariableCycle { .. } => ErrorKind::VariableCycle,
            Self::UnknownBreakpoint { .. } => ErrorKind::UnknownBreakpoint,
            Self::MacroCycle { .. } => ErrorKind::MacroCycle,
            Self::UnknownMacroReference { .. } => ErrorKind::UnknownMacroReference,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Where in the configuration the error points, if anywhere.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Config { location, .. }
            | Self::Parse { location, .. }
            | Self::UnresolvedVariable { location, .. }
            | Self::VariableCycle { location, .. }
            | Self::UnknownBreakpoint { location, .. }
            | Self::MacroCycle { location, .. }
            | Self::UnknownMacroReference { location, .. } => Some(location),
            Self::Deserialize { .. } | Self::Io { .. } => None,
        }
    }
}
