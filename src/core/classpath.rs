//! Classpath derivation.
//!
//! A classpath is an ordered search path handed to the compiler. It is read
//! from a delimited string (the `CLASSPATH` environment variable or a
//! configured override) and split on the host's path-list delimiter.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Environment variable holding the host classpath.
pub const CLASSPATH_ENV: &str = "CLASSPATH";

/// Separator between entries of a path list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathListDelimiter {
    /// `;` (Windows family)
    Semicolon,
    /// `:` (Unix family)
    Colon,
}

/// Platform family -> delimiter. Keys are matched case-insensitively.
const PLATFORM_DELIMITERS: &[(&str, PathListDelimiter)] = &[
    ("windows", PathListDelimiter::Semicolon),
    ("darwin", PathListDelimiter::Colon),
    ("macos", PathListDelimiter::Colon),
    ("linux", PathListDelimiter::Colon),
];

impl PathListDelimiter {
    /// Delimiter used when the platform is not in the table.
    pub const DEFAULT: PathListDelimiter = PathListDelimiter::Colon;

    /// Look up the delimiter for a platform family name such as `"Windows"` or `"Darwin"`.
    pub fn for_platform(platform: &str) -> Self {
        PLATFORM_DELIMITERS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(platform))
            .map(|(_, delimiter)| *delimiter)
            .unwrap_or_else(|| {
                tracing::debug!(
                    "unknown platform `{}`, using `{}` as classpath delimiter",
                    platform,
                    Self::DEFAULT
                );
                Self::DEFAULT
            })
    }

    /// Delimiter for the platform this process runs on.
    pub fn host() -> Self {
        Self::for_platform(std::env::consts::OS)
    }

    /// The delimiter character.
    pub fn as_char(&self) -> char {
        match self {
            PathListDelimiter::Semicolon => ';',
            PathListDelimiter::Colon => ':',
        }
    }
}

impl fmt::Display for PathListDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Failure to read the host classpath.
#[derive(Debug, Error)]
pub enum ClasspathError {
    #[error("the CLASSPATH environment variable is not valid unicode")]
    NotUnicode,
}

/// Ordered classpath entries. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<PathBuf>,
}

impl Classpath {
    /// Create an empty classpath.
    pub fn new() -> Self {
        Classpath {
            entries: Vec::new(),
        }
    }

    /// Split a delimited string into entries, preserving order.
    ///
    /// Empty segments (leading, trailing or doubled delimiters) are skipped.
    pub fn parse(value: &str, delimiter: PathListDelimiter) -> Self {
        let entries = value
            .split(delimiter.as_char())
            .filter(|segment| !segment.is_empty())
            .map(PathBuf::from)
            .collect();

        Classpath { entries }
    }

    /// Read the classpath from the `CLASSPATH` environment variable.
    ///
    /// An unset variable yields an empty classpath.
    pub fn from_env(delimiter: PathListDelimiter) -> Result<Self, ClasspathError> {
        match std::env::var(CLASSPATH_ENV) {
            Ok(value) => Ok(Self::parse(&value, delimiter)),
            Err(std::env::VarError::NotPresent) => Ok(Self::new()),
            Err(std::env::VarError::NotUnicode(_)) => Err(ClasspathError::NotUnicode),
        }
    }

    /// Resolve the classpath from an explicit override, falling back to the environment.
    pub fn resolve(
        explicit: Option<&str>,
        delimiter: PathListDelimiter,
    ) -> Result<Self, ClasspathError> {
        match explicit {
            Some(value) => Ok(Self::parse(value, delimiter)),
            None => Self::from_env(delimiter),
        }
    }

    /// Entries in search order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Join the entries back into a single delimited string.
    pub fn join(&self, delimiter: PathListDelimiter) -> String {
        self.entries
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(&delimiter.as_char().to_string())
    }
}
