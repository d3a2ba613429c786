//! Error types for locale directive parsing.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Location of a token in configuration source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    /// Name of the file (or pseudo-file) the token came from
    pub file: Arc<str>,
    /// 1-based line number
    pub line: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(file: impl Into<Arc<str>>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Errors that can occur while loading a locale configuration.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// A line was missing a token, or a block keyword was not recognized.
    #[error("{position} - Parse error: {message}")]
    Argument { position: Position, message: String },

    /// A `detect` argument did not resolve in the method registry.
    #[error("{position} - Parse error: could not find detect method [{name}]")]
    UnknownMethod { position: Position, name: String },

    /// Every occurrence was consumed without naming a single locale.
    #[error("{position} - Parse error: no available locales specified")]
    NoLocales { position: Position },

    /// A top-level directive other than `locale` appeared in locale source.
    #[error("{position} - Parse error: unknown directive '{name}'")]
    UnknownDirective { position: Position, name: String },

    /// A deserialized configuration broke an invariant.
    #[error("Validation error: {0}")]
    Validation(String),

    /// TOML or JSON decoding failed.
    #[error("Format error: {0}")]
    Format(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocaleError {
    /// Create an argument error with a custom message.
    pub fn argument(position: Position, message: impl Into<String>) -> Self {
        LocaleError::Argument {
            position,
            message: message.into(),
        }
    }

    /// Create an unknown method error naming the offending token.
    pub fn unknown_method(position: Position, name: impl Into<String>) -> Self {
        LocaleError::UnknownMethod {
            position,
            name: name.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        LocaleError::Validation(message.into())
    }

    /// Source position of the error, if it came from directive text.
    pub fn position(&self) -> Option<&Position> {
        match self {
            LocaleError::Argument { position, .. }
            | LocaleError::UnknownMethod { position, .. }
            | LocaleError::NoLocales { position }
            | LocaleError::UnknownDirective { position, .. } => Some(position),
            _ => None,
        }
    }
}

/// Invariant violations found when finalizing a [`LocaleConfigBuilder`].
///
/// These carry no position; the directive parser attaches one when it turns
/// them into a [`LocaleError`].
///
/// [`LocaleConfigBuilder`]: crate::LocaleConfigBuilder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No locale was added.
    #[error("no available locales specified")]
    NoLocales,

    /// No method was added and the registry cannot resolve the default.
    #[error("could not find detect method [header]")]
    MissingDefaultMethod,
}

impl LocaleError {
    /// Attach a source position to a [`BuildError`].
    pub fn from_build(err: BuildError, position: Position) -> Self {
        match err {
            BuildError::NoLocales => LocaleError::NoLocales { position },
            BuildError::MissingDefaultMethod => {
                LocaleError::unknown_method(position, crate::MethodRegistry::DEFAULT_METHOD)
            }
        }
    }
}

impl From<toml::de::Error> for LocaleError {
    fn from(err: toml::de::Error) -> Self {
        LocaleError::Format(format!("TOML parse error: {}", err))
    }
}

impl From<serde_json::Error> for LocaleError {
    fn from(err: serde_json::Error) -> Self {
        LocaleError::Format(format!("JSON parse error: {}", err))
    }
}
