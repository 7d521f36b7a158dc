use html::{DomError, NodeId};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    Dom(DomError),
    /// The context handed to `attach` is not an element attached to the document.
    InvalidContext(NodeId),
    InvariantViolation { detail: String },
}

impl fmt::Display for HighlightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightError::Dom(err) => write!(f, "dom error: {err}"),
            HighlightError::InvalidContext(id) => {
                write!(f, "node {} is not an attached element", id.0)
            }
            HighlightError::InvariantViolation { detail } => {
                write!(f, "highlight invariant violated: {detail}")
            }
        }
    }
}

impl std::error::Error for HighlightError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HighlightError::Dom(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomError> for HighlightError {
    fn from(err: DomError) -> Self {
        HighlightError::Dom(err)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read highlighter config: {err}"),
            ConfigError::Parse(err) => write!(f, "invalid highlighter config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}
