//! Error types for Prism

use crate::id::EntityId;
use std::fmt;
use thiserror::Error;

/// Why an indexer token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexParseReason {
    /// The token between the brackets is empty
    Empty,
    /// A leading minus sign; negative indices are never accepted
    Negative,
    /// A character other than an ASCII decimal digit
    InvalidDigit,
    /// The number does not fit the container's key type
    Overflow,
    /// The token is not a valid key of a non-numeric key type
    InvalidKey,
}

impl fmt::Display for IndexParseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IndexParseReason::Empty => "empty indexer",
            IndexParseReason::Negative => "negative indices are not supported",
            IndexParseReason::InvalidDigit => "expected decimal digits only",
            IndexParseReason::Overflow => "value out of range for the key type",
            IndexParseReason::InvalidKey => "not a valid key for the container",
        };
        f.write_str(text)
    }
}

/// The main error type for Prism operations
#[derive(Debug, Error)]
pub enum PrismError {
    #[error("Property path parse error: could not parse indexer value '{token}' ({reason})")]
    IndexParse {
        token: String,
        reason: IndexParseReason,
    },

    #[error("No resolver registered for type `{type_name}` (after `{path}`)")]
    UnsupportedType { type_name: String, path: String },

    #[error("Unknown member `{member}` on type `{type_name}` (after `{path}`)")]
    UnknownMember {
        member: String,
        type_name: String,
        path: String,
    },

    #[error("Type `{type_name}` does not accept indexer `[{token}]` (after `{path}`)")]
    InvalidIndexer {
        type_name: String,
        token: String,
        path: String,
    },

    #[error("Property path is empty")]
    EmptyPath,

    #[error("Malformed property path `{path}`: {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("Type mismatch: expected `{expected}`, got `{found}`")]
    TypeMismatch { expected: String, found: String },

    #[error("Property path `{path}` does not apply to this object (failed at `{step}`)")]
    PathNotApplicable { path: String, step: String },

    #[error("A global resolver registry is already installed")]
    RegistryAlreadyInstalled,

    #[error("Duplicate entity id: {0}")]
    DuplicateKey(EntityId),

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for Prism operations
pub type Result<T> = std::result::Result<T, PrismError>;

impl PrismError {
    /// Attach the consumed path prefix to resolution errors raised by a
    /// resolver, which only sees a single segment.
    pub fn with_path(self, prefix: &str) -> Self {
        match self {
            PrismError::UnsupportedType { type_name, path } if path.is_empty() => {
                PrismError::UnsupportedType {
                    type_name,
                    path: prefix.to_string(),
                }
            }
            PrismError::UnknownMember {
                member,
                type_name,
                path,
            } if path.is_empty() => PrismError::UnknownMember {
                member,
                type_name,
                path: prefix.to_string(),
            },
            PrismError::InvalidIndexer {
                type_name,
                token,
                path,
            } if path.is_empty() => PrismError::InvalidIndexer {
                type_name,
                token,
                path: prefix.to_string(),
            },
            other => other,
        }
    }
}

impl From<toml::de::Error> for PrismError {
    fn from(err: toml::de::Error) -> Self {
        PrismError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for PrismError {
    fn from(err: toml::ser::Error) -> Self {
        PrismError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_parse_message_names_token() {
        let err = PrismError::IndexParse {
            token: "abc".to_string(),
            reason: IndexParseReason::InvalidDigit,
        };
        let message = err.to_string();
        assert!(message.contains("'abc'"));
        assert!(message.contains("decimal digits"));
    }

    #[test]
    fn test_with_path_fills_empty_prefix_only() {
        let err = PrismError::InvalidIndexer {
            type_name: "f32".to_string(),
            token: "1".to_string(),
            path: String::new(),
        }
        .with_path("Transform.Position");
        assert!(matches!(
            err,
            PrismError::InvalidIndexer { ref path, .. } if path == "Transform.Position"
        ));

        let err = PrismError::UnknownMember {
            member: "Foo".to_string(),
            type_name: "Entity".to_string(),
            path: "Transform".to_string(),
        }
        .with_path("Other");
        assert!(matches!(
            err,
            PrismError::UnknownMember { ref path, .. } if path == "Transform"
        ));
    }
}
