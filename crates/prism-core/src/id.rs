//! Stable entity identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A stable entity identifier that persists across save/load cycles.
///
/// Identifiers are UUIDs so that entities created in different documents
/// never collide. The ordering is the byte ordering of the UUID, which is
/// the sort key of an entity collection.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Create a new random EntityId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build an identifier from a 128-bit value (for tests and fixtures)
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Parse the hyphenated UUID form only (`8-4-4-4-12` hex digits).
    ///
    /// Simple, braced and `urn:uuid:` forms are rejected.
    pub fn parse_str(input: &str) -> Option<Self> {
        if !is_hyphenated(input) {
            return None;
        }
        Uuid::parse_str(input).ok().map(Self)
    }
}

fn is_hyphenated(input: &str) -> bool {
    input.len() == 36
        && input.bytes().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lenient parsing: accepts every textual form `uuid` understands
impl FromStr for EntityId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
