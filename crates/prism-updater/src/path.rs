//! Property path syntax
//!
//! ```text
//! path    := segment ("." segment)*
//! segment := identifier ["[" token "]"]
//! ```
//!
//! Identifiers may not contain `.`, `[`, `]` or whitespace; there is no
//! escaping. The token is handed untouched to the container's resolver, so
//! it may not contain `.` or brackets either.

use prism_core::{PrismError, Result};
use std::fmt;

/// One parsed segment of a property path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub member: String,
    pub indexer: Option<String>,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.member)?;
        if let Some(token) = &self.indexer {
            write!(f, "[{}]", token)?;
        }
        Ok(())
    }
}

pub(crate) fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c == '.' || c == '[' || c == ']' || c.is_whitespace())
}

fn malformed(path: &str, reason: impl Into<String>) -> PrismError {
    PrismError::MalformedPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Split a property path into segments, validating its syntax only
pub fn parse_path(path: &str) -> Result<Vec<PathSegment>> {
    if path.is_empty() {
        return Err(PrismError::EmptyPath);
    }

    path.split('.')
        .enumerate()
        .map(|(position, segment)| parse_segment(path, position, segment))
        .collect()
}

fn parse_segment(path: &str, position: usize, segment: &str) -> Result<PathSegment> {
    if segment.is_empty() {
        return Err(malformed(path, format!("segment {} is empty", position)));
    }

    let Some(open) = segment.find('[') else {
        if !is_valid_identifier(segment) {
            return Err(malformed(
                path,
                format!("`{}` is not a valid member name", segment),
            ));
        }
        return Ok(PathSegment {
            member: segment.to_string(),
            indexer: None,
        });
    };

    let member = &segment[..open];
    if !is_valid_identifier(member) {
        return Err(malformed(
            path,
            format!("indexer in `{}` must follow a member name", segment),
        ));
    }

    let rest = &segment[open + 1..];
    let Some(token) = rest.strip_suffix(']') else {
        return Err(malformed(
            path,
            format!("`{}` is missing a closing `]`", segment),
        ));
    };
    if token.contains('[') || token.contains(']') {
        return Err(malformed(
            path,
            format!("`{}` must carry exactly one indexer", segment),
        ));
    }

    Ok(PathSegment {
        member: member.to_string(),
        indexer: Some(token.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(member: &str, indexer: Option<&str>) -> PathSegment {
        PathSegment {
            member: member.to_string(),
            indexer: indexer.map(String::from),
        }
    }

    #[test]
    fn test_parse_members_and_indexers() {
        let segments = parse_path("Children[2].Name").unwrap();
        assert_eq!(
            segments,
            vec![segment("Children", Some("2")), segment("Name", None)]
        );

        let segments = parse_path("Transform.Position.Y").unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].to_string(), "Y");
    }

    #[test]
    fn test_empty_token_is_left_to_the_resolver() {
        let segments = parse_path("Children[]").unwrap();
        assert_eq!(segments, vec![segment("Children", Some(""))]);
    }

    #[test]
    fn test_empty_path() {
        assert!(matches!(parse_path(""), Err(PrismError::EmptyPath)));
    }

    #[test]
    fn test_malformed_paths() {
        for bad in [
            ".Name",
            "Name.",
            "A..B",
            "[0]",
            "Children[0",
            "Children[0]x",
            "Children[0][1]",
            "Chil dren",
            "Name]",
        ] {
            assert!(
                matches!(parse_path(bad), Err(PrismError::MalformedPath { .. })),
                "expected `{}` to be rejected",
                bad
            );
        }
    }
}
