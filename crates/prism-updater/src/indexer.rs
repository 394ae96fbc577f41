//! Indexer token parsing
//!
//! The text between the brackets of a path segment is converted into the key
//! type of the container being indexed. Integer keys follow one fixed,
//! locale-independent format:
//!
//! - ASCII decimal digits only, leading zeros allowed (`"03"` is 3)
//! - no surrounding whitespace, no sign, no group separators
//! - a leading `-` is reported as [`IndexParseReason::Negative`]; negative
//!   indices are never accepted

use prism_core::{EntityId, IndexParseReason, PrismError, Result};

/// A key type that can be parsed from an indexer token
pub trait IndexKey: Sized {
    fn parse_key(token: &str) -> Result<Self>;
}

/// Parse an indexer token as the key type `K`
pub fn parse_index<K: IndexKey>(token: &str) -> Result<K> {
    K::parse_key(token)
}

fn index_error(token: &str, reason: IndexParseReason) -> PrismError {
    PrismError::IndexParse {
        token: token.to_string(),
        reason,
    }
}

fn check_digits(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(index_error(token, IndexParseReason::Empty));
    }
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }
    match token.strip_prefix('-') {
        Some(rest) if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) => {
            Err(index_error(token, IndexParseReason::Negative))
        }
        _ => Err(index_error(token, IndexParseReason::InvalidDigit)),
    }
}

macro_rules! impl_unsigned_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IndexKey for $ty {
                fn parse_key(token: &str) -> Result<Self> {
                    check_digits(token)?;
                    // Digits only at this point, so a failure can only be overflow
                    token
                        .parse::<$ty>()
                        .map_err(|_| index_error(token, IndexParseReason::Overflow))
                }
            }
        )*
    };
}

impl_unsigned_key!(u8, u16, u32, u64, usize);

impl IndexKey for String {
    fn parse_key(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(index_error(token, IndexParseReason::Empty));
        }
        Ok(token.to_string())
    }
}

impl IndexKey for EntityId {
    fn parse_key(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(index_error(token, IndexParseReason::Empty));
        }
        EntityId::parse_str(token).ok_or_else(|| index_error(token, IndexParseReason::InvalidKey))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_of<K: IndexKey + std::fmt::Debug>(token: &str) -> IndexParseReason {
        match parse_index::<K>(token) {
            Err(PrismError::IndexParse { token: t, reason }) => {
                assert_eq!(t, token);
                reason
            }
            other => panic!("expected IndexParse for {:?}, got {:?}", token, other),
        }
    }

    #[test]
    fn test_plain_and_leading_zero() {
        assert_eq!(parse_index::<usize>("3").unwrap(), 3);
        assert_eq!(parse_index::<usize>("03").unwrap(), 3);
        assert_eq!(parse_index::<usize>("0").unwrap(), 0);
        assert_eq!(parse_index::<u32>("4294967295").unwrap(), u32::MAX);
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert_eq!(reason_of::<usize>("abc"), IndexParseReason::InvalidDigit);
        assert_eq!(reason_of::<usize>("1.5"), IndexParseReason::InvalidDigit);
        assert_eq!(reason_of::<usize>("1,000"), IndexParseReason::InvalidDigit);
        assert_eq!(reason_of::<usize>("+1"), IndexParseReason::InvalidDigit);
    }

    #[test]
    fn test_negative_index_is_rejected() {
        assert_eq!(reason_of::<usize>("-1"), IndexParseReason::Negative);
        assert_eq!(reason_of::<u8>("-0"), IndexParseReason::Negative);
        // A lone minus is not a number at all
        assert_eq!(reason_of::<usize>("-"), IndexParseReason::InvalidDigit);
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        assert_eq!(reason_of::<usize>(" 3"), IndexParseReason::InvalidDigit);
        assert_eq!(reason_of::<usize>("3 "), IndexParseReason::InvalidDigit);
    }

    #[test]
    fn test_empty_and_overflow() {
        assert_eq!(reason_of::<usize>(""), IndexParseReason::Empty);
        assert_eq!(reason_of::<u8>("256"), IndexParseReason::Overflow);
        assert_eq!(
            reason_of::<u64>("99999999999999999999999"),
            IndexParseReason::Overflow
        );
    }

    #[test]
    fn test_string_and_entity_id_keys() {
        assert_eq!(parse_index::<String>("wheel").unwrap(), "wheel");
        assert_eq!(reason_of::<String>(""), IndexParseReason::Empty);

        let id = EntityId::from_u128(42);
        assert_eq!(parse_index::<EntityId>(&id.to_string()).unwrap(), id);
        assert_eq!(reason_of::<EntityId>("42"), IndexParseReason::InvalidKey);

        // Only the hyphenated form addresses an entity key
        let simple = id.to_string().replace('-', "");
        assert_eq!(reason_of::<EntityId>(&simple), IndexParseReason::InvalidKey);
        let braced = format!("{{{}}}", id);
        assert_eq!(reason_of::<EntityId>(&braced), IndexParseReason::InvalidKey);
    }
}
