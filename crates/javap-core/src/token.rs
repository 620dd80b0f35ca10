//! Owner token validation and paste id generation.

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::error::{PasteError, PasteResult};

/// Length of generated paste ids.
pub const PASTE_ID_LEN: usize = 12;

/// Validate a caller supplied owner token.
///
/// Accepts non-empty tokens made only of ASCII letters and digits.
///
/// # Errors
///
/// Returns [`PasteError::InvalidOwnerToken`] when the token is absent, empty,
/// or contains any other character.
pub fn validate_owner_token(token: Option<&str>) -> PasteResult<&str> {
    match token {
        Some(token) if is_valid_owner_token(token) => Ok(token),
        _ => Err(PasteError::InvalidOwnerToken),
    }
}

/// Whether `token` is usable as an owner token.
#[must_use]
pub fn is_valid_owner_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|byte| byte.is_ascii_alphanumeric())
}

/// Generate a fresh random paste id.
///
/// Ids are alphanumeric and therefore never collide with the reserved
/// `default:` namespace.
#[must_use]
pub fn generate_paste_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(PASTE_ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_empty_and_foreign_characters() {
        for token in [None, Some(""), Some("#"), Some("#anything"), Some("abc def")] {
            assert!(
                matches!(
                    validate_owner_token(token),
                    Err(PasteError::InvalidOwnerToken)
                ),
                "{token:?} must be rejected"
            );
        }
        assert!(!is_valid_owner_token("default:JAVA"));
        assert!(!is_valid_owner_token("tökén"));
    }

    #[test]
    fn accepts_alphanumeric_tokens() -> anyhow::Result<()> {
        assert_eq!(validate_owner_token(Some("abcdef"))?, "abcdef");
        assert_eq!(validate_owner_token(Some("A1b2C3"))?, "A1b2C3");
        Ok(())
    }

    #[test]
    fn generated_ids_are_alphanumeric_and_distinct() {
        let first = generate_paste_id();
        let second = generate_paste_id();
        assert_eq!(first.len(), PASTE_ID_LEN);
        assert!(first.bytes().all(|byte| byte.is_ascii_alphanumeric()));
        assert_ne!(first, second);
    }
}
