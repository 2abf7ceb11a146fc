//! Identifier normalization shared by the request and verify paths

use jt_shared::utils::{is_valid_email, normalize_email};

use crate::errors::AuthError;

/// Lowercase and trim an email identifier, rejecting malformed addresses
pub fn normalize_identifier(raw: &str) -> Result<String, AuthError> {
    let identifier = normalize_email(raw);
    if is_valid_email(&identifier) {
        Ok(identifier)
    } else {
        Err(AuthError::InvalidIdentifier {
            identifier: raw.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier("  A@X.Com ").unwrap(), "a@x.com");
        assert!(matches!(
            normalize_identifier("not an email"),
            Err(AuthError::InvalidIdentifier { .. })
        ));
        assert!(normalize_identifier("").is_err());
    }
}
