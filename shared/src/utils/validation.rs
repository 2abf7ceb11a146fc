//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Anything@anything.anything, no whitespace
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"));

// Optional leading '+', then 7 to 15 digits
static MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("static mobile pattern"));

/// Check whether an already-normalized string looks like an email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Strip spaces, dashes and brackets from a mobile number
pub fn normalize_mobile(mobile: &str) -> String {
    mobile
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check whether a mobile number is plausible after normalization
pub fn is_valid_mobile(mobile: &str) -> bool {
    MOBILE_REGEX.is_match(&normalize_mobile(mobile))
}

/// Check that a value is present after trimming
pub fn is_present(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}
