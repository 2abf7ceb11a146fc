//! Email address utilities

/// Normalize an email address: trim surrounding whitespace and lowercase
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the full domain,
/// e.g. `traveller@example.com` becomes `t********@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let mut chars = local.chars();
            let first = chars.next().unwrap_or('*');
            let hidden = chars.count();
            format!("{}{}@{}", first, "*".repeat(hidden), domain)
        }
        _ => "*".repeat(email.chars().count().min(8)),
    }
}
