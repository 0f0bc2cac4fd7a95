//! E-mail address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address check; deliverability is proven by the verification mail
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$").unwrap()
});

/// Normalize an e-mail address for storage and cache keys
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an e-mail address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Mask an e-mail address for logs (e.g., jo***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        _ => "***".to_string(),
    }
}
