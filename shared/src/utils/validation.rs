//! Common validation utilities for account and scheduling data

/// Normalize a raw email address: trim surrounding whitespace and lowercase
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check if an email address is plausibly valid (basic shape check)
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Check if an email address belongs to the Gmail domain
///
/// Registration policy accepts Gmail accounts only.
pub fn is_gmail_address(email: &str) -> bool {
    email.ends_with("@gmail.com")
}

/// Check the minimum password policy (at least 8 characters)
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
}

/// Format a `DD_MM_YYYY` date key for display as `DD/MM/YYYY`
///
/// Keys that do not contain underscores are returned unchanged so that
/// free-form values still render something sensible in emails.
pub fn format_date_key(date_key: &str) -> String {
    if date_key.contains('_') {
        date_key.replace('_', "/")
    } else {
        date_key.to_string()
    }
}

/// Today's booking date key in `DD_MM_YYYY` form (UTC)
pub fn today_date_key() -> String {
    chrono::Utc::now().format("%d_%m_%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_email_case_and_whitespace() {
        assert_eq!(normalize_email("  Alice@GMAIL.Com "), "alice@gmail.com");
    }

    #[test]
    fn validates_email_shape() {
        assert!(is_valid_email("a@gmail.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email("a@nodot"));
    }

    #[test]
    fn gmail_policy_checks_domain_suffix() {
        assert!(is_gmail_address("a@gmail.com"));
        assert!(!is_gmail_address("a@outlook.com"));
        assert!(!is_gmail_address("a@gmail.com.evil.org"));
    }

    #[test]
    fn password_policy_counts_characters() {
        assert!(is_strong_password("password123"));
        assert!(is_strong_password("exactly8"));
        assert!(!is_strong_password("short"));
    }

    #[test]
    fn formats_date_key_for_display() {
        assert_eq!(format_date_key("15_03_2025"), "15/03/2025");
        assert_eq!(format_date_key("tomorrow"), "tomorrow");
    }
}
