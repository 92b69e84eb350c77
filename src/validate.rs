use once_cell::sync::Lazy;
use regex::Regex;

static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());
static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").unwrap());
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());
static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Same rules the backend enforces on signup and reset: at least 8
/// characters with an uppercase letter, a lowercase letter and a digit.
/// Checked client-side so bad input never leaves the form.
pub fn is_strong_password(password: &str) -> bool {
    password.len() >= 8
        && UPPERCASE.is_match(password)
        && LOWERCASE.is_match(password)
        && DIGIT.is_match(password)
}

pub fn is_plausible_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

/// Error text mirroring the backend's wording, shown next to the form.
pub fn password_requirements() -> &'static str {
    "Password must contain at least one uppercase letter, one lowercase letter, \
     and one digit and be longer than 8 characters"
}
