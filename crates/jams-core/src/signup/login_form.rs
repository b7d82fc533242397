//! Rules for the email/password login form.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::security::SecretString;
use crate::signup::validation::{is_valid_email, utf16_len, IssueSink, ValidationResult};

static LOGIN_EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid login email pattern"));

pub const MSG_LOGIN_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_LOGIN_EMAIL_INVALID: &str = "Invalid email format";
pub const MSG_LOGIN_PASSWORD_REQUIRED: &str = "Password is required";

/// Accepted login input.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Validate login input. Unlike the signup rules the email is passed through
/// as typed.
pub fn validate_login_form(email: &str, password: &str) -> ValidationResult<LoginForm> {
    let mut sink = IssueSink::default();

    sink.check(utf16_len(email) >= 1, "email", MSG_LOGIN_EMAIL_REQUIRED);
    sink.check(is_valid_email(email), "email", MSG_LOGIN_EMAIL_INVALID);
    sink.check(
        LOGIN_EMAIL_PATTERN.is_match(email),
        "email",
        MSG_LOGIN_EMAIL_INVALID,
    );
    sink.check(
        utf16_len(password) >= 1,
        "password",
        MSG_LOGIN_PASSWORD_REQUIRED,
    );

    sink.finish(|| LoginForm {
        email: email.to_string(),
        password: SecretString::new(password.to_string()),
    })
}
