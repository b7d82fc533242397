//! Signup field rules.
//!
//! Each rule runs all of its checks against the raw input in a fixed order and
//! reports every failing check, so a field can carry more than one issue.
//! Normalization (trimming, lowercasing) only applies to accepted values.
//! Lengths are counted in UTF-16 code units, the unit the mobile client counts in.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::signup::{FormStep, SignupFormData, SignupFormPatch};

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid name pattern"));

// Local part and domain of an address. Leading dots and `..` are checked
// separately since the regex engine has no look-around.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("valid email pattern")
});

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+61\s?4|04)[0-9]{8}$").expect("valid phone pattern"));

const PASSWORD_SPECIALS: &str = "@$.!%*?&";

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 50;
pub const EMAIL_MIN: usize = 5;
pub const EMAIL_MAX: usize = 254;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;
pub const SCHOOL_MIN: usize = 2;
pub const SCHOOL_MAX: usize = 100;

pub const MSG_NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
pub const MSG_NAME_TOO_LONG: &str = "Name must not exceed 50 characters";
pub const MSG_NAME_CHARSET: &str = "Name can only contain letters and spaces";
pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MSG_EMAIL_TOO_SHORT: &str = "Email must be at least 5 characters";
pub const MSG_EMAIL_TOO_LONG: &str = "Email must not exceed 254 characters";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const MSG_PASSWORD_TOO_LONG: &str = "Password must not exceed 128 characters";
pub const MSG_PASSWORD_COMPOSITION: &str = "Password must contain at least one lowercase letter, one uppercase letter, one number, and one special character";
pub const MSG_SCHOOL_TOO_SHORT: &str = "School name must be at least 2 characters";
pub const MSG_SCHOOL_TOO_LONG: &str = "School name must not exceed 100 characters";
pub const MSG_PHONE_FORMAT: &str =
    "Please enter a valid Australian mobile number (e.g., 0412345678 or +61 412345678)";
pub const MSG_PHONE_LENGTH: &str = "Australian mobile number must be 10 digits (04XXXXXXXX) or 12 digits with country code (+614XXXXXXXX)";

/// A field of the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Password,
    School,
    PhoneNumber,
}

impl FormField {
    /// Field order used when reporting whole-form issues.
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Email,
        FormField::Password,
        FormField::School,
        FormField::PhoneNumber,
    ];

    /// Name of the field as it appears in issue paths and persisted data.
    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Password => "password",
            FormField::School => "school",
            FormField::PhoneNumber => "phoneNumber",
        }
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == segment)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub path: Vec<String>,
    pub message: String,
}

impl FieldIssue {
    pub fn new(path: &str, message: &str) -> Self {
        Self {
            path: vec![path.to_string()],
            message: message.to_string(),
        }
    }

    pub fn for_field(field: FormField, message: &str) -> Self {
        Self::new(field.as_str(), message)
    }

    /// The signup field this issue belongs to, if the path names one.
    pub fn field(&self) -> Option<FormField> {
        self.path
            .first()
            .and_then(|segment| FormField::from_path_segment(segment))
    }
}

/// Non-empty list of issues produced by a failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<FieldIssue> {
        self.issues
    }

    /// The message to display next to `field`: the first issue reported for it.
    pub fn first_message_for(&self, field: FormField) -> Option<&str> {
        self.issues
            .iter()
            .find(|issue| issue.field() == Some(field))
            .map(|issue| issue.message.as_str())
    }

    /// Distinct failing paths, in report order.
    pub fn paths(&self) -> Vec<&[String]> {
        let mut paths: Vec<&[String]> = Vec::new();
        for issue in &self.issues {
            if !paths.contains(&issue.path.as_slice()) {
                paths.push(issue.path.as_slice());
            }
        }
        paths
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.issues.first() {
            Some(issue) => f.write_str(&issue.message),
            None => f.write_str("validation failed"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

/// Outcome of a validation call: normalized data or every issue found.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Collects issues for one validation call.
#[derive(Debug, Default)]
pub(crate) struct IssueSink {
    issues: Vec<FieldIssue>,
}

impl IssueSink {
    pub(crate) fn push(&mut self, path: &str, message: &str) {
        self.issues.push(FieldIssue::new(path, message));
    }

    pub(crate) fn check(&mut self, ok: bool, path: &str, message: &str) {
        if !ok {
            self.push(path, message);
        }
    }

    pub(crate) fn finish<T>(self, output: impl FnOnce() -> T) -> ValidationResult<T> {
        if self.issues.is_empty() {
            Ok(output())
        } else {
            Err(ValidationErrors {
                issues: self.issues,
            })
        }
    }
}

/// Length as the mobile client measures it.
pub(crate) fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

pub(crate) fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_PATTERN.is_match(value)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn has_password_composition(value: &str) -> bool {
    let allowed_first = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c);
    // Character classes are only looked for on the first line.
    let first_line = value.split(is_line_terminator).next().unwrap_or_default();

    value.chars().next().is_some_and(allowed_first)
        && first_line.chars().any(|c| c.is_ascii_lowercase())
        && first_line.chars().any(|c| c.is_ascii_uppercase())
        && first_line.chars().any(|c| c.is_ascii_digit())
        && first_line.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

fn check_name(value: &str, sink: &mut IssueSink) {
    let path = FormField::Name.as_str();
    let len = utf16_len(value);
    sink.check(len >= NAME_MIN, path, MSG_NAME_TOO_SHORT);
    sink.check(len <= NAME_MAX, path, MSG_NAME_TOO_LONG);
    sink.check(NAME_PATTERN.is_match(value), path, MSG_NAME_CHARSET);
}

fn check_email(value: &str, sink: &mut IssueSink) {
    let path = FormField::Email.as_str();
    let len = utf16_len(value);
    sink.check(is_valid_email(value), path, MSG_EMAIL_INVALID);
    sink.check(len >= EMAIL_MIN, path, MSG_EMAIL_TOO_SHORT);
    sink.check(len <= EMAIL_MAX, path, MSG_EMAIL_TOO_LONG);
}

fn check_password(value: &str, sink: &mut IssueSink) {
    let path = FormField::Password.as_str();
    let len = utf16_len(value);
    sink.check(len >= PASSWORD_MIN, path, MSG_PASSWORD_TOO_SHORT);
    sink.check(len <= PASSWORD_MAX, path, MSG_PASSWORD_TOO_LONG);
    sink.check(has_password_composition(value), path, MSG_PASSWORD_COMPOSITION);
}

fn check_school(value: &str, sink: &mut IssueSink) {
    let path = FormField::School.as_str();
    let len = utf16_len(value);
    sink.check(len >= SCHOOL_MIN, path, MSG_SCHOOL_TOO_SHORT);
    sink.check(len <= SCHOOL_MAX, path, MSG_SCHOOL_TOO_LONG);
}

fn check_phone(value: &str, sink: &mut IssueSink) {
    let path = FormField::PhoneNumber.as_str();
    sink.check(PHONE_PATTERN.is_match(value), path, MSG_PHONE_FORMAT);

    // Implied by the pattern above; kept as an independent check so both
    // messages are reported for malformed numbers.
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let compact_len = utf16_len(&compact);
    sink.check(compact_len == 10 || compact_len == 12, path, MSG_PHONE_LENGTH);
}

fn check_field(field: FormField, value: &str, sink: &mut IssueSink) {
    match field {
        FormField::Name => check_name(value, sink),
        FormField::Email => check_email(value, sink),
        FormField::Password => check_password(value, sink),
        FormField::School => check_school(value, sink),
        FormField::PhoneNumber => check_phone(value, sink),
    }
}

/// The value stored once a field passes.
fn normalize(field: FormField, value: &str) -> String {
    match field {
        FormField::Name | FormField::School => value.trim().to_string(),
        FormField::Email => value.to_lowercase().trim().to_string(),
        FormField::Password | FormField::PhoneNumber => value.to_string(),
    }
}

/// Validate a single field and return its normalized value.
pub fn validate_field(field: FormField, value: &str) -> ValidationResult<String> {
    let mut sink = IssueSink::default();
    check_field(field, value, &mut sink);
    sink.finish(|| normalize(field, value))
}

/// Raw input for one wizard step.
#[derive(Clone, PartialEq, Eq)]
pub enum StepInput {
    Name(String),
    Email(String),
    Password(String),
    School(String),
    Phone(String),
}

impl StepInput {
    /// Wrap a raw value as input for `step`.
    pub fn for_step(step: FormStep, value: impl Into<String>) -> Self {
        let value = value.into();
        match step {
            FormStep::Name => StepInput::Name(value),
            FormStep::Email => StepInput::Email(value),
            FormStep::Password => StepInput::Password(value),
            FormStep::School => StepInput::School(value),
            FormStep::Phone => StepInput::Phone(value),
        }
    }

    /// Take the value `step` collects out of already gathered form data.
    pub fn from_form(step: FormStep, data: &SignupFormData) -> Self {
        Self::for_step(step, data.get(step.field()))
    }

    pub fn step(&self) -> FormStep {
        match self {
            StepInput::Name(_) => FormStep::Name,
            StepInput::Email(_) => FormStep::Email,
            StepInput::Password(_) => FormStep::Password,
            StepInput::School(_) => FormStep::School,
            StepInput::Phone(_) => FormStep::Phone,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            StepInput::Name(value)
            | StepInput::Email(value)
            | StepInput::Password(value)
            | StepInput::School(value)
            | StepInput::Phone(value) => value,
        }
    }

    /// Apply this step's rule; on success the patch carries only this step's field.
    pub fn validate(&self) -> ValidationResult<SignupFormPatch> {
        let field = self.step().field();
        validate_field(field, self.value()).map(|value| SignupFormPatch::field(field, value))
    }
}

impl fmt::Debug for StepInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepInput::Password(_) => f.write_str("Password([REDACTED])"),
            other => f
                .debug_tuple(&format!("{:?}", other.step()))
                .field(&other.value())
                .finish(),
        }
    }
}

/// Apply exactly the rule of `step` to the matching field of `data`.
pub fn validate_step(step: FormStep, data: &SignupFormData) -> ValidationResult<SignupFormPatch> {
    StepInput::from_form(step, data).validate()
}

/// Apply every rule at once and report every issue, in field order.
pub fn validate_complete_form(data: &SignupFormData) -> ValidationResult<SignupFormData> {
    let mut sink = IssueSink::default();
    for field in FormField::ALL {
        check_field(field, data.get(field), &mut sink);
    }
    sink.finish(|| SignupFormData {
        name: normalize(FormField::Name, &data.name),
        email: normalize(FormField::Email, &data.email),
        password: normalize(FormField::Password, &data.password),
        school: normalize(FormField::School, &data.school),
        phone_number: normalize(FormField::PhoneNumber, &data.phone_number),
    })
}
