//! Wizard position.

use serde::{Deserialize, Serialize};

use crate::signup::FormField;

/// Number of steps in the signup wizard.
pub const TOTAL_STEPS: u8 = 5;

/// One screen of the five-part signup wizard.
///
/// Persisted as its integer value (`1..=5`), so the discriminants are part of
/// the storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FormStep {
    Name = 1,
    Email = 2,
    Password = 3,
    School = 4,
    Phone = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid signup step: {0} (expected 1..=5)")]
pub struct InvalidStep(pub u8);

impl FormStep {
    pub const FIRST: FormStep = FormStep::Name;
    pub const LAST: FormStep = FormStep::Phone;

    /// All steps in wizard order.
    pub const ALL: [FormStep; TOTAL_STEPS as usize] = [
        FormStep::Name,
        FormStep::Email,
        FormStep::Password,
        FormStep::School,
        FormStep::Phone,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    /// The following step, clamped at [`FormStep::LAST`].
    pub fn next(self) -> Self {
        Self::try_from(self.number().saturating_add(1)).unwrap_or(Self::LAST)
    }

    /// The preceding step, clamped at [`FormStep::FIRST`].
    pub fn previous(self) -> Self {
        Self::try_from(self.number().saturating_sub(1)).unwrap_or(Self::FIRST)
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// The form field collected on this step.
    pub fn field(self) -> FormField {
        match self {
            FormStep::Name => FormField::Name,
            FormStep::Email => FormField::Email,
            FormStep::Password => FormField::Password,
            FormStep::School => FormField::School,
            FormStep::Phone => FormField::PhoneNumber,
        }
    }

    /// Short label shown by front ends.
    pub fn title(self) -> &'static str {
        match self {
            FormStep::Name => "What's your name?",
            FormStep::Email => "What's your email?",
            FormStep::Password => "Create a password",
            FormStep::School => "Where do you study?",
            FormStep::Phone => "What's your phone number?",
        }
    }
}

impl Default for FormStep {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for FormStep {
    type Error = InvalidStep;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FormStep::Name),
            2 => Ok(FormStep::Email),
            3 => Ok(FormStep::Password),
            4 => Ok(FormStep::School),
            5 => Ok(FormStep::Phone),
            other => Err(InvalidStep(other)),
        }
    }
}

impl From<FormStep> for u8 {
    fn from(step: FormStep) -> Self {
        step.number()
    }
}
