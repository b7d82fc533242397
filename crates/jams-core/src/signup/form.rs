//! Signup form data and its persisted snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::signup::{FormField, FormStep};

/// Values collected across the wizard.
///
/// Every field defaults to the empty string and is filled one step at a time.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupFormData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub school: String,
    pub phone_number: String,
}

impl SignupFormData {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
            FormField::School => &self.school,
            FormField::PhoneNumber => &self.phone_number,
        }
    }

    /// Shallow merge: fields set in `patch` overwrite, the rest are untouched.
    pub fn merge(&mut self, patch: SignupFormPatch) {
        let SignupFormPatch {
            name,
            email,
            password,
            school,
            phone_number,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(password) = password {
            self.password = password;
        }
        if let Some(school) = school {
            self.school = school;
        }
        if let Some(phone_number) = phone_number {
            self.phone_number = phone_number;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Debug for SignupFormData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupFormData")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("school", &self.school)
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

/// A partial update of [`SignupFormData`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupFormPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl SignupFormPatch {
    /// Patch that sets a single field.
    pub fn field(field: FormField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            FormField::Name => Self {
                name: value,
                ..Self::default()
            },
            FormField::Email => Self {
                email: value,
                ..Self::default()
            },
            FormField::Password => Self {
                password: value,
                ..Self::default()
            },
            FormField::School => Self {
                school: value,
                ..Self::default()
            },
            FormField::PhoneNumber => Self {
                phone_number: value,
                ..Self::default()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Debug for SignupFormPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupFormPatch")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("school", &self.school)
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

/// Wizard position plus collected values: the unit that gets persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupFormState {
    pub current_step: FormStep,
    pub form_data: SignupFormData,
}

impl SignupFormState {
    pub fn is_first_step(&self) -> bool {
        self.current_step.is_first()
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step.is_last()
    }
}
