//! Identity service models.
//!
//! Requests sent to, and records returned by, the hosted identity service.
//! The records are owned by that service; this crate only passes them through.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::security::SecretString;
use crate::signup::SignupFormData;

/// Profile fields attached to a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetadata {
    pub name: String,
    pub school: String,
    pub phone_number: String,
}

/// Create-account request.
#[derive(Debug)]
pub struct SignUpRequest {
    pub email: String,
    pub password: SecretString,
    pub metadata: UserMetadata,
}

impl SignUpRequest {
    pub fn from_form(data: &SignupFormData) -> Self {
        Self {
            email: data.email.clone(),
            password: SecretString::new(data.password.clone()),
            metadata: UserMetadata {
                name: data.name.clone(),
                school: data.school.clone(),
                phone_number: data.phone_number.clone(),
            },
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: SecretString::new(self.password.expose().to_string()),
        }
    }
}

/// Email/password pair for a password grant.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Account record as returned by the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Session issued by a successful password grant.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("user", &self.user)
            .finish()
    }
}

/// Result of a create-account call. `session` is absent when the service
/// requires email confirmation before issuing one.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpResponse {
    pub user: AuthUser,
    pub session: Option<AuthSession>,
}

/// Error reported by the identity service. `Display` is the service's message,
/// unchanged, so it can be shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    /// HTTP status, or 0 when the request never got a response.
    pub status: u16,
}

impl AuthError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(message, 0)
    }

    pub fn is_transport(&self) -> bool {
        self.status == 0
    }
}
