//! Identity and credential types for BITA
//!
//! This module defines who a signed-in user is (their [`Identity`] and
//! [`Role`]) and the login/registration forms collected by the auth screens.
//! There is no credential verification: any filled-in form produces an
//! identity.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Credential form validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFormError {
    /// One or more required fields are empty
    #[error("Please fill in all fields")]
    MissingFields,

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Error returned when parsing an unknown role name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// User role, the only authorization attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Campus administrator
    Admin,
    /// Teaching or office staff
    Staff,
    /// Enrolled student
    #[default]
    Student,
}

impl Role {
    /// Roles offered by the login picker, in display order
    pub const ALL: [Role; 3] = [Role::Student, Role::Staff, Role::Admin];

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::Student => "student",
        }
    }

    /// Badge text shown on the profile screen
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Staff => "STAFF",
            Role::Student => "STUDENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "student" => Ok(Role::Student),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Locally generated identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address used to sign in
    pub email: String,
    /// Authorization role
    pub role: Role,
}

impl Identity {
    /// Create an identity from explicit parts
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self { id: id.into(), name: name.into(), email: email.into(), role }
    }

    /// Build the identity for a login
    ///
    /// The display name is derived from the email's local part.
    pub fn for_login(email: &str, role: Role) -> Self {
        Self::new(generate_id(), name_from_email(email), email, role)
    }

    /// Build the identity for a new registration
    pub fn for_registration(name: &str, email: &str, role: Role) -> Self {
        Self::new(generate_id(), name, email, role)
    }
}

/// Millisecond timestamp, rendered as a decimal string
fn generate_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Display name for an email: everything before the first `@`
pub fn name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Login form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Email address
    pub email: String,
    /// Password (never verified)
    pub password: String,
    /// Role picked on the login screen
    pub role: Role,
}

impl LoginForm {
    /// Create a login form
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self { email: email.into(), password: password.into(), role }
    }

    /// Check that every field is filled in
    pub fn validate(&self) -> Result<(), AuthFormError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AuthFormError::MissingFields);
        }
        Ok(())
    }
}

/// Self-registration form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Chosen password
    pub password: String,
    /// Password typed a second time
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Role assigned to every self-registered account
    pub const ROLE: Role = Role::Student;

    /// Create a registration form
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Check that every field is filled in and the passwords agree
    pub fn validate(&self) -> Result<(), AuthFormError> {
        if self.name.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(AuthFormError::MissingFields);
        }

        if self.password != self.confirm_password {
            return Err(AuthFormError::PasswordMismatch);
        }

        Ok(())
    }
}
