//! Core application logic for BITA
//!
//! This crate contains the domain types shared by the session store and
//! the navigation layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;

pub use auth::{AuthFormError, Identity, LoginForm, ParseRoleError, RegistrationForm, Role};
