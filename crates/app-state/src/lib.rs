//! Application state management for BITA
//!
//! This crate owns the session: the signed-in identity, its lifecycle
//! from startup restore to logout, and its persistence.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;

pub use session::{SessionError, SessionStatus, SessionStore, USER_KEY};
