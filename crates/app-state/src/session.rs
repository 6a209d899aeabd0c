//! Session store
//!
//! The [`SessionStore`] owns the single identity slot of the app. It is
//! created in the [`SessionStatus::Loading`] state, restored once at startup,
//! and from then on changes only through login, register and logout.
//!
//! The identity is persisted as JSON under [`USER_KEY`]. Memory is updated
//! only after storage accepted the write, so both always agree.
//!
//! # Example
//!
//! ```rust,no_run
//! use app_core::Role;
//! use app_state::session::SessionStore;
//! use std::sync::Arc;
//! use storage::MemoryStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = SessionStore::new(Arc::new(MemoryStorage::new()));
//! session.restore().await;
//!
//! let identity = session.login("ann@x.com", "secret", Role::Student).await?;
//! assert_eq!(identity.name, "ann");
//!
//! session.logout().await?;
//! assert!(session.current().is_none());
//! # Ok(())
//! # }
//! ```

use app_core::{Identity, Role};
use std::sync::Arc;
use storage::{KeyValueStorage, StorageError};
use thiserror::Error;
use tokio::sync::watch;

/// Storage key holding the persisted identity
pub const USER_KEY: &str = "user";

/// Session store errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading the persisted identity failed
    #[error("Storage read error: {0}")]
    StorageRead(#[source] StorageError),

    /// Writing or removing the persisted identity failed
    #[error("Storage write error: {0}")]
    StorageWrite(#[source] StorageError),

    /// Persisted identity is not valid JSON for an [`Identity`]
    #[error("Deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Identity could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Lifecycle state of the session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Persisted identity has not been read yet
    #[default]
    Loading,
    /// Nobody is signed in
    Unauthenticated,
    /// A user is signed in
    Authenticated(Identity),
}

impl SessionStatus {
    /// The signed-in identity, if any
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionStatus::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// Role of the signed-in identity, if any
    pub fn role(&self) -> Option<Role> {
        self.identity().map(|identity| identity.role)
    }

    /// Whether the persisted identity is still being read
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionStatus::Loading)
    }
}

/// Owner of the current identity and its persistence
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    status: SessionStatus,
    notifier: watch::Sender<SessionStatus>,
}

impl SessionStore {
    /// Create a store in the `Loading` state
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let (notifier, _) = watch::channel(SessionStatus::Loading);

        Self { storage, status: SessionStatus::Loading, notifier }
    }

    /// Current lifecycle state
    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// The signed-in identity, if any
    pub fn current(&self) -> Option<&Identity> {
        self.status.identity()
    }

    /// Role of the signed-in identity, if any
    pub fn role(&self) -> Option<Role> {
        self.status.role()
    }

    /// Whether startup restore has not finished yet
    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Observe every state transition
    ///
    /// The receiver starts with the current state marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.notifier.subscribe()
    }

    /// Load the persisted identity
    ///
    /// Any read or decode failure leaves the session logged out; startup is
    /// never blocked by a bad entry.
    pub async fn restore(&mut self) -> Option<Identity> {
        self.transition(SessionStatus::Loading);

        match self.load_persisted().await {
            Ok(Some(identity)) => {
                tracing::info!(id = %identity.id, role = %identity.role, "Restored session");
                self.transition(SessionStatus::Authenticated(identity.clone()));
                Some(identity)
            }
            Ok(None) => {
                tracing::debug!("No persisted session");
                self.transition(SessionStatus::Unauthenticated);
                None
            }
            Err(e) => {
                tracing::warn!("Failed to load user: {}", e);
                self.transition(SessionStatus::Unauthenticated);
                None
            }
        }
    }

    /// Sign in with any credentials
    ///
    /// The display name is taken from the email's local part.
    pub async fn login(&mut self, email: &str, _password: &str, role: Role) -> Result<Identity> {
        let identity = Identity::for_login(email, role);
        self.persist(&identity).await?;

        tracing::info!(id = %identity.id, role = %role, "Logged in");
        self.transition(SessionStatus::Authenticated(identity.clone()));
        Ok(identity)
    }

    /// Create an account and sign in with it
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        _password: &str,
        role: Role,
    ) -> Result<Identity> {
        let identity = Identity::for_registration(name, email, role);
        self.persist(&identity).await?;

        tracing::info!(id = %identity.id, role = %role, "Registered account");
        self.transition(SessionStatus::Authenticated(identity.clone()));
        Ok(identity)
    }

    /// Sign out and forget the persisted identity
    ///
    /// Calling this while logged out is a no-op: a leftover entry is still
    /// cleared, but failing to clear it is only logged. With an active
    /// identity a removal failure is returned and the identity is kept.
    pub async fn logout(&mut self) -> Result<()> {
        match self.storage.remove_item(USER_KEY).await {
            Ok(removed) => {
                if removed || self.current().is_some() {
                    tracing::info!("Logged out");
                }
            }
            Err(e) if self.current().is_none() => {
                tracing::warn!("Failed to clear stale user entry: {}", e);
            }
            Err(e) => return Err(SessionError::StorageWrite(e)),
        }

        self.transition(SessionStatus::Unauthenticated);
        Ok(())
    }

    async fn load_persisted(&self) -> Result<Option<Identity>> {
        let raw = self
            .storage
            .get_item(USER_KEY)
            .await
            .map_err(SessionError::StorageRead)?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(SessionError::Deserialization),
            None => Ok(None),
        }
    }

    async fn persist(&self, identity: &Identity) -> Result<()> {
        let json = serde_json::to_string(identity).map_err(SessionError::Serialization)?;

        self.storage
            .set_item(USER_KEY, &json)
            .await
            .map_err(SessionError::StorageWrite)
    }

    fn transition(&mut self, status: SessionStatus) {
        if self.status != status {
            self.notifier.send_replace(status.clone());
            self.status = status;
        }
    }
}
