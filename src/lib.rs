//! BITA campus app core
//!
//! Wires the session store to the navigation gate: the app starts by
//! restoring the persisted identity, lands on the matching screen, and
//! re-lands whenever the user logs in, registers or logs out.
//!
//! # Example
//!
//! ```rust,no_run
//! use app_core::{LoginForm, Role};
//! use bita::{App, AppConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::from_env();
//! bita::logging::init(&config.log)?;
//!
//! let mut app = App::start(&config).await?;
//! app.login(&LoginForm::new("ann@x.com", "secret", Role::Student)).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logging;

use anyhow::Context;
use app_core::{Identity, LoginForm, RegistrationForm};
use app_state::SessionStore;
use app_ui::{DashboardVariant, NavigationState};
use std::sync::Arc;
use storage::{KeyValueStorage, KvStore, MemoryStorage};

pub use config::{AppConfig, LogConfig, StorageBackend};

/// Open the configured storage backend
pub fn open_storage(backend: &StorageBackend) -> anyhow::Result<Arc<dyn KeyValueStorage>> {
    match backend {
        StorageBackend::Sled(kv) => {
            let store = KvStore::new(kv.clone())
                .with_context(|| format!("Failed to open session storage at {}", kv.path))?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
    }
}

/// A running app session: identity plus the navigation it unlocks
pub struct App {
    session: SessionStore,
    navigation: NavigationState,
}

impl App {
    /// Open storage, restore the persisted identity and land
    pub async fn start(config: &AppConfig) -> anyhow::Result<Self> {
        let storage = open_storage(&config.storage)?;
        Ok(Self::with_storage(storage).await)
    }

    /// Start over an already opened storage
    pub async fn with_storage(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut session = SessionStore::new(storage);
        let identity = session.restore().await;
        let navigation = NavigationState::new(identity.as_ref());

        Self { session, navigation }
    }

    /// The session store
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Current navigation state
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Mutable navigation state, for screen transitions
    pub fn navigation_mut(&mut self) -> &mut NavigationState {
        &mut self.navigation
    }

    /// Dashboard variant for the signed-in user
    pub fn dashboard(&self) -> Option<DashboardVariant> {
        self.session.role().map(DashboardVariant::for_role)
    }

    /// Submit the login form
    pub async fn login(&mut self, form: &LoginForm) -> anyhow::Result<Identity> {
        form.validate()?;

        let identity = self
            .session
            .login(&form.email, &form.password, form.role)
            .await
            .context("Failed to login. Please try again.")?;

        self.navigation.reset(Some(&identity));
        Ok(identity)
    }

    /// Submit the self-registration form
    pub async fn register(&mut self, form: &RegistrationForm) -> anyhow::Result<Identity> {
        form.validate()?;

        let identity = self
            .session
            .register(&form.name, &form.email, &form.password, RegistrationForm::ROLE)
            .await
            .context("Failed to register. Please try again.")?;

        self.navigation.reset(Some(&identity));
        Ok(identity)
    }

    /// Sign out and return to the welcome flow
    pub async fn logout(&mut self) -> anyhow::Result<()> {
        self.session.logout().await.context("Failed to logout")?;
        self.navigation.reset(None);
        Ok(())
    }
}
