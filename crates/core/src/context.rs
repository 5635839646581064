//! Application context
//!
//! One explicit object created at the application root, wiring the gateway,
//! session controller, mutation coordinator, and notification surface
//! together. Everything is behind `Arc` so views and background tasks can
//! hold cheap handles.

use std::path::PathBuf;
use std::sync::Arc;

use moltpass_common::{CredentialStore, NotificationSurface};
use moltpass_infra::{ApiConfig, MoltbookClient};

use crate::mutation::MutationCoordinator;
use crate::session::SessionController;

/// Keychain service name credentials are stored under.
const CREDENTIAL_SERVICE: &str = "com.moltpass.credentials";

/// Shared application services.
#[derive(Clone)]
pub struct AppContext {
    pub api: Arc<MoltbookClient>,
    pub session: Arc<SessionController>,
    pub mutations: Arc<MutationCoordinator>,
    pub notifications: NotificationSurface,
}

impl AppContext {
    /// Wire up the production stack: env-aware API config and the default
    /// credential backend chain.
    ///
    /// `data_dir` is where the plain-file credential fallback lives when the
    /// platform keychain is unavailable.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        let store = Arc::new(CredentialStore::with_default_backends(
            CREDENTIAL_SERVICE,
            data_dir.join("credentials.json"),
        ));
        Self::with_parts(ApiConfig::from_env(), store)
    }

    /// Wire up with explicit parts. Tests use this with a mock server URL
    /// and a memory-only store.
    #[must_use]
    pub fn with_parts(config: ApiConfig, store: Arc<CredentialStore>) -> Self {
        let api = Arc::new(MoltbookClient::new(config));
        let notifications = NotificationSurface::new();
        let session = Arc::new(SessionController::new(
            Arc::clone(&api),
            store,
            notifications.clone(),
        ));
        let mutations = Arc::new(MutationCoordinator::new(Arc::clone(&api)));

        Self { api, session, mutations, notifications }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
