// src/state.rs

use std::sync::Arc;

use crate::auth::{Accounts, AuthProvider, LocalAuthProvider};
use crate::config::Config;
use crate::guard::RouteGuard;
use crate::store::{DocumentStore, MemoryStore};
use crate::theme::{FileSettings, SettingsStore, ThemeManager};
use crate::toast::ToastCenter;

/// Application state wired at startup: the backend capabilities plus the
/// explicitly-owned UI helpers (theme, toasts, route guard).
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub accounts: Accounts,
    pub guard: RouteGuard,
    pub theme: ThemeManager,
    pub toasts: ToastCenter,
}

impl AppState {
    /// Wires the local in-process backend (memory store + credential
    /// vault) behind the capability interfaces and loads persisted
    /// settings.
    pub fn with_local_backend(config: Config) -> Self {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let auth: Arc<dyn AuthProvider> = Arc::new(LocalAuthProvider::new(
            config.token_secret.clone(),
            config.token_expiration,
        ));
        let accounts = Accounts::new(Arc::clone(&auth), Arc::clone(&store));

        let settings: Arc<dyn SettingsStore> =
            Arc::new(FileSettings::new(config.settings_path.clone()));
        let mut theme = ThemeManager::new(settings);
        theme.load();

        Self {
            config,
            store,
            auth,
            accounts,
            guard: RouteGuard::new(),
            theme,
            toasts: ToastCenter::new(),
        }
    }
}
