// src/auth/mod.rs

pub mod accounts;
pub mod local;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub use accounts::Accounts;
pub use local::LocalAuthProvider;

/// Identity providers the client can sign in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderKind {
    Password,
    Google,
}

impl ProviderKind {
    /// Provider identifier as carried in ID token claims.
    pub fn provider_id(self) -> &'static str {
        match self {
            ProviderKind::Password => "password",
            ProviderKind::Google => "google.com",
        }
    }
}

/// An authenticated account as exposed by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub provider: ProviderKind,
}

/// The identity a federated consent flow hands back (the popup result).
#[derive(Debug, Clone)]
pub struct FederatedIdentity {
    /// Provider-side stable subject identifier.
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Authentication capability consumed by the client core.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn create_account_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account, AppError>;

    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<Account, AppError>;

    /// Opens the provider-controlled interactive consent step. A consent
    /// flow the user cancels surfaces as `AppError::Auth`, never as a
    /// silent no-op.
    async fn sign_in_with_federated_popup(
        &self,
        provider: ProviderKind,
    ) -> Result<Account, AppError>;

    async fn update_account_profile(&self, uid: &str, display_name: &str)
    -> Result<(), AppError>;

    /// Resolves the current session, if any. May suspend while the
    /// provider initializes; an expired session resolves to `None`.
    async fn current_session(&self) -> Option<Account>;

    async fn sign_out(&self);
}
