// src/auth/accounts.rs

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::auth::{Account, AuthProvider, ProviderKind};
use crate::error::AppError;
use crate::models::profile::{RegisterRequest, UserProfile};
use crate::store::DocumentStore;

/// Collection holding one profile document per account, keyed by uid.
pub const USERS_COLLECTION: &str = "users";

/// Account/session manager: wraps the credential flows and keeps the
/// profile document in step with the authenticated account.
pub struct Accounts {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
}

impl Accounts {
    pub fn new(auth: Arc<dyn AuthProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self { auth, store }
    }

    /// Registers a new account with email/password and writes its profile
    /// document.
    ///
    /// The profile write is plain (no merge): the document is known not to
    /// exist yet. A failure at any step is propagated unchanged; in
    /// particular a failed profile write leaves the already-created
    /// credential in place, with no compensating cleanup.
    pub async fn register_with_email(
        &self,
        request: &RegisterRequest,
    ) -> Result<UserProfile, AppError> {
        if let Err(validation_errors) = request.validate() {
            return Err(AppError::BadRequest(validation_errors.to_string()));
        }

        let account = self
            .auth
            .create_account_with_email(&request.email, &request.password)
            .await?;

        self.auth
            .update_account_profile(&account.uid, &request.username)
            .await?;

        let profile = UserProfile {
            uid: account.uid.clone(),
            email: Some(request.email.clone()),
            username: request.username.clone(),
            created_at: Utc::now().to_rfc3339(),
        };

        self.store
            .set_document(USERS_COLLECTION, &profile.uid, profile.to_fields(), false)
            .await
            .map_err(|e| {
                tracing::error!("Profile write failed after account creation: {}", e);
                e
            })?;

        tracing::info!("Registered account {} ({})", profile.username, profile.uid);
        Ok(profile)
    }

    /// Signs in through Google and upserts the profile document.
    ///
    /// The write uses merge semantics: fields outside
    /// {uid, email, username, createdAt} written by other devices are
    /// preserved. `createdAt` is refreshed on every sign-in.
    pub async fn sign_in_with_google_and_save(&self) -> Result<UserProfile, AppError> {
        let account = self
            .auth
            .sign_in_with_federated_popup(ProviderKind::Google)
            .await?;

        let username = account
            .display_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| synthesized_username(&account.uid));

        let profile = UserProfile {
            uid: account.uid.clone(),
            email: account.email.clone(),
            username,
            created_at: Utc::now().to_rfc3339(),
        };

        self.store
            .set_document(USERS_COLLECTION, &profile.uid, profile.to_fields(), true)
            .await?;

        tracing::info!("Google sign-in for {} ({})", profile.username, profile.uid);
        Ok(profile)
    }

    pub async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account, AppError> {
        self.auth.sign_in_with_email(email, password).await
    }

    pub async fn current_session(&self) -> Option<Account> {
        self.auth.current_session().await
    }

    pub async fn sign_out(&self) {
        self.auth.sign_out().await;
    }
}

/// `User_` plus the first 8 characters of the account identifier.
fn synthesized_username(uid: &str) -> String {
    format!("User_{}", uid.chars().take(8).collect::<String>())
}
