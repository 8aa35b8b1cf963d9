// src/auth/local.rs

use std::collections::HashMap;
use std::sync::Mutex;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::{Account, AuthProvider, FederatedIdentity, ProviderKind};
use crate::error::AppError;
use crate::utils::token::{sign_id_token, verify_id_token};

struct StoredAccount {
    account: Account,
    /// Argon2 hash; `None` for federated-only accounts.
    password_hash: Option<String>,
}

/// Local credential vault standing in for the hosted auth service.
///
/// Accounts live in memory, passwords are stored as Argon2 hashes, and a
/// session is a short-lived signed ID token: once the token expires,
/// `current_session` resolves to `None` without any explicit sign-out.
///
/// The interactive consent step of federated sign-in is scripted: callers
/// queue the identity the next popup hands back with
/// [`enqueue_federated_identity`](Self::enqueue_federated_identity); an
/// empty queue behaves as the user closing the popup.
pub struct LocalAuthProvider {
    token_secret: String,
    token_expiration: u64,
    accounts: Mutex<HashMap<String, StoredAccount>>,
    session: Mutex<Option<String>>,
    consent_queue: Mutex<Vec<FederatedIdentity>>,
}

impl LocalAuthProvider {
    pub fn new(token_secret: impl Into<String>, token_expiration: u64) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_expiration,
            accounts: Mutex::new(HashMap::new()),
            session: Mutex::new(None),
            consent_queue: Mutex::new(Vec::new()),
        }
    }

    /// Queues the identity the next federated popup will hand back.
    pub fn enqueue_federated_identity(&self, identity: FederatedIdentity) {
        self.consent_queue
            .lock()
            .expect("consent queue lock poisoned")
            .push(identity);
    }

    fn hash_password(password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(e.to_string()))?
            .to_string();

        Ok(password_hash)
    }

    fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let result = Argon2::default().verify_password(password.as_bytes(), &parsed_hash);

        Ok(result.is_ok())
    }

    fn open_session(&self, account: &Account) -> Result<(), AppError> {
        let token = sign_id_token(
            &account.uid,
            account.provider.provider_id(),
            &self.token_secret,
            self.token_expiration,
        )?;
        *self.session.lock().expect("session lock poisoned") = Some(token);
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn create_account_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account, AppError> {
        let password_hash = Self::hash_password(password)?;

        let account = {
            let mut accounts = self.accounts.lock().expect("accounts lock poisoned");

            let duplicate = accounts
                .values()
                .any(|stored| stored.account.email.as_deref() == Some(email));
            if duplicate {
                return Err(AppError::Auth(format!("Email '{}' is already in use", email)));
            }

            let account = Account {
                uid: Uuid::new_v4().simple().to_string(),
                email: Some(email.to_string()),
                display_name: None,
                photo_url: None,
                provider: ProviderKind::Password,
            };
            accounts.insert(
                account.uid.clone(),
                StoredAccount {
                    account: account.clone(),
                    password_hash: Some(password_hash),
                },
            );
            account
        };

        self.open_session(&account)?;
        Ok(account)
    }

    async fn sign_in_with_email(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let (account, password_hash) = {
            let accounts = self.accounts.lock().expect("accounts lock poisoned");
            let stored = accounts
                .values()
                .find(|stored| stored.account.email.as_deref() == Some(email))
                .ok_or_else(|| AppError::Auth("User not found".to_string()))?;
            (stored.account.clone(), stored.password_hash.clone())
        };

        let password_hash = password_hash
            .ok_or_else(|| AppError::Auth("Account has no password sign-in".to_string()))?;

        if !Self::verify_password(password, &password_hash)? {
            return Err(AppError::Auth("Invalid password".to_string()));
        }

        self.open_session(&account)?;
        Ok(account)
    }

    async fn sign_in_with_federated_popup(
        &self,
        provider: ProviderKind,
    ) -> Result<Account, AppError> {
        let identity = {
            let mut queue = self.consent_queue.lock().expect("consent queue lock poisoned");
            if queue.is_empty() {
                // The user closed the popup without completing consent.
                return Err(AppError::Auth(
                    "Consent flow was closed before sign-in completed".to_string(),
                ));
            }
            queue.remove(0)
        };

        let account = {
            let mut accounts = self.accounts.lock().expect("accounts lock poisoned");
            let stored = accounts
                .entry(identity.subject.clone())
                .or_insert_with(|| StoredAccount {
                    account: Account {
                        uid: identity.subject.clone(),
                        email: None,
                        display_name: None,
                        photo_url: None,
                        provider,
                    },
                    password_hash: None,
                });

            // The provider's record is authoritative on repeat sign-in.
            stored.account.email = identity.email.clone();
            stored.account.display_name = identity.display_name.clone();
            stored.account.photo_url = identity.photo_url.clone();
            stored.account.provider = provider;
            stored.account.clone()
        };

        self.open_session(&account)?;
        Ok(account)
    }

    async fn update_account_profile(
        &self,
        uid: &str,
        display_name: &str,
    ) -> Result<(), AppError> {
        let mut accounts = self.accounts.lock().expect("accounts lock poisoned");
        let stored = accounts
            .get_mut(uid)
            .ok_or_else(|| AppError::Auth(format!("No account with uid '{}'", uid)))?;
        stored.account.display_name = Some(display_name.to_string());
        Ok(())
    }

    async fn current_session(&self) -> Option<Account> {
        let token = self.session.lock().expect("session lock poisoned").clone()?;
        let claims = verify_id_token(&token, &self.token_secret).ok()?;

        let accounts = self.accounts.lock().expect("accounts lock poisoned");
        accounts.get(&claims.sub).map(|stored| stored.account.clone())
    }

    async fn sign_out(&self) {
        *self.session.lock().expect("session lock poisoned") = None;
    }
}
