// src/models/profile.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid username regex"));

/// The profile document persisted under `users/{uid}`.
///
/// Created once via the email path (plain write) and upserted with merge
/// semantics on every federated sign-in, so fields written by other
/// devices survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,

    /// May be absent for some federated providers.
    pub email: Option<String>,

    pub username: String,

    /// ISO-8601 timestamp string, set at write time.
    pub created_at: String,
}

impl UserProfile {
    /// The document representation written to the store. An absent email
    /// is omitted rather than written as null, so a merge cannot blank a
    /// value another device wrote.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("uid".into(), Value::String(self.uid.clone()));
        if let Some(email) = &self.email {
            fields.insert("email".into(), Value::String(email.clone()));
        }
        fields.insert("username".into(), Value::String(self.username.clone()));
        fields.insert("createdAt".into(), Value::String(self.created_at.clone()));
        fields
    }
}

/// DTO for creating a new account (Registration).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email address is required."))]
    pub email: String,

    #[validate(length(
        min = 6,
        max = 128,
        message = "Password length must be between 6 and 128 characters."
    ))]
    pub password: String,

    #[validate(
        length(
            min = 3,
            max = 50,
            message = "Username length must be between 3 and 50 characters."
        ),
        regex(
            path = *USERNAME_RE,
            message = "Username may contain only letters, digits and underscores."
        )
    )]
    pub username: String,
}
