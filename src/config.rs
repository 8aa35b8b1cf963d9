// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used by the local auth provider to mint ID tokens.
    pub token_secret: String,
    /// ID token lifetime in seconds.
    pub token_expiration: u64,
    pub rust_log: String,
    /// Path of the JSON file backing local settings (theme flag).
    pub settings_path: String,
    pub demo_email: Option<String>,
    pub demo_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let token_secret = env::var("LEARNITY_TOKEN_SECRET")
            .expect("LEARNITY_TOKEN_SECRET must be set");

        let token_expiration = env::var("LEARNITY_TOKEN_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let settings_path = env::var("LEARNITY_SETTINGS_PATH")
            .unwrap_or_else(|_| ".learnity/settings.json".to_string());

        let demo_email = env::var("LEARNITY_DEMO_EMAIL").ok();
        let demo_password = env::var("LEARNITY_DEMO_PASSWORD").ok();

        Self {
            token_secret,
            token_expiration,
            rust_log,
            settings_path,
            demo_email,
            demo_password,
        }
    }
}
