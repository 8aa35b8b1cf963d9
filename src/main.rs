// src/main.rs

use dotenvy::dotenv;
use learnity::config::Config;
use learnity::feed;
use learnity::models::post::PostDraft;
use learnity::models::profile::RegisterRequest;
use learnity::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Wire the local backend behind the capability interfaces
    let state = AppState::with_local_backend(config);
    tracing::info!(
        "Local backend ready (theme: {})",
        if state.theme.is_dark_mode() { "dark" } else { "light" }
    );

    // Open the live feed before seeding so the seed shows up as an update
    let (mut feed_rx, feed_handle) = feed::open_feed(&state.store);

    // Seed Demo Account
    if let Err(e) = seed_demo_account(&state).await {
        tracing::error!("Failed to seed demo account: {:?}", e);
    }

    tracing::info!("Watching the posts feed. Press Ctrl-C to exit.");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = feed_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let posts = feed_rx.borrow_and_update().clone();
                tracing::info!("Feed updated: {} post(s)", posts.len());
                for post in &posts {
                    tracing::info!("  [{}] {}: {}", post.created_at, post.username, post.content);
                }
            }
        }
    }

    feed_handle.detach();
    tracing::info!("Feed closed.");
}

/// Creates a demo account and a first post when the demo credentials are
/// configured. Mirrors a first-run experience against a fresh backend.
async fn seed_demo_account(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(email), Some(password)) = (
        state.config.demo_email.clone(),
        state.config.demo_password.clone(),
    ) {
        tracing::info!("Seeding demo account: {}", email);
        let request = RegisterRequest {
            email,
            password,
            username: "demo".to_string(),
        };
        state.accounts.register_with_email(&request).await?;

        if let Some(account) = state.accounts.current_session().await {
            let draft = PostDraft {
                post_description: Some("Chào mừng đến với Learnity!".to_string()),
                content: Some("First post from the local backend.".to_string()),
                image_url: None,
            };
            feed::publish_post(&state.store, &account, &draft).await?;
        }

        state.toasts.success("Demo account ready");
    }
    Ok(())
}
