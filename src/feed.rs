// src/feed.rs

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use validator::Validate;

use crate::auth::Account;
use crate::error::AppError;
use crate::models::post::{Post, PostDraft, map_document};
use crate::store::{Direction, DocumentStore, Query, StoreSubscription};

/// Collection holding the feed documents.
pub const POSTS_COLLECTION: &str = "posts";

/// Live handle on an open feed.
///
/// Owns the store subscription: dropping the handle (or calling `detach`)
/// tears it down, after which no further list emissions occur.
pub struct FeedHandle {
    subscription: StoreSubscription,
    last_error: Arc<Mutex<Option<String>>>,
}

impl FeedHandle {
    /// Tears down the subscription. Equivalent to dropping the handle.
    pub fn detach(self) {
        self.subscription.detach();
    }

    /// The most recent subscription error, if any. The feed keeps
    /// publishing the last good list when the subscription fails.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .expect("feed error slot poisoned")
            .clone()
    }
}

/// Opens a live projection of the posts feed, newest first.
///
/// Each value on the returned receiver is a full replacement of the list,
/// mapped from the complete upstream snapshot; there is no delta protocol.
/// Ordering comes from the backend query (`createdAt` descending); the
/// projector performs no client-side sorting. Every call opens an
/// independent subscription.
pub fn open_feed(store: &Arc<dyn DocumentStore>) -> (watch::Receiver<Vec<Post>>, FeedHandle) {
    let (tx, rx) = watch::channel(Vec::new());
    let last_error = Arc::new(Mutex::new(None));

    let query = Query::collection(POSTS_COLLECTION).order_by("createdAt", Direction::Descending);

    let error_slot = Arc::clone(&last_error);
    let subscription = store.subscribe(
        query,
        Box::new(move |snapshot| {
            let posts: Vec<Post> = snapshot.docs.iter().map(map_document).collect();
            // All receivers may be gone; the subscription stays valid.
            let _ = tx.send(posts);
        }),
        Box::new(move |err| {
            tracing::error!("Posts subscription failed: {}", err);
            *error_slot.lock().expect("feed error slot poisoned") = Some(err.to_string());
        }),
    );

    (rx, FeedHandle { subscription, last_error })
}

/// Validates, sanitizes and writes a post composed by `account`.
/// The store assigns the document id; the returned post carries it.
pub async fn publish_post(
    store: &Arc<dyn DocumentStore>,
    account: &Account,
    draft: &PostDraft,
) -> Result<Post, AppError> {
    if let Err(validation_errors) = draft.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let mut post = Post::compose(account, draft);
    let id = store.add_document(POSTS_COLLECTION, post.to_fields()).await?;
    post.id = id;

    tracing::info!("Published post {} by {}", post.id, post.username);
    Ok(post)
}
