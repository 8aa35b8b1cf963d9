// tests/feed_tests.rs

use std::sync::Arc;

use learnity::auth::{Account, ProviderKind};
use learnity::feed::{POSTS_COLLECTION, open_feed, publish_post};
use learnity::models::post::PostDraft;
use learnity::store::{DocumentStore, MemoryStore};
use serde_json::{Map, Value, json};

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("fields must be an object"),
    }
}

/// Seeds a post whose creation time is `seconds` past the epoch.
async fn seed_post(store: &MemoryStore, username: &str, seconds: i64) -> String {
    store
        .add_document(
            POSTS_COLLECTION,
            fields(json!({
                "username": username,
                "content": format!("post by {}", username),
                "createdAt": { "seconds": seconds, "nanoseconds": 0 }
            })),
        )
        .await
        .expect("seed write failed")
}

fn setup() -> (MemoryStore, Arc<dyn DocumentStore>) {
    let memory = MemoryStore::new();
    let store: Arc<dyn DocumentStore> = Arc::new(memory.clone());
    (memory, store)
}

#[tokio::test]
async fn feed_emits_newest_first_on_every_emission() {
    // Arrange: three posts out of insertion order
    let (memory, store) = setup();
    seed_post(&memory, "first", 100).await;
    seed_post(&memory, "third", 300).await;
    seed_post(&memory, "second", 200).await;

    // Act
    let (feed_rx, _handle) = open_feed(&store);

    // Assert: initial emission is already ordered newest first
    let names: Vec<String> = feed_rx.borrow().iter().map(|p| p.username.clone()).collect();
    assert_eq!(names, vec!["third", "second", "first"]);

    // A later write republishes the full list, still ordered
    seed_post(&memory, "fourth", 400).await;
    let names: Vec<String> = feed_rx.borrow().iter().map(|p| p.username.clone()).collect();
    assert_eq!(names, vec!["fourth", "third", "second", "first"]);
}

#[tokio::test]
async fn every_emission_is_a_full_replacement() {
    let (memory, store) = setup();
    seed_post(&memory, "only", 100).await;

    let (feed_rx, _handle) = open_feed(&store);
    assert_eq!(feed_rx.borrow().len(), 1);

    seed_post(&memory, "another", 200).await;

    // The published value is the whole mapped snapshot, not a delta
    let posts = feed_rx.borrow().clone();
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| !p.username.is_empty()));
}

#[tokio::test]
async fn teardown_stops_emissions() {
    // Arrange
    let (memory, store) = setup();
    seed_post(&memory, "before", 100).await;
    let (feed_rx, handle) = open_feed(&store);
    assert_eq!(feed_rx.borrow().len(), 1);

    // Act
    handle.detach();
    seed_post(&memory, "after", 200).await;

    // Assert: the list never saw the post written after teardown
    assert_eq!(feed_rx.borrow().len(), 1);
    assert_eq!(feed_rx.borrow()[0].username, "before");
}

#[tokio::test]
async fn dropping_the_handle_also_detaches() {
    let (memory, store) = setup();
    let (feed_rx, handle) = open_feed(&store);

    drop(handle);
    seed_post(&memory, "late", 100).await;

    assert!(feed_rx.borrow().is_empty());
}

#[tokio::test]
async fn subscription_error_keeps_last_good_list() {
    // Arrange
    let (memory, store) = setup();
    seed_post(&memory, "good", 100).await;
    let (feed_rx, handle) = open_feed(&store);
    assert_eq!(feed_rx.borrow().len(), 1);

    // Act: backend-side subscription failure
    memory.inject_subscription_error("backend unavailable");

    // Assert: error goes to the side channel, the list stays published
    assert_eq!(feed_rx.borrow().len(), 1);
    let last_error = handle.last_error().expect("error should be recorded");
    assert!(last_error.contains("backend unavailable"));

    // And the subscription itself is still alive
    seed_post(&memory, "later", 200).await;
    assert_eq!(feed_rx.borrow().len(), 2);
}

#[tokio::test]
async fn independent_calls_open_independent_subscriptions() {
    let (memory, store) = setup();
    let (rx_a, handle_a) = open_feed(&store);
    let (rx_b, _handle_b) = open_feed(&store);

    seed_post(&memory, "shared", 100).await;
    assert_eq!(rx_a.borrow().len(), 1);
    assert_eq!(rx_b.borrow().len(), 1);

    // Tearing one down leaves the other live
    handle_a.detach();
    seed_post(&memory, "solo", 200).await;
    assert_eq!(rx_a.borrow().len(), 1);
    assert_eq!(rx_b.borrow().len(), 2);
}

#[tokio::test]
async fn publish_post_lands_in_the_feed_with_store_assigned_id() {
    // Arrange
    let (_memory, store) = setup();
    let (feed_rx, _handle) = open_feed(&store);
    let account = Account {
        uid: "uid_feed_tests".to_string(),
        email: Some("trang@example.com".to_string()),
        display_name: Some("Trang".to_string()),
        photo_url: None,
        provider: ProviderKind::Password,
    };
    let draft = PostDraft {
        post_description: Some("mô tả".to_string()),
        content: Some("bài viết đầu tiên".to_string()),
        image_url: None,
    };

    // Act
    let post = publish_post(&store, &account, &draft)
        .await
        .expect("publish failed");

    // Assert
    assert!(!post.id.is_empty());
    let feed = feed_rx.borrow().clone();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].id, post.id);
    assert_eq!(feed[0].username, "Trang");
    assert_eq!(feed[0].uid, "uid_feed_tests");
}
