// tests/mapper_tests.rs

use chrono::{DateTime, Utc};
use learnity::auth::{Account, ProviderKind};
use learnity::models::post::{DEFAULT_USERNAME, Post, PostDraft, PostUpdates, map_document};
use learnity::store::Document;
use serde_json::{Value, json};

fn doc(id: &str, fields: Value) -> Document {
    match fields {
        Value::Object(map) => Document::new(id, map),
        _ => panic!("document fields must be an object"),
    }
}

fn account(display_name: Option<&str>, email: Option<&str>) -> Account {
    Account {
        uid: "uid_mapper_tests".to_string(),
        email: email.map(str::to_string),
        display_name: display_name.map(str::to_string),
        photo_url: None,
        provider: ProviderKind::Password,
    }
}

#[test]
fn empty_document_gets_all_defaults() {
    // Arrange
    let raw = doc("post-1", json!({}));
    let before = Utc::now();

    // Act
    let post = map_document(&raw);

    // Assert: every field populated with its documented default
    assert_eq!(post.id, "post-1");
    assert_eq!(post.username, DEFAULT_USERNAME);
    assert_eq!(post.avatar_url, "");
    assert!(!post.is_verified);
    assert_eq!(post.post_description, "");
    assert_eq!(post.content, "");
    assert_eq!(post.image_url, "");
    assert_eq!(post.likes, 0);
    assert_eq!(post.comments, 0);
    assert_eq!(post.shares, 0);
    assert_eq!(post.uid, "");
    assert_eq!(post.shared_by_uid, "");
    assert!(!post.is_liked);
    // Fallback timestamp: no earlier than the moment mapping began
    assert!(post.created_at >= before);
    assert!(post.created_at <= Utc::now());
}

#[test]
fn present_fields_are_preserved_and_absent_ones_defaulted() {
    let raw = doc(
        "post-2",
        json!({
            "username": "trang",
            "likes": 7,
            "isVerified": true,
            "content": "xin chào"
        }),
    );

    let post = map_document(&raw);

    assert_eq!(post.username, "trang");
    assert_eq!(post.likes, 7);
    assert!(post.is_verified);
    assert_eq!(post.content, "xin chào");
    // Absent fields still land on defaults
    assert_eq!(post.comments, 0);
    assert_eq!(post.post_description, "");
    assert!(!post.is_liked);
}

#[test]
fn native_timestamp_object_is_converted() {
    let raw = doc(
        "post-3",
        json!({ "createdAt": { "seconds": 1_700_000_000, "nanoseconds": 0 } }),
    );

    let post = map_document(&raw);

    let expected = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    assert_eq!(post.created_at, expected);
}

#[test]
fn millis_and_rfc3339_timestamps_are_accepted() {
    let millis = doc("post-4", json!({ "createdAt": 1_700_000_000_500_i64 }));
    let text = doc("post-5", json!({ "createdAt": "2023-11-14T22:13:20Z" }));

    let from_millis = map_document(&millis);
    let from_text = map_document(&text);

    let expected = DateTime::from_timestamp(1_700_000_000, 500_000_000).unwrap();
    assert_eq!(from_millis.created_at, expected);
    assert_eq!(
        from_text.created_at,
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    );
}

#[test]
fn malformed_fields_degrade_to_defaults_instead_of_failing() {
    let raw = doc(
        "post-6",
        json!({
            "username": 42,
            "likes": "many",
            "comments": -3,
            "isVerified": "yes",
            "createdAt": { "bogus": true }
        }),
    );
    let before = Utc::now();

    let post = map_document(&raw);

    assert_eq!(post.username, DEFAULT_USERNAME);
    assert_eq!(post.likes, 0);
    assert_eq!(post.comments, 0);
    assert!(!post.is_verified);
    assert!(post.created_at >= before);
}

#[test]
fn compose_prefers_display_name_then_email_local_part() {
    let named = Post::compose(&account(Some("Trang"), Some("trang@example.com")), &PostDraft::default());
    let email_only = Post::compose(&account(None, Some("alice@example.com")), &PostDraft::default());
    let anonymous = Post::compose(&account(None, None), &PostDraft::default());

    assert_eq!(named.username, "Trang");
    assert_eq!(email_only.username, "alice");
    assert_eq!(anonymous.username, DEFAULT_USERNAME);
}

#[test]
fn compose_sanitizes_text_and_validates_image_url() {
    let draft = PostDraft {
        post_description: Some("  hello  ".to_string()),
        content: Some("<script>alert(1)</script>today I learned".to_string()),
        image_url: Some("javascript:alert(1)".to_string()),
    };

    let post = Post::compose(&account(Some("Trang"), None), &draft);

    assert_eq!(post.post_description, "hello");
    assert!(!post.content.contains("<script"));
    assert!(post.content.contains("today I learned"));
    assert_eq!(post.image_url, "");

    let draft_ok = PostDraft {
        image_url: Some("https://example.com/cat.png".to_string()),
        ..PostDraft::default()
    };
    let post_ok = Post::compose(&account(Some("Trang"), None), &draft_ok);
    assert_eq!(post_ok.image_url, "https://example.com/cat.png");
}

#[test]
fn with_updates_copies_without_touching_other_fields() {
    let raw = doc(
        "post-7",
        json!({ "username": "trang", "likes": 3, "content": "bài viết" }),
    );
    let post = map_document(&raw);

    let updated = post.with_updates(PostUpdates {
        likes: Some(4),
        is_liked: Some(true),
        ..PostUpdates::default()
    });

    assert_eq!(updated.likes, 4);
    assert!(updated.is_liked);
    assert_eq!(updated.username, "trang");
    assert_eq!(updated.content, "bài viết");
    // Original untouched
    assert_eq!(post.likes, 3);
    assert!(!post.is_liked);
}
