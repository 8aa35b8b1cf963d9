// src/models/post.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::auth::Account;
use crate::store::{Document, Timestamp};
use crate::utils::sanitize::clean_text;

/// Placeholder display name for documents written without one.
pub const DEFAULT_USERNAME: &str = "Người dùng";

/// A feed entry as consumed by the presentation layer.
///
/// Every field is populated: `map_document` substitutes a deterministic
/// default for anything the raw document is missing, so consumers never see
/// the store's "absent" sentinel. Instances are recomputed from scratch on
/// every feed update and never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub username: String,
    pub avatar_url: String,
    pub is_verified: bool,
    pub post_description: String,
    pub content: String,
    pub image_url: String,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub uid: String,
    pub shared_by_uid: String,
    pub created_at: DateTime<Utc>,

    /// UI helper: whether the current viewer has liked this post.
    /// Session-relative, never authoritative.
    #[serde(default)]
    pub is_liked: bool,
}

/// User-authored input for a new post.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[validate(length(max = 500, message = "Description must be at most 500 chars"))]
    pub post_description: Option<String>,

    #[validate(length(max = 10000, message = "Content must be at most 10000 chars"))]
    pub content: Option<String>,

    pub image_url: Option<String>,
}

/// Field-level overrides for copying a post (the like toggle and similar
/// optimistic UI updates).
#[derive(Debug, Clone, Default)]
pub struct PostUpdates {
    pub post_description: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub shares: Option<u64>,
    pub is_liked: Option<bool>,
}

/// Shapes a raw store document into a fully-defaulted `Post`.
///
/// Total and pure: absent or malformed fields degrade to their documented
/// defaults instead of failing. A document without a usable `createdAt`
/// gets the mapping instant as an approximation, not an authoritative
/// creation time.
pub fn map_document(doc: &Document) -> Post {
    let data = &doc.fields;

    Post {
        id: doc.id.clone(),
        username: string_or(data.get("username"), DEFAULT_USERNAME),
        avatar_url: string_or(data.get("avatarUrl"), ""),
        is_verified: bool_or(data.get("isVerified"), false),
        post_description: string_or(data.get("postDescription"), ""),
        content: string_or(data.get("content"), ""),
        image_url: string_or(data.get("imageUrl"), ""),
        likes: count_or_zero(data.get("likes")),
        comments: count_or_zero(data.get("comments")),
        shares: count_or_zero(data.get("shares")),
        uid: string_or(data.get("uid"), ""),
        shared_by_uid: string_or(data.get("sharedByUid"), ""),
        created_at: data
            .get("createdAt")
            .and_then(Timestamp::from_value)
            .map(Timestamp::to_datetime)
            .unwrap_or_else(Utc::now),
        is_liked: bool_or(data.get("isLiked"), false),
    }
}

impl Post {
    /// Builds a new post for the signed-in account: display name, else the
    /// email local-part, else the placeholder. Draft text is sanitized and
    /// the image URL validated; invalid input degrades to empty, matching
    /// the mapper's policy. The id stays empty until the store assigns one.
    pub fn compose(account: &Account, draft: &PostDraft) -> Post {
        let username = account
            .display_name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| {
                account
                    .email
                    .as_deref()
                    .and_then(|email| email.split('@').next())
                    .filter(|local| !local.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_USERNAME.to_string());

        Post {
            id: String::new(),
            username,
            avatar_url: account.photo_url.clone().unwrap_or_default(),
            is_verified: false,
            post_description: clean_text(draft.post_description.as_deref().unwrap_or("")),
            content: clean_text(draft.content.as_deref().unwrap_or("")),
            image_url: normalize_image_url(draft.image_url.as_deref()),
            likes: 0,
            comments: 0,
            shares: 0,
            uid: account.uid.clone(),
            shared_by_uid: String::new(),
            created_at: Utc::now(),
            is_liked: false,
        }
    }

    /// Non-destructive copy with field-level overrides.
    pub fn with_updates(&self, updates: PostUpdates) -> Post {
        let mut next = self.clone();
        if let Some(v) = updates.post_description {
            next.post_description = v;
        }
        if let Some(v) = updates.content {
            next.content = v;
        }
        if let Some(v) = updates.image_url {
            next.image_url = v;
        }
        if let Some(v) = updates.likes {
            next.likes = v;
        }
        if let Some(v) = updates.comments {
            next.comments = v;
        }
        if let Some(v) = updates.shares {
            next.shares = v;
        }
        if let Some(v) = updates.is_liked {
            next.is_liked = v;
        }
        next
    }

    /// The document representation written to the store. The id is the
    /// document key and is not part of the field map.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("username".into(), Value::String(self.username.clone()));
        fields.insert("avatarUrl".into(), Value::String(self.avatar_url.clone()));
        fields.insert("isVerified".into(), Value::Bool(self.is_verified));
        fields.insert(
            "postDescription".into(),
            Value::String(self.post_description.clone()),
        );
        fields.insert("content".into(), Value::String(self.content.clone()));
        fields.insert("imageUrl".into(), Value::String(self.image_url.clone()));
        fields.insert("likes".into(), Value::from(self.likes));
        fields.insert("comments".into(), Value::from(self.comments));
        fields.insert("shares".into(), Value::from(self.shares));
        fields.insert("uid".into(), Value::String(self.uid.clone()));
        fields.insert(
            "sharedByUid".into(),
            Value::String(self.shared_by_uid.clone()),
        );
        fields.insert(
            "createdAt".into(),
            Timestamp::from_datetime(self.created_at).to_value(),
        );
        fields.insert("isLiked".into(), Value::Bool(self.is_liked));
        fields
    }
}

fn string_or(value: Option<&Value>, default: &str) -> String {
    match value.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

fn bool_or(value: Option<&Value>, default: bool) -> bool {
    value.and_then(Value::as_bool).unwrap_or(default)
}

fn count_or_zero(value: Option<&Value>) -> u64 {
    match value {
        Some(v) => v
            .as_u64()
            .or_else(|| v.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        None => 0,
    }
}

/// Only absolute http(s) URLs survive; everything else becomes empty.
fn normalize_image_url(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => match url::Url::parse(s) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => parsed.to_string(),
            _ => String::new(),
        },
        None => String::new(),
    }
}
