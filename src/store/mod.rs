// src/store/mod.rs

pub mod memory;

use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

use crate::error::AppError;

pub use memory::MemoryStore;

/// A raw record read from a collection: the store-assigned identifier plus
/// an untyped field map. Shaping this into a typed model is the mapper's
/// job, not the store's.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self { id: id.into(), fields }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Server-side query description: one collection, optionally ordered by a
/// single field.
#[derive(Debug, Clone)]
pub struct Query {
    pub collection: String,
    pub order_by: Option<(String, Direction)>,
}

impl Query {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            order_by: None,
        }
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }
}

/// The full current result set of a query, delivered to a live subscriber
/// on every change. Always a complete snapshot, never a delta.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    pub docs: Vec<Document>,
}

pub type SnapshotHandler = Box<dyn Fn(QuerySnapshot) + Send + Sync>;
pub type SubscriptionErrorHandler = Box<dyn Fn(AppError) + Send + Sync>;

/// Detach handle for a live subscription.
///
/// Detaches on drop; `detach` does the same explicitly. After either, no
/// further snapshots are delivered to the subscription's handlers.
pub struct StoreSubscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl StoreSubscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn detach(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        self.run();
    }
}

/// Document-store capability consumed by the client core.
///
/// Write and read operations model a network round trip and suspend the
/// caller; subscription registration is immediate and callback-driven.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `fields` to `collection/id`. With `merge`, only the given
    /// fields are touched (field-level upsert) and the document is created
    /// if absent; without it the document is replaced wholesale.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
        merge: bool,
    ) -> Result<(), AppError>;

    /// Writes a new document under a store-assigned id; returns the id.
    async fn add_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<String, AppError>;

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, AppError>;

    /// Registers a live subscriber. The current snapshot is delivered
    /// immediately, then one snapshot per committed change, in commit
    /// order. Handlers must not write back into the store synchronously.
    fn subscribe(
        &self,
        query: Query,
        on_next: SnapshotHandler,
        on_error: SubscriptionErrorHandler,
    ) -> StoreSubscription;
}

/// The store's native timestamp representation.
///
/// Documents may carry a timestamp in three encodings: the native
/// `{"seconds", "nanoseconds"}` object, an integer of epoch milliseconds,
/// or an RFC 3339 string. `from_value` accepts all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: u32,
}

impl Timestamp {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            seconds: dt.timestamp(),
            nanos: dt.timestamp_subsec_nanos(),
        }
    }

    pub fn to_datetime(self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.seconds, self.nanos).unwrap_or(DateTime::UNIX_EPOCH)
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let seconds = map.get("seconds")?.as_i64()?;
                let nanos = map
                    .get("nanoseconds")
                    .and_then(Value::as_u64)
                    .unwrap_or(0) as u32;
                Some(Self { seconds, nanos })
            }
            Value::Number(n) => n.as_i64().map(|millis| Self {
                seconds: millis.div_euclid(1000),
                nanos: (millis.rem_euclid(1000) * 1_000_000) as u32,
            }),
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| Self::from_datetime(dt.with_timezone(&Utc))),
            _ => None,
        }
    }

    pub fn to_value(self) -> Value {
        json!({ "seconds": self.seconds, "nanoseconds": self.nanos })
    }
}

/// Field ordering used for server-side `order_by`.
///
/// Timestamps (in any supported encoding) compare chronologically;
/// otherwise numbers, strings and bools compare within their own type and
/// mixed types fall back to a fixed type rank.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    if let (Some(x), Some(y)) = (Timestamp::from_value(a), Timestamp::from_value(b)) {
        return x.cmp(&y);
    }

    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .unwrap_or(0.0)
            .partial_cmp(&y.as_f64().unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
