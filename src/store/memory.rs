// src/store/memory.rs

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::store::{
    Direction, Document, DocumentStore, Query, QuerySnapshot, SnapshotHandler, StoreSubscription,
    SubscriptionErrorHandler, compare_values,
};

struct Subscriber {
    query: Query,
    on_next: Arc<SnapshotHandler>,
    on_error: Arc<SubscriptionErrorHandler>,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, BTreeMap<String, Map<String, Value>>>,
    subscribers: HashMap<Uuid, Subscriber>,
}

/// In-process document store.
///
/// Plays the role the hosted emulator plays for the real backend: the same
/// write/merge semantics and the same snapshot-per-commit delivery, without
/// a network. Every committed write produces exactly one snapshot per
/// matching subscriber, and deliveries are serialized: a write does not
/// return until its snapshots have been handed to all subscribers.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
    // Taken before the data lock on every write and on subscribe, so
    // snapshot delivery follows commit order even across threads.
    delivery: Arc<Mutex<()>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes every subscriber's error handler, standing in for a
    /// backend-side subscription failure. Fault injection for tests and
    /// demos; the data and the subscriptions themselves are untouched.
    pub fn inject_subscription_error(&self, message: &str) {
        let _delivery = self.delivery.lock().expect("store delivery lock poisoned");
        let handlers: Vec<Arc<SubscriptionErrorHandler>> = {
            let inner = self.inner.lock().expect("store lock poisoned");
            inner
                .subscribers
                .values()
                .map(|s| Arc::clone(&s.on_error))
                .collect()
        };
        for handler in handlers {
            handler(AppError::StoreSubscription(message.to_string()));
        }
    }

    fn snapshot_for(inner: &Inner, query: &Query) -> QuerySnapshot {
        let mut docs: Vec<Document> = inner
            .collections
            .get(&query.collection)
            .map(|coll| {
                coll.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default();

        if let Some((field, direction)) = &query.order_by {
            docs.sort_by(|a, b| {
                // A missing order field sorts as least, so descending
                // queries push such documents to the end of the snapshot.
                let ord = match (a.fields.get(field), b.fields.get(field)) {
                    (Some(x), Some(y)) => compare_values(x, y),
                    (Some(_), None) => std::cmp::Ordering::Greater,
                    (None, Some(_)) => std::cmp::Ordering::Less,
                    (None, None) => std::cmp::Ordering::Equal,
                };
                match direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        QuerySnapshot { docs }
    }

    /// Delivers the current snapshot of `collection` to every matching
    /// subscriber. Callers must hold the delivery lock.
    fn notify(&self, collection: &str) {
        let pending: Vec<(Arc<SnapshotHandler>, QuerySnapshot)> = {
            let inner = self.inner.lock().expect("store lock poisoned");
            inner
                .subscribers
                .values()
                .filter(|s| s.query.collection == collection)
                .map(|s| {
                    (
                        Arc::clone(&s.on_next),
                        Self::snapshot_for(&inner, &s.query),
                    )
                })
                .collect()
        };
        for (handler, snapshot) in pending {
            handler(snapshot);
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
        merge: bool,
    ) -> Result<(), AppError> {
        let _delivery = self.delivery.lock().expect("store delivery lock poisoned");
        {
            let mut inner = self.inner.lock().expect("store lock poisoned");
            let coll = inner.collections.entry(collection.to_string()).or_default();
            match coll.entry(id.to_string()) {
                Entry::Occupied(mut entry) if merge => {
                    entry.get_mut().extend(fields);
                }
                Entry::Occupied(mut entry) => {
                    *entry.get_mut() = fields;
                }
                Entry::Vacant(entry) => {
                    entry.insert(fields);
                }
            }
        }
        self.notify(collection);
        Ok(())
    }

    async fn add_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<String, AppError> {
        let id = Uuid::new_v4().to_string();
        let _delivery = self.delivery.lock().expect("store delivery lock poisoned");
        {
            let mut inner = self.inner.lock().expect("store lock poisoned");
            inner
                .collections
                .entry(collection.to_string())
                .or_default()
                .insert(id.clone(), fields);
        }
        self.notify(collection);
        Ok(id)
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, AppError> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner
            .collections
            .get(collection)
            .and_then(|coll| coll.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }

    fn subscribe(
        &self,
        query: Query,
        on_next: SnapshotHandler,
        on_error: SubscriptionErrorHandler,
    ) -> StoreSubscription {
        let subscription_id = Uuid::new_v4();
        let on_next = Arc::new(on_next);

        let _delivery = self.delivery.lock().expect("store delivery lock poisoned");
        let initial = {
            let mut inner = self.inner.lock().expect("store lock poisoned");
            inner.subscribers.insert(
                subscription_id,
                Subscriber {
                    query: query.clone(),
                    on_next: Arc::clone(&on_next),
                    on_error: Arc::new(on_error),
                },
            );
            Self::snapshot_for(&inner, &query)
        };
        on_next(initial);
        drop(_delivery);

        let inner = Arc::clone(&self.inner);
        let delivery = Arc::clone(&self.delivery);
        StoreSubscription::new(move || {
            // Taking the delivery lock first means no snapshot can be in
            // flight once detach returns.
            let _delivery = delivery.lock().expect("store delivery lock poisoned");
            inner
                .lock()
                .expect("store lock poisoned")
                .subscribers
                .remove(&subscription_id);
        })
    }
}
