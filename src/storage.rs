//! Key/value storage abstraction for client-side persistence.
//!
//! The cart is persisted under a fixed key through a storage backend the
//! embedding supplies: a browser-shaped store where one exists, an
//! in-memory store for tests, or the no-op store in a server context
//! where nothing may persist. Corrupt payloads are logged and treated as
//! absent; the routing layer owns none of this state.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tracing::error;

/// Fixed key the cart is persisted under.
pub const CART_KEY: &str = "shopping_cart";

/// Raw string key/value backend.
pub trait KeyValue: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// In-memory backend for tests and long-lived client embeddings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

/// Backend for contexts with no persistent store (a server render pass):
/// writes vanish, reads find nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl KeyValue for NoopStore {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }

    fn set_item(&self, _key: &str, _value: &str) {}

    fn remove_item(&self, _key: &str) {}
}

/// Typed view over one key of a backend, (de)serializing through JSON.
pub struct Storage<T> {
    key: String,
    backend: Arc<dyn KeyValue>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> Storage<T> {
    #[must_use]
    pub fn new(key: &str, backend: Arc<dyn KeyValue>) -> Self {
        Self {
            key: key.to_string(),
            backend,
            _marker: PhantomData,
        }
    }

    /// Read and deserialize the stored value. A missing key and a corrupt
    /// payload both read as `None`; corruption is logged.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        let raw = self.backend.get_item(&self.key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                error!(key = %self.key, error = %err, "corrupt storage payload, treating as absent");
                None
            }
        }
    }

    /// Serialize and store a value. Serialization failures are logged and
    /// leave the previous payload in place.
    pub fn set(&self, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.backend.set_item(&self.key, &raw),
            Err(err) => error!(key = %self.key, error = %err, "failed to serialize storage payload"),
        }
    }

    /// Remove the stored value.
    pub fn reset(&self) {
        self.backend.remove_item(&self.key);
    }
}

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub title: String,
    pub price: u64,
    pub image: String,
    pub quantity: u32,
}

/// The cart storage collaborator, keyed by [`CART_KEY`].
#[must_use]
pub fn cart_storage(backend: Arc<dyn KeyValue>) -> Storage<Vec<CartItem>> {
    Storage::new(CART_KEY, backend)
}
