//! Durable key-value storage abstraction
//!
//! The statistics record is one opaque JSON value under one key, so any
//! backend that can `get` and `set` a string works:
//! - Memory: in-process map for tests and ephemeral sessions
//! - File: one JSON file per key (terminal front end)
//! - Browser: `localStorage` (wasm front end)

use crate::error::{StoreError, StoreResult};
use std::collections::HashMap;

/// Trait for durable key-value backends
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value under `key`; readers never observe a partial write
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Backend name for display and logs
    fn backend_name(&self) -> &'static str;
}

/// In-memory store
#[derive(Debug, Clone)]
pub struct MemoryStore {
    data: HashMap<String, String>,
    available: bool,
    readable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            available: true,
            readable: true,
        }
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.data.insert(key.to_string(), value.to_string());
        store
    }

    /// Simulate an unreachable backend
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Simulate a backend whose reads fail while writes still land
    pub fn set_readable(&mut self, readable: bool) {
        self.readable = readable;
    }

    /// Raw value, bypassing availability
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store disabled".into()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check_available()?;
        if !self.readable {
            return Err(StoreError::Unavailable("memory store reads disabled".into()));
        }
        Ok(self.data.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.check_available()?;
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "Memory"
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(store.backend_name(), "Memory");
    }

    #[test]
    fn test_memory_store_unavailable() {
        let mut store = MemoryStore::with_value("k", "v");
        store.set_available(false);

        assert!(matches!(store.get("k"), Err(StoreError::Unavailable(_))));
        assert!(store.set("k", "w").is_err());
        assert_eq!(store.raw("k"), Some("v"));
    }

    #[test]
    fn test_memory_store_unreadable() {
        let mut store = MemoryStore::with_value("k", "v");
        store.set_readable(false);

        assert!(store.get("k").is_err());
        store.set("k", "w").unwrap();
        assert_eq!(store.raw("k"), Some("w"));
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
