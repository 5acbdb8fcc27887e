//! Backing stores for environment-style pairs
//!
//! The walker never touches the process environment directly. Decoding from
//! the environment takes a [`snapshot`](EnvironmentStore::snapshot) once, then
//! only calls [`delete`](EnvironmentStore::delete) for fields marked `delenv`.

use std::env;

use crate::Pairs;

/// A mutable source of key/value pairs.
pub trait EnvironmentStore {
    /// Copy every pair whose key starts with `prefix`.
    fn snapshot(&self, prefix: &str) -> Pairs;

    /// Current value of `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Remove `key` from the store.
    fn delete(&mut self, key: &str);
}

/// The process environment.
///
/// Deleting mutates global state: serialize decodes that use `delenv`
/// against this store.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvironmentStore for ProcessEnv {
    fn snapshot(&self, prefix: &str) -> Pairs {
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .filter(|(k, _)| k.starts_with(prefix))
            .collect()
    }

    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn delete(&mut self, key: &str) {
        tracing::trace!(key, "removing environment variable");
        env::remove_var(key);
    }
}

/// In-memory store, for tests and for callers that assemble pairs by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    pairs: Pairs,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.set(key, value);
    }

    /// Everything currently stored.
    pub fn pairs(&self) -> &Pairs {
        &self.pairs
    }
}

impl From<Pairs> for MemoryStore {
    fn from(pairs: Pairs) -> Self {
        Self { pairs }
    }
}

impl EnvironmentStore for MemoryStore {
    fn snapshot(&self, prefix: &str) -> Pairs {
        self.pairs.filter(prefix)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.pairs.get(key).map(str::to_string)
    }

    fn delete(&mut self, key: &str) {
        self.pairs.remove(key);
    }
}
