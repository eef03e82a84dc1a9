//! Session state for the current run of the client.
//!
//! The session is two entries in a key-value store: the bearer token and the
//! admin flag. They are written together on login and removed together on
//! logout, and they live only as long as the store does.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

pub const TOKEN_KEY: &str = "auth-token";
pub const ADMIN_KEY: &str = "is-admin";

/// String key-value storage scoped to a single session.
///
/// The `*_all` methods apply to every key at once: no reader observes some
/// of the keys written and others not.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);

    fn get_all(&self, keys: &[&str]) -> Vec<Option<String>>;
    fn set_all(&self, entries: Vec<(&str, String)>);
    fn remove_all(&self, keys: &[&str]);
}

/// In-process storage that disappears with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }

    fn get_all(&self, keys: &[&str]) -> Vec<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        keys.iter().map(|key| entries.get(*key).cloned()).collect()
    }

    fn set_all(&self, values: Vec<(&str, String)>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in values {
            entries.insert(key.to_string(), value);
        }
    }

    fn remove_all(&self, keys: &[&str]) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            entries.remove(*key);
        }
    }
}

/// Handle over the session entries.
///
/// Cloning is cheap and every clone sees the same storage, so the request
/// builder, the API client and the page controllers all read the current
/// session at the moment they need it.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// The bearer token, or an empty string when logged out.
    pub fn get_token(&self) -> String {
        self.storage.get(TOKEN_KEY).unwrap_or_default()
    }

    pub fn has_token(&self) -> bool {
        !self.get_token().is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.storage.get(ADMIN_KEY).as_deref() == Some("true")
    }

    /// Token and admin flag read together, as one consistent pair.
    pub fn snapshot(&self) -> (String, bool) {
        let mut values = self.storage.get_all(&[TOKEN_KEY, ADMIN_KEY]).into_iter();
        let token = values.next().flatten().unwrap_or_default();
        let is_admin = values.next().flatten().as_deref() == Some("true");
        (token, is_admin)
    }

    pub fn set_session(&self, token: &str, is_admin: bool) {
        self.storage.set_all(vec![
            (TOKEN_KEY, token.to_string()),
            (ADMIN_KEY, is_admin.to_string()),
        ]);
        tracing::debug!("Session stored (admin: {})", is_admin);
    }

    pub fn clear_session(&self) {
        self.storage.remove_all(&[TOKEN_KEY, ADMIN_KEY]);
        tracing::debug!("Session cleared");
    }

    /// First ten characters of the token, for log lines.
    pub fn token_preview(&self) -> Option<String> {
        let token = self.get_token();
        if token.is_empty() {
            return None;
        }
        Some(format!("{}...", token.chars().take(10).collect::<String>()))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let is_admin = self.snapshot().1;
        f.debug_struct("SessionStore")
            .field("token", &self.token_preview())
            .field("is_admin", &is_admin)
            .finish()
    }
}
