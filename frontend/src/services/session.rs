//! Who is logged in, read from key/value session storage.

use log::warn;
use shared::SessionUser;
use std::cell::RefCell;
use std::collections::HashMap;

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "jwt";

/// Minimal `localStorage`-like interface
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Source of the current user and API token
pub trait SessionProvider {
    fn current_user(&self) -> Option<SessionUser>;
    fn token(&self) -> Option<String>;
}

/// In-memory storage, used outside the browser
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Session backed by a [`KeyValueStorage`]: the user lives under `user` as
/// JSON `{"type": ..., "email": ...}` and the API token under `jwt`
pub struct StorageSession<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> StorageSession<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist `user` as the logged-in user
    pub fn log_in(&self, user: &SessionUser) -> Result<(), serde_json::Error> {
        let raw = serde_json::to_string(user)?;
        self.storage.set_item(USER_KEY, &raw);
        Ok(())
    }

    pub fn log_out(&self) {
        self.storage.remove_item(USER_KEY);
        self.storage.remove_item(TOKEN_KEY);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStorage> SessionProvider for StorageSession<S> {
    fn current_user(&self) -> Option<SessionUser> {
        let raw = self.storage.get_item(USER_KEY)?;
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(target: "session", "Ignoring malformed session user: {}", e);
                None
            }
        }
    }

    fn token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_user_json() {
        let storage = MemoryStorage::new();
        storage.set_item("user", r#"{"type":"Employee","email":"a@a"}"#);
        let session = StorageSession::new(storage);

        let user = session.current_user().unwrap();
        assert_eq!(user.email, "a@a");
        assert_eq!(user.user_type, "Employee");
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_malformed_user_is_no_user() {
        let storage = MemoryStorage::new();
        storage.set_item("user", "a@a");
        let session = StorageSession::new(storage);

        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_log_in_and_out() {
        let session = StorageSession::new(MemoryStorage::new());
        session
            .log_in(&SessionUser {
                user_type: "Employee".to_string(),
                email: "employee@test.tld".to_string(),
            })
            .unwrap();
        session.storage().set_item("jwt", "token-1");

        assert_eq!(session.current_user().unwrap().email, "employee@test.tld");
        assert_eq!(session.token().as_deref(), Some("token-1"));

        session.log_out();
        assert!(session.current_user().is_none());
        assert!(session.token().is_none());
    }
}
