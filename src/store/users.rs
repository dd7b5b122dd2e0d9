use std::path::PathBuf;

use crate::error::StoreError;
use crate::models::User;

use super::entity::{EntityStore, Record};

impl Record for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// File-backed user collection with unique, trimmed email addresses.
pub struct UserStore {
    inner: EntityStore<User>,
}

impl UserStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: EntityStore::open(path)?,
        })
    }

    pub fn add(&mut self, mut user: User) -> Result<u64, StoreError> {
        user.email = user.email.trim().to_string();
        if user.email.is_empty() {
            return Err(StoreError::Validation("email must not be empty".into()));
        }
        if self.find_by_email(&user.email).is_ok() {
            return Err(StoreError::Validation("Email is already taken".into()));
        }
        self.inner.add(user)
    }

    pub fn get(&self, id: u64) -> Result<&User, StoreError> {
        self.inner.get(id)
    }

    pub fn find_by_email(&self, email: &str) -> Result<&User, StoreError> {
        let email = email.trim();
        self.inner
            .all()
            .iter()
            .find(|user| user.email == email)
            .ok_or(StoreError::NotFound)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str) -> User {
        User {
            id: 0,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_emails_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = UserStore::open(dir.path().join("users.json")).unwrap();
        store.add(user("ada@example.com")).unwrap();

        let result = store.add(user("  ada@example.com "));
        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn lookup_by_email_trims_the_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = UserStore::open(dir.path().join("users.json")).unwrap();
        let id = store.add(user(" ada@example.com ")).unwrap();

        let found = store.find_by_email("ada@example.com").unwrap();
        assert_eq!(found.id, id);
        assert!(store.find_by_email("nobody@example.com").is_err());
    }
}
