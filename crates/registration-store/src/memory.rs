//! In-memory registration store.

use crate::error::PersistenceError;
use crate::types::{NewRegistration, Registration};
use crate::RegistrationStore;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local store, used for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Rows in insertion order
    rows: RwLock<Vec<Registration>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored rows.
    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert(&self, registration: &NewRegistration) -> Result<Registration, PersistenceError> {
        let now = Utc::now();
        let stored = Registration {
            id: Uuid::new_v4().to_string(),
            name: registration.name.clone(),
            email: registration.email.clone(),
            city: registration.city.clone(),
            tickets: registration.tickets,
            created_at: now,
            updated_at: Some(now),
        };

        self.rows.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Registration>, PersistenceError> {
        let rows = self.rows.read().await;

        // Newest first; reversing before the stable sort puts later inserts
        // ahead on equal timestamps.
        let mut listed: Vec<Registration> = rows.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> NewRegistration {
        NewRegistration {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            city: "London".to_string(),
            tickets: 2,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let stored = store.insert(&sample("Ada")).await.unwrap();

        assert!(!stored.id.is_empty());
        assert_eq!(stored.details(), sample("Ada"));
        assert_eq!(stored.updated_at, Some(stored.created_at));
    }

    #[tokio::test]
    async fn test_duplicate_submissions_create_separate_rows() {
        let store = MemoryStore::new();
        let first = store.insert(&sample("Ada")).await.unwrap();
        let second = store.insert(&sample("Ada")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = MemoryStore::new();
        store.insert(&sample("Ada")).await.unwrap();
        store.insert(&sample("Grace")).await.unwrap();
        store.insert(&sample("Alan")).await.unwrap();

        let names: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["Alan", "Grace", "Ada"]);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let store = MemoryStore::new();
        tokio_test::assert_ok!(store.list_all().await);
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
