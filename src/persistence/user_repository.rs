//! Port abstraction for user persistence adapters and their errors.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::models::{User, UserDraft};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Store port used by the HTTP handlers.
///
/// Each operation maps to a single SQL statement in the Diesel adapter.
/// "Row absent" is modelled in the return types (`Option`, `bool`) rather
/// than as an error so handlers can distinguish 404s from store failures.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch every stored user. An empty table yields an empty vector.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find(&self, id: i32) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user and return the stored record with its assigned id.
    async fn create(&self, draft: UserDraft) -> Result<User, UserPersistenceError>;

    /// Overwrite name/email/city for the given id.
    ///
    /// Deliberately succeeds without touching any row when the id does not
    /// exist; the HTTP contract echoes the submitted representation either
    /// way.
    async fn update(&self, id: i32, draft: &UserDraft) -> Result<(), UserPersistenceError>;

    /// Delete a user by identifier. Returns `false` when no row matched.
    async fn delete(&self, id: i32) -> Result<bool, UserPersistenceError>;
}

/// In-process [`UserRepository`] used by handler and integration tests.
///
/// Mirrors the SQL adapter's observable behaviour, including sequential id
/// assignment and the non-validating update semantics.
pub struct InMemoryUserRepository {
    state: Mutex<InMemoryState>,
}

struct InMemoryState {
    users: Vec<User>,
    next_id: i32,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            state: Mutex::new(InMemoryState {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut InMemoryState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.with_state(|state| state.users.clone()))
    }

    async fn find(&self, id: i32) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.with_state(|state| state.users.iter().find(|u| u.id == id).cloned()))
    }

    async fn create(&self, draft: UserDraft) -> Result<User, UserPersistenceError> {
        Ok(self.with_state(|state| {
            let user = draft.into_user(state.next_id);
            state.next_id += 1;
            state.users.push(user.clone());
            user
        }))
    }

    async fn update(&self, id: i32, draft: &UserDraft) -> Result<(), UserPersistenceError> {
        self.with_state(|state| {
            if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
                user.name = draft.name.clone();
                user.email = draft.email.clone();
                user.city = draft.city.clone();
            }
        });
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, UserPersistenceError> {
        Ok(self.with_state(|state| {
            let before = state.users.len();
            state.users.retain(|u| u.id != id);
            state.users.len() < before
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> UserDraft {
        UserDraft {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            city: "London".into(),
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create(draft("Ada")).await.expect("create");
        let second = repo.create(draft("Grace")).await.expect("create");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn find_returns_none_for_absent_id() {
        let repo = InMemoryUserRepository::new();
        let found = repo.find(42).await.expect("find");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn update_is_a_noop_for_absent_id() {
        let repo = InMemoryUserRepository::new();
        repo.update(42, &draft("Ada")).await.expect("update");
        assert!(repo.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn update_overwrites_all_fields() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(draft("Ada")).await.expect("create");
        repo.update(user.id, &draft("Grace")).await.expect("update");
        let stored = repo
            .find(user.id)
            .await
            .expect("find")
            .expect("user present");
        assert_eq!(stored.name, "Grace");
        assert_eq!(stored.email, "grace@example.com");
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_matched() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(draft("Ada")).await.expect("create");
        assert!(repo.delete(user.id).await.expect("delete"));
        assert!(!repo.delete(user.id).await.expect("delete"));
    }
}
