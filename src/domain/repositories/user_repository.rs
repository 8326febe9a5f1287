use async_trait::async_trait;

use crate::domain::user::{NewUser, User, UserChanges, UserResult};

/// Repository trait for the user directory
///
/// The repository owns the ordered collection of users and is the single
/// source of truth for it. Implementations must keep each mutation atomic
/// with respect to concurrent callers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user in insertion order
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Find a user by ID
    async fn find_by_id(&self, id: &str) -> UserResult<Option<User>>;

    /// Assign an ID and creation timestamp, then append the user
    async fn insert(&self, new_user: NewUser) -> UserResult<User>;

    /// Overwrite the supplied fields of a user in place
    ///
    /// Returns `None` when no user has the given ID.
    async fn update(&self, id: &str, changes: UserChanges) -> UserResult<Option<User>>;

    /// Remove a user, returning whether one was removed
    async fn remove(&self, id: &str) -> UserResult<bool>;

    /// Remove a user and return the users left behind, read under the same
    /// critical section as the removal
    ///
    /// Returns `None` (with no mutation) when no user has the given ID.
    async fn remove_and_list(&self, id: &str) -> UserResult<Option<Vec<User>>>;

    /// Number of users in the directory
    async fn len(&self) -> UserResult<usize>;

    async fn is_empty(&self) -> UserResult<bool> {
        Ok(self.len().await? == 0)
    }
}
