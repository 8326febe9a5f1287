use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::repositories::UserRepository;
use crate::domain::user::{NewUser, User, UserChanges, UserError, UserResult};

/// Records the directory starts with when seeding is enabled
const SEED_USERS: [(&str, &str, &str, &str, &str); 3] = [
    ("Amit Kumar", "amit@example.com", "Bangalore", "developer", "2025-01-10T09:00:00Z"),
    ("Priya Sharma", "priya@example.com", "Mumbai", "designer", "2025-01-12T14:30:00Z"),
    ("Rahul Verma", "rahul@example.com", "Delhi", "manager", "2025-01-15T11:15:00Z"),
];

#[derive(Debug, Default)]
struct Directory {
    users: Vec<User>,
    next_id: u64,
}

impl Directory {
    fn remove(&mut self, id: &str) -> bool {
        match self.users.iter().position(|user| user.id == id) {
            Some(index) => {
                self.users.remove(index);
                true
            }
            None => false,
        }
    }
}

/// In-memory implementation of UserRepository
///
/// IDs come from a counter that only moves forward, so an ID is never handed
/// out twice even after deletes. The records and the counter sit behind one
/// lock, which makes every insert/update/remove a single critical section.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    directory: RwLock<Directory>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository; the first inserted user gets ID "1"
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Creates a repository holding `users` in the given order
    ///
    /// The ID counter starts after the highest numeric ID present.
    pub fn with_users(users: Vec<User>) -> Self {
        let highest = users
            .iter()
            .filter_map(|user| user.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            directory: RwLock::new(Directory {
                users,
                next_id: highest + 1,
            }),
        }
    }

    /// Creates a repository holding the three default directory entries
    pub fn seeded() -> UserResult<Self> {
        let users = SEED_USERS
            .iter()
            .enumerate()
            .map(|(index, (name, email, city, role, created_at))| -> UserResult<User> {
                let created_at = DateTime::parse_from_rfc3339(created_at)
                    .map_err(|e| UserError::Internal(format!("Invalid seed timestamp: {}", e)))?
                    .with_timezone(&Utc);
                let fields = NewUser::new(*name, *email, *city, *role)?;
                Ok(User::new((index + 1).to_string(), fields, created_at))
            })
            .collect::<UserResult<Vec<_>>>()?;

        Ok(Self::with_users(users))
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> UserResult<Vec<User>> {
        Ok(self.directory.read().await.users.clone())
    }

    async fn find_by_id(&self, id: &str) -> UserResult<Option<User>> {
        let directory = self.directory.read().await;
        Ok(directory.users.iter().find(|user| user.id == id).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> UserResult<User> {
        let mut directory = self.directory.write().await;

        let id = directory.next_id;
        directory.next_id += 1;

        let user = User::new(id.to_string(), new_user, Utc::now());
        directory.users.push(user.clone());

        Ok(user)
    }

    async fn update(&self, id: &str, changes: UserChanges) -> UserResult<Option<User>> {
        let mut directory = self.directory.write().await;

        Ok(directory
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .map(|user| {
                user.apply(changes);
                user.clone()
            }))
    }

    async fn remove(&self, id: &str) -> UserResult<bool> {
        let mut directory = self.directory.write().await;
        Ok(directory.remove(id))
    }

    async fn remove_and_list(&self, id: &str) -> UserResult<Option<Vec<User>>> {
        let mut directory = self.directory.write().await;

        if !directory.remove(id) {
            return Ok(None);
        }

        Ok(Some(directory.users.clone()))
    }

    async fn len(&self) -> UserResult<usize> {
        Ok(self.directory.read().await.users.len())
    }
}
