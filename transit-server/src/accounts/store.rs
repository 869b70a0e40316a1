//! Pluggable user storage.
//!
//! The whole user list is loaded and saved at once. There is no
//! durability guarantee beyond a single file rewrite.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::user::User;

/// Errors from a user store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("user store I/O error: {message}")]
    Io { message: String },

    /// The backing file is not a JSON list of users
    #[error("user store JSON error: {message}")]
    Json { message: String },
}

/// Storage for the user list.
pub trait UserStore: Send + Sync {
    /// Load every user, in insertion order.
    fn load(&self) -> Result<Vec<User>, StoreError>;

    /// Replace the stored list.
    fn save(&self, users: &[User]) -> Result<(), StoreError>;
}

/// Users kept in a pretty-printed JSON array file.
#[derive(Debug, Clone)]
pub struct JsonUserStore {
    path: PathBuf,
}

impl JsonUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserStore for JsonUserStore {
    /// A missing file is an empty store.
    fn load(&self) -> Result<Vec<User>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    message: format!("failed to read {}: {}", self.path.display(), e),
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| StoreError::Json {
            message: e.to_string(),
        })
    }

    /// Creates parent directories if they don't exist.
    fn save(&self, users: &[User]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                message: format!("failed to create store directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(users).map_err(|e| StoreError::Json {
            message: format!("failed to serialize users: {}", e),
        })?;

        std::fs::write(&self.path, json).map_err(|e| StoreError::Io {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })
    }
}

/// Users kept in memory only.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }
}

impl UserStore for MemoryUserStore {
    fn load(&self) -> Result<Vec<User>, StoreError> {
        let guard = self.users.lock().map_err(|_| StoreError::Io {
            message: "memory store lock poisoned".to_string(),
        })?;
        Ok(guard.clone())
    }

    fn save(&self, users: &[User]) -> Result<(), StoreError> {
        let mut guard = self.users.lock().map_err(|_| StoreError::Io {
            message: "memory store lock poisoned".to_string(),
        })?;
        *guard = users.to_vec();
        Ok(())
    }
}
