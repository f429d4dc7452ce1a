//! User service

use tracing::info;

use crate::error::{SpendError, SpendResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Service for user management
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a user; names are unique (case-insensitive)
    pub fn create(&self, name: &str, email: Option<&str>) -> SpendResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SpendError::Validation("User name cannot be empty".into()));
        }

        if self.storage.users.get_by_name(name)?.is_some() {
            return Err(SpendError::Duplicate {
                entity_type: "User",
                identifier: name.to_string(),
            });
        }

        let mut user = User::new(name);
        if let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) {
            if !email.contains('@') {
                return Err(SpendError::Validation(format!("Invalid email: {}", email)));
            }
            user = user.with_email(email);
        }

        self.storage.users.upsert(user.clone())?;
        self.storage.users.save()?;

        info!(user = %user.id, name = %user.name, "Created user");
        Ok(user)
    }

    /// Find a user by name or ID string
    pub fn find(&self, identifier: &str) -> SpendResult<Option<User>> {
        if let Some(user) = self.storage.users.get_by_name(identifier)? {
            return Ok(Some(user));
        }

        if let Ok(id) = identifier.parse::<UserId>() {
            return self.storage.users.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), but a missing user is an error
    pub fn require(&self, identifier: &str) -> SpendResult<User> {
        self.find(identifier)?
            .ok_or_else(|| SpendError::user_not_found(identifier))
    }

    pub fn list(&self) -> SpendResult<Vec<User>> {
        self.storage.users.get_all()
    }
}
