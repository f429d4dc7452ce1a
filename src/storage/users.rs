//! User repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendError;
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

pub struct UserRepository {
    path: PathBuf,
    users: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            users: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendError> {
        let file_data: UserData = read_json(&self.path)?;
        let mut users = self.users.write().map_err(lock_err)?;
        users.clear();
        for user in file_data.users {
            users.insert(user.id, user);
        }
        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendError> {
        let users = self.users.read().map_err(lock_err)?;
        let mut list: Vec<_> = users.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        write_json_atomic(&self.path, &UserData { users: list })
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>, SpendError> {
        Ok(self.users.read().map_err(lock_err)?.get(&id).cloned())
    }

    /// Case-insensitive lookup by name
    pub fn get_by_name(&self, name: &str) -> Result<Option<User>, SpendError> {
        let users = self.users.read().map_err(lock_err)?;
        let name_lower = name.trim().to_lowercase();
        Ok(users
            .values()
            .find(|u| u.name.to_lowercase() == name_lower)
            .cloned())
    }

    pub fn get_all(&self) -> Result<Vec<User>, SpendError> {
        let users = self.users.read().map_err(lock_err)?;
        let mut list: Vec<_> = users.values().cloned().collect();
        list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(list)
    }

    pub fn upsert(&self, user: User) -> Result<(), SpendError> {
        self.users.write().map_err(lock_err)?.insert(user.id, user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lookup_and_persist() {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        let user = User::new("Demo User");
        let id = user.id;
        repo.upsert(user).unwrap();

        assert_eq!(repo.get_by_name("demo user").unwrap().unwrap().id, id);
        assert!(repo.get_by_name("nobody").unwrap().is_none());

        repo.save().unwrap();
        let reloaded = UserRepository::new(temp_dir.path().join("users.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(id).unwrap().unwrap().name, "Demo User");
    }
}
