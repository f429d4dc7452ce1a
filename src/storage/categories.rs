//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json. Also acts as the
//! category resolver: expenses may reference ids that have since been deleted,
//! in which case lookups simply return `None`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendError;
use crate::models::{Category, CategoryId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
}

/// Global defaults first, then alphabetical
fn display_order(categories: &mut [Category]) {
    categories.sort_by(|a, b| {
        b.is_default
            .cmp(&a.is_default)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then(a.id.cmp(&b.id))
    });
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self.categories.write().map_err(lock_err)?;
        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendError> {
        let categories = self.categories.read().map_err(lock_err)?;

        let mut list: Vec<_> = categories.values().cloned().collect();
        display_order(&mut list);

        write_json_atomic(&self.path, &CategoryData { categories: list })
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, SpendError> {
        let categories = self.categories.read().map_err(lock_err)?;
        Ok(categories.get(&id).cloned())
    }

    pub fn get_all(&self) -> Result<Vec<Category>, SpendError> {
        let categories = self.categories.read().map_err(lock_err)?;
        let mut list: Vec<_> = categories.values().cloned().collect();
        display_order(&mut list);
        Ok(list)
    }

    /// Categories a user can see: their own plus global defaults
    pub fn visible_to(&self, user_id: UserId) -> Result<Vec<Category>, SpendError> {
        let mut list: Vec<_> = self
            .get_all()?
            .into_iter()
            .filter(|c| c.is_visible_to(user_id))
            .collect();
        display_order(&mut list);
        Ok(list)
    }

    /// Find a visible category by name (case-insensitive)
    ///
    /// A user's own category wins over a global default of the same name.
    pub fn find_by_name(&self, user_id: UserId, name: &str) -> Result<Option<Category>, SpendError> {
        let categories = self.categories.read().map_err(lock_err)?;
        let name_lower = name.trim().to_lowercase();

        let mut matches: Vec<_> = categories
            .values()
            .filter(|c| c.is_visible_to(user_id) && c.name.to_lowercase() == name_lower)
            .collect();
        matches.sort_by_key(|c| (c.owner_id.is_none(), c.created_at));

        Ok(matches.first().map(|c| (*c).clone()))
    }

    pub fn upsert(&self, category: Category) -> Result<(), SpendError> {
        let mut categories = self.categories.write().map_err(lock_err)?;
        categories.insert(category.id, category);
        Ok(())
    }

    /// Delete a category; expenses that referenced it fall back to the placeholder bucket
    pub fn delete(&self, id: CategoryId) -> Result<bool, SpendError> {
        let mut categories = self.categories.write().map_err(lock_err)?;
        Ok(categories.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, SpendError> {
        Ok(self.categories.read().map_err(lock_err)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = CategoryRepository::new(temp_dir.path().join("categories.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_visible_to_includes_globals_and_own() {
        let (_temp_dir, repo) = repo();
        let alice = UserId::new();
        let bob = UserId::new();

        repo.upsert(Category::global("Food", "#EF4444", "🍕")).unwrap();
        repo.upsert(Category::new("Coffee", "#A855F7", "☕", alice)).unwrap();
        repo.upsert(Category::new("Golf", "#22C55E", "⛳", bob)).unwrap();

        let visible = repo.visible_to(alice).unwrap();
        let names: Vec<_> = visible.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Food", "Coffee"]);
    }

    #[test]
    fn test_find_by_name_prefers_own_category() {
        let (_temp_dir, repo) = repo();
        let alice = UserId::new();
        let global = Category::global("Food", "#EF4444", "🍕");
        let own = Category::new("food", "#000000", "", alice);
        repo.upsert(global.clone()).unwrap();
        repo.upsert(own.clone()).unwrap();

        let found = repo.find_by_name(alice, "FOOD").unwrap().unwrap();
        assert_eq!(found.id, own.id);

        let found = repo.find_by_name(UserId::new(), "Food").unwrap().unwrap();
        assert_eq!(found.id, global.id);

        assert!(repo.find_by_name(alice, "Rent").unwrap().is_none());
    }

    #[test]
    fn test_delete_then_get_is_none() {
        let (_temp_dir, repo) = repo();
        let category = Category::global("Travel", "#84CC16", "✈️");
        let id = category.id;
        repo.upsert(category).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, repo) = repo();
        repo.upsert(Category::global("Bills", "#F59E0B", "📋")).unwrap();
        repo.save().unwrap();

        let reloaded = CategoryRepository::new(repo.path.clone());
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 1);
        assert_eq!(reloaded.get_all().unwrap()[0].name, "Bills");
    }
}
