//! Category service
//!
//! Categories are either global defaults (no owner) or owned by one user.
//! A user sees both; only their own categories can be changed.

use tracing::info;

use crate::error::{SpendError, SpendResult};
use crate::models::{Category, CategoryId, UserId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a category owned by `user_id`
    pub fn create(
        &self,
        user_id: UserId,
        name: &str,
        color: &str,
        icon: &str,
    ) -> SpendResult<Category> {
        let name = name.trim();

        if self.storage.categories.find_by_name(user_id, name)?.is_some() {
            return Err(SpendError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        let category = Category::new(name, color, icon, user_id);
        category
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        info!(category = %category.name, user = %user_id, "Created category");
        Ok(category)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> SpendResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a visible category by name or ID string
    pub fn find(&self, user_id: UserId, identifier: &str) -> SpendResult<Option<Category>> {
        // Try by name first
        if let Some(category) = self.storage.categories.find_by_name(user_id, identifier)? {
            return Ok(Some(category));
        }

        // Try parsing as ID
        if let Ok(id) = identifier.parse::<CategoryId>() {
            return Ok(self
                .storage
                .categories
                .get(id)?
                .filter(|c| c.is_visible_to(user_id)));
        }

        Ok(None)
    }

    /// Categories visible to a user: global defaults plus their own
    pub fn list(&self, user_id: UserId) -> SpendResult<Vec<Category>> {
        self.storage.categories.visible_to(user_id)
    }

    /// Delete one of the user's own categories
    ///
    /// Expenses keep the dangling reference and are reported under the
    /// fallback category from then on.
    pub fn delete(&self, user_id: UserId, identifier: &str) -> SpendResult<Category> {
        let category = self
            .find(user_id, identifier)?
            .ok_or_else(|| SpendError::category_not_found(identifier))?;

        if category.owner_id != Some(user_id) {
            return Err(SpendError::Validation(format!(
                "Category '{}' is a global default and cannot be deleted",
                category.name
            )));
        }

        self.storage.categories.delete(category.id)?;
        self.storage.categories.save()?;

        info!(category = %category.name, user = %user_id, "Deleted category");
        Ok(category)
    }
}
