//! Expense categories
//!
//! A category with no owner is a global default visible to every user;
//! user-created categories are visible only to their owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, UserId};

/// An expense category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Hex color, e.g. "#EF4444"
    pub color: String,

    /// Short icon (usually a single emoji)
    #[serde(default)]
    pub icon: String,

    /// Whether this is one of the seeded defaults
    #[serde(default)]
    pub is_default: bool,

    /// Owning user; `None` for global defaults
    #[serde(default)]
    pub owner_id: Option<UserId>,

    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a category owned by a user
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
        owner_id: UserId,
    ) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
            is_default: false,
            owner_id: Some(owner_id),
            created_at: Utc::now(),
        }
    }

    /// Create a global default category
    pub fn global(name: impl Into<String>, color: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
            is_default: true,
            owner_id: None,
            created_at: Utc::now(),
        }
    }

    /// Whether a user may see (and file expenses under) this category
    pub fn is_visible_to(&self, user_id: UserId) -> bool {
        match self.owner_id {
            None => true,
            Some(owner) => owner == user_id,
        }
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.icon.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.icon, self.name)
        }
    }
}

/// `#RGB` or `#RRGGBB`
fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Categories seeded on `init`, visible to every user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Healthcare,
    Education,
    Travel,
}

impl DefaultCategory {
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Transport,
            Self::Shopping,
            Self::Bills,
            Self::Entertainment,
            Self::Healthcare,
            Self::Education,
            Self::Travel,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "🍕",
            Self::Transport => "🚗",
            Self::Shopping => "🛍️",
            Self::Bills => "📋",
            Self::Entertainment => "🎬",
            Self::Healthcare => "💊",
            Self::Education => "🎓",
            Self::Travel => "✈️",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Food => "#EF4444",
            Self::Transport => "#3B82F6",
            Self::Shopping => "#10B981",
            Self::Bills => "#F59E0B",
            Self::Entertainment => "#8B5CF6",
            Self::Healthcare => "#EC4899",
            Self::Education => "#06B6D4",
            Self::Travel => "#84CC16",
        }
    }

    pub fn to_category(&self) -> Category {
        Category::global(self.name(), self.color(), self.icon())
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => write!(f, "Invalid hex color: {}", color),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
