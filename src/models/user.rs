//! User model
//!
//! Users are identity only: every expense and every custom category hangs off
//! a `UserId`. Authentication lives outside this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.email {
            Some(email) => write!(f, "{} <{}>", self.name, email),
            None => write!(f, "{}", self.name),
        }
    }
}
