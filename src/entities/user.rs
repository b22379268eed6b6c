//! User entity.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{TaskboardError, TaskboardResult};

/// User identifier.
pub type UserId = u64;

/// A person who can be responsible for tasks or author comments.
///
/// Equality is by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,

    name: String,
    email: String,

    /// Free-form role label (e.g. "DEV", "QA").
    pub role: String,

    active: bool,
}

impl User {
    /// Create a new user. Name and email are trimmed as given; validation
    /// applies on later mutation.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            role: role.into(),
            active: true,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the name. Rejects empty or whitespace-only input, keeping the
    /// prior value.
    pub fn set_name(&mut self, value: &str) -> TaskboardResult<()> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            warn!(user = self.id, "rejected empty user name");
            return Err(TaskboardError::EmptyName);
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Set the email. Anything containing an `@` passes; no further
    /// syntax checking.
    pub fn set_email(&mut self, value: &str) -> TaskboardResult<()> {
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.contains('@') {
            warn!(user = self.id, email = value, "rejected invalid email");
            return Err(TaskboardError::InvalidEmail {
                email: value.to_string(),
            });
        }
        self.email = trimmed.to_string();
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
        debug!(user = self.id, name = %self.name, "user activated");
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        debug!(user = self.id, name = %self.name, "user deactivated");
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}
