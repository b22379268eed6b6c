//! Tag entity.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::DEFAULT_TAG_COLOR;
use crate::errors::{TaskboardError, TaskboardResult};

/// Tag identifier.
pub type TagId = u64;

/// How a tag is used on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    /// Marks the kind of a task (bug, feature, documentation).
    Type,
    /// Marks priority (low, medium, high, critical).
    Priority,
    /// Any other free-form label.
    #[default]
    Generic,
}

impl std::fmt::Display for TagCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type => write!(f, "type"),
            Self::Priority => write!(f, "priority"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

impl std::str::FromStr for TagCategory {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "type" => Ok(Self::Type),
            "priority" => Ok(Self::Priority),
            "generic" => Ok(Self::Generic),
            _ => Err(TaskboardError::InvalidCategory {
                category: s.to_string(),
            }),
        }
    }
}

/// A labeled category attachable to tasks.
///
/// Tags live in the store's global catalog; tasks reference them by id.
/// Equality is by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,

    name: String,
    color: String,
    category: TagCategory,
}

impl Tag {
    /// Create a new tag. An empty color falls back to the neutral default.
    pub fn new(
        id: TagId,
        name: impl Into<String>,
        color: impl Into<String>,
        category: TagCategory,
    ) -> Self {
        let color = color.into().trim().to_string();
        Self {
            id,
            name: name.into().trim().to_string(),
            color: if color.is_empty() {
                DEFAULT_TAG_COLOR.to_string()
            } else {
                color
            },
            category,
        }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, value: &str) -> TaskboardResult<()> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            warn!(tag = self.id, "rejected empty tag name");
            return Err(TaskboardError::EmptyName);
        }
        self.name = trimmed.to_string();
        Ok(())
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_color(&mut self, value: &str) -> TaskboardResult<()> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            warn!(tag = self.id, "rejected empty tag color");
            return Err(TaskboardError::EmptyColor);
        }
        self.color = trimmed.to_string();
        Ok(())
    }

    pub fn category(&self) -> TagCategory {
        self.category
    }

    pub fn set_category(&mut self, value: TagCategory) {
        self.category = value;
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tag {}
