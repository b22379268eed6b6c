//! Crate-wide configuration.

use serde::{Deserialize, Serialize};

/// Neutral gray used when a tag is created without a color.
pub const DEFAULT_TAG_COLOR: &str = "#888888";

/// Policy knobs for a [`TaskStore`](crate::domain::TaskStore).
///
/// A store built with [`TaskStore::new`](crate::domain::TaskStore::new)
/// uses the defaults; pass a custom config via
/// [`TaskStore::with_config`](crate::domain::TaskStore::with_config).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskboardConfig {
    /// Color assigned to tags created without one.
    #[serde(rename = "defaultTagColor")]
    pub default_tag_color: String,

    /// Whether comments may be attached without an author.
    #[serde(rename = "allowAnonymousComments")]
    pub allow_anonymous_comments: bool,

    /// Upper bound on comments per task.
    #[serde(rename = "maxCommentsPerTask")]
    pub max_comments_per_task: usize,
}

impl Default for TaskboardConfig {
    fn default() -> Self {
        Self {
            default_tag_color: DEFAULT_TAG_COLOR.to_string(),
            allow_anonymous_comments: false,
            max_comments_per_task: 100,
        }
    }
}
