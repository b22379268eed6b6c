//! In-memory task store.
//!
//! Single source of truth for tasks, tags and users. All collections are
//! plain vectors mutated synchronously from one thread; referential
//! integrity across them (tag links, responsible users) is maintained here
//! through explicit cascades.

use chrono::Utc;
use tracing::debug;

use crate::config::TaskboardConfig;
use crate::entities::{
    Comment, CommentId, Tag, TagCategory, TagId, Task, TaskId, TaskKind, TaskPriority,
    TaskStatus, User, UserId,
};
use crate::errors::{TaskboardError, TaskboardResult};

/// Fields for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
}

impl Default for NewUser {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            role: "USER".to_string(),
            active: true,
        }
    }
}

/// Fields for updating a user in one call. Per-field validation
/// rejections keep the prior value without failing the whole update.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub role: String,
    pub active: bool,
}

/// Fields for updating a tag. An empty color keeps the current one.
#[derive(Debug, Clone)]
pub struct TagChanges {
    pub name: String,
    pub color: String,
    pub category: TagCategory,
}

/// Fields for creating a task. The kind discriminator is free-form;
/// anything unrecognized produces a generic task.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub kind: String,
    pub priority: Option<TaskPriority>,
}

/// Fields for attaching a comment to a task.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub task_id: TaskId,
    pub content: String,
    /// `None` is an anonymous comment, allowed only when the store config
    /// permits it.
    pub author: Option<UserId>,
}

/// In-memory repository owning the canonical task, tag and user
/// collections.
///
/// Read accessors return references directly into the internal
/// collections. Construct explicitly and seed explicitly; there is no
/// global instance.
#[derive(Debug, Default)]
pub struct TaskStore {
    config: TaskboardConfig,
    users: Vec<User>,
    tags: Vec<Tag>,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Create an empty store with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given configuration.
    pub fn with_config(config: TaskboardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &TaskboardConfig {
        &self.config
    }

    // === Users ===

    pub fn all_users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id() == id)
    }

    /// Create a user with the next free id and return it.
    pub fn create_user(&mut self, new: NewUser) -> &User {
        let id = self.next_user_id();
        let mut user = User::new(id, new.name, new.email, new.role);
        if !new.active {
            user.deactivate();
        }
        debug!(user = id, "created user");
        self.users.push(user);
        &self.users[self.users.len() - 1]
    }

    /// Apply changes to an existing user. Returns `None` (and mutates
    /// nothing) when the id is unknown.
    pub fn update_user(&mut self, id: UserId, changes: UserChanges) -> Option<&User> {
        let user = self.users.iter_mut().find(|u| u.id() == id)?;
        let _ = user.set_name(&changes.name);
        let _ = user.set_email(&changes.email);
        user.role = changes.role;
        if changes.active {
            user.activate();
        } else {
            user.deactivate();
        }
        Some(user)
    }

    /// Remove a user. Every task pointing at it as responsible loses that
    /// reference. Returns whether the user existed.
    pub fn delete_user(&mut self, id: UserId) -> bool {
        let Some(idx) = self.users.iter().position(|u| u.id() == id) else {
            return false;
        };
        self.users.remove(idx);

        for task in &mut self.tasks {
            if task.responsible() == Some(id) {
                task.set_responsible(None);
            }
        }

        debug!(user = id, "deleted user");
        true
    }

    // === Tags ===

    pub fn all_tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag(&self, id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id() == id)
    }

    /// Look up a tag by name, trimmed and case-insensitive.
    pub fn tag_by_name(&self, name: &str) -> Option<&Tag> {
        let target = name.trim().to_uppercase();
        self.tags
            .iter()
            .find(|t| t.name().trim().to_uppercase() == target)
    }

    /// Create a tag with the next free id. An empty color falls back to
    /// the configured default.
    pub fn create_tag(&mut self, name: &str, color: &str, category: TagCategory) -> &Tag {
        let id = self.next_tag_id();
        let color = if color.trim().is_empty() {
            self.config.default_tag_color.clone()
        } else {
            color.trim().to_string()
        };
        debug!(tag = id, name, "created tag");
        self.tags.push(Tag::new(id, name, color, category));
        &self.tags[self.tags.len() - 1]
    }

    /// Apply changes to an existing tag. Returns `None` (and mutates
    /// nothing) when the id is unknown.
    pub fn update_tag(&mut self, id: TagId, changes: TagChanges) -> Option<&Tag> {
        let tag = self.tags.iter_mut().find(|t| t.id() == id)?;
        let _ = tag.set_name(&changes.name);
        if !changes.color.trim().is_empty() {
            let _ = tag.set_color(&changes.color);
        }
        tag.set_category(changes.category);
        Some(tag)
    }

    /// Remove a tag from the catalog and from every task holding it.
    /// Returns whether the tag existed.
    pub fn delete_tag(&mut self, id: TagId) -> bool {
        let Some(idx) = self.tags.iter().position(|t| t.id() == id) else {
            return false;
        };
        self.tags.remove(idx);

        for task in &mut self.tasks {
            task.remove_tag(id);
        }

        debug!(tag = id, "deleted tag");
        true
    }

    // === Tasks ===

    pub fn all_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }

    /// All tasks not yet done.
    pub fn open_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.status() != TaskStatus::Done)
            .collect()
    }

    /// All bug tasks.
    pub fn bugs(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| matches!(t.kind(), TaskKind::Bug(_)))
            .collect()
    }

    /// All tasks at high or critical priority.
    pub fn high_priority_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| {
                matches!(t.priority(), TaskPriority::High | TaskPriority::Critical)
            })
            .collect()
    }

    /// Create a task of the requested kind with the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskboardError::EmptyTitle`] when the title is empty or
    /// whitespace-only.
    pub fn create_task(&mut self, new: NewTask) -> TaskboardResult<&Task> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(TaskboardError::EmptyTitle);
        }

        let id = self.next_task_id();
        let kind = TaskKind::from_discriminator(&new.kind);
        debug!(task = id, kind = kind.name(), "created task");

        let task = Task::new(id, title, kind)
            .with_description(new.description)
            .with_priority(new.priority.unwrap_or_default());
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Replace the stored task carrying the same id with `updated`,
    /// in place. Returns the stored task, or `None` (mutating nothing)
    /// when the id is unknown.
    pub fn update_task(&mut self, updated: Task) -> Option<&Task> {
        let idx = self.tasks.iter().position(|t| t.id() == updated.id())?;
        self.tasks[idx] = updated;
        Some(&self.tasks[idx])
    }

    /// Remove a task entirely. Returns whether it existed.
    pub fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(idx) = self.tasks.iter().position(|t| t.id() == id) else {
            return false;
        };
        self.tasks.remove(idx);
        debug!(task = id, "deleted task");
        true
    }

    /// Attach an existing catalog tag to a task. Returns whether the link
    /// was newly added (false when already present).
    ///
    /// # Errors
    ///
    /// Fails when either the task or the tag does not exist.
    pub fn add_tag_to_task(&mut self, task_id: TaskId, tag_id: TagId) -> TaskboardResult<bool> {
        if self.tag(tag_id).is_none() {
            return Err(TaskboardError::TagNotFound { id: tag_id });
        }
        let task = self
            .task_mut(task_id)
            .ok_or(TaskboardError::TaskNotFound { id: task_id })?;
        Ok(task.add_tag(tag_id))
    }

    /// Detach a tag from a task. Returns whether the link existed.
    ///
    /// # Errors
    ///
    /// Fails when the task does not exist.
    pub fn remove_tag_from_task(
        &mut self,
        task_id: TaskId,
        tag_id: TagId,
    ) -> TaskboardResult<bool> {
        let task = self
            .task_mut(task_id)
            .ok_or(TaskboardError::TaskNotFound { id: task_id })?;
        Ok(task.remove_tag(tag_id))
    }

    /// Make an existing user responsible for a task.
    ///
    /// # Errors
    ///
    /// Fails when either the task or the user does not exist.
    pub fn assign_responsible(
        &mut self,
        task_id: TaskId,
        user_id: UserId,
    ) -> TaskboardResult<()> {
        if self.user(user_id).is_none() {
            return Err(TaskboardError::UserNotFound { id: user_id });
        }
        let task = self
            .task_mut(task_id)
            .ok_or(TaskboardError::TaskNotFound { id: task_id })?;
        task.set_responsible(Some(user_id));
        Ok(())
    }

    /// Clear the responsible user on a task.
    ///
    /// # Errors
    ///
    /// Fails when the task does not exist.
    pub fn clear_responsible(&mut self, task_id: TaskId) -> TaskboardResult<()> {
        let task = self
            .task_mut(task_id)
            .ok_or(TaskboardError::TaskNotFound { id: task_id })?;
        task.set_responsible(None);
        Ok(())
    }

    // === Comments ===

    /// Attach a comment to a task, with a clock-derived id.
    ///
    /// # Errors
    ///
    /// Fails when the task or the (non-anonymous) author does not exist,
    /// when the content is empty, when an anonymous comment is attempted
    /// while disallowed, or when the task has reached the configured
    /// comment cap. Nothing is mutated on failure.
    pub fn add_comment(&mut self, new: NewComment) -> TaskboardResult<CommentId> {
        if self.task(new.task_id).is_none() {
            return Err(TaskboardError::TaskNotFound { id: new.task_id });
        }
        match new.author {
            Some(author) => {
                if self.user(author).is_none() {
                    return Err(TaskboardError::UserNotFound { id: author });
                }
            }
            None => {
                if !self.config.allow_anonymous_comments {
                    return Err(TaskboardError::AnonymousCommentsDisabled);
                }
            }
        }
        let content = new.content.trim();
        if content.is_empty() {
            return Err(TaskboardError::EmptyContent);
        }

        let limit = self.config.max_comments_per_task;
        let task = self
            .task_mut(new.task_id)
            .ok_or(TaskboardError::TaskNotFound { id: new.task_id })?;
        if task.comments().len() >= limit {
            return Err(TaskboardError::CommentLimitReached {
                id: new.task_id,
                limit,
            });
        }

        let id: CommentId = Utc::now().timestamp_millis();
        task.add_comment(Comment::new(id, new.author, content));
        debug!(task = new.task_id, comment = id, "added comment");
        Ok(id)
    }

    // === Id generation ===
    //
    // max(existing) + 1, or 1 when the collection is empty. Safe only
    // because the store is mutated from a single thread.

    fn next_user_id(&self) -> UserId {
        self.users.iter().map(User::id).max().map_or(1, |id| id + 1)
    }

    fn next_tag_id(&self) -> TagId {
        self.tags.iter().map(Tag::id).max().map_or(1, |id| id + 1)
    }

    fn next_task_id(&self) -> TaskId {
        self.tasks.iter().map(Task::id).max().map_or(1, |id| id + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_task(kind: &str) -> (TaskStore, TaskId) {
        let mut store = TaskStore::new();
        let id = store
            .create_task(NewTask {
                title: "Sample".to_string(),
                kind: kind.to_string(),
                ..NewTask::default()
            })
            .unwrap()
            .id();
        (store, id)
    }

    #[test]
    fn test_user_id_generation() {
        let mut store = TaskStore::new();
        let first = store
            .create_user(NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                ..NewUser::default()
            })
            .id();
        let second = store
            .create_user(NewUser {
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                ..NewUser::default()
            })
            .id();
        assert_eq!(first, 1);
        assert_eq!(second, 2);

        store.delete_user(first);
        // max + 1 over the remaining users, so ids may be reused only
        // when the maximum itself was removed.
        let third = store
            .create_user(NewUser {
                name: "Katherine".to_string(),
                email: "katherine@example.com".to_string(),
                ..NewUser::default()
            })
            .id();
        assert_eq!(third, 3);
    }

    #[test]
    fn test_update_user_missing_id_is_none() {
        let mut store = TaskStore::new();
        let result = store.update_user(
            99,
            UserChanges {
                name: "Nobody".to_string(),
                email: "nobody@example.com".to_string(),
                role: "DEV".to_string(),
                active: true,
            },
        );
        assert!(result.is_none());
        assert!(store.all_users().is_empty());
    }

    #[test]
    fn test_update_user_keeps_prior_value_on_bad_email() {
        let mut store = TaskStore::new();
        let id = store
            .create_user(NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                ..NewUser::default()
            })
            .id();

        let updated = store
            .update_user(
                id,
                UserChanges {
                    name: "Ada L.".to_string(),
                    email: "broken".to_string(),
                    role: "QA".to_string(),
                    active: false,
                },
            )
            .unwrap();
        assert_eq!(updated.name(), "Ada L.");
        assert_eq!(updated.email(), "ada@example.com");
        assert!(!updated.is_active());
    }

    #[test]
    fn test_delete_user_clears_responsible() {
        let (mut store, task_id) = store_with_task("bug");
        let user_id = store
            .create_user(NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                ..NewUser::default()
            })
            .id();
        store.assign_responsible(task_id, user_id).unwrap();
        assert_eq!(store.task(task_id).unwrap().responsible(), Some(user_id));

        assert!(store.delete_user(user_id));
        assert!(store.task(task_id).unwrap().responsible().is_none());
        // The task itself survives.
        assert!(store.task(task_id).is_some());

        assert!(!store.delete_user(user_id));
    }

    #[test]
    fn test_tag_id_generation_and_lookup() {
        let mut store = TaskStore::new();
        let a = store.create_tag("urgent", "#ff0000", TagCategory::Priority).id();
        let b = store.create_tag("backend", "", TagCategory::Generic).id();
        assert_eq!(a, 1);
        assert_eq!(b, 2);

        assert_eq!(store.tag_by_name("  URGENT ").map(Tag::id), Some(a));
        assert_eq!(store.tag(b).unwrap().color(), "#888888");
    }

    #[test]
    fn test_delete_tag_cascades_to_tasks() {
        let (mut store, task_id) = store_with_task("feature");
        let tag_id = store.create_tag("urgent", "#ff0000", TagCategory::Priority).id();
        store.add_tag_to_task(task_id, tag_id).unwrap();

        assert!(store.delete_tag(tag_id));
        assert!(store.task(task_id).unwrap().tags().is_empty());
        assert!(store.task(task_id).is_some());

        assert!(!store.delete_tag(tag_id));
    }

    #[test]
    fn test_update_tag_missing_id_is_none() {
        let mut store = TaskStore::new();
        assert!(store
            .update_tag(
                7,
                TagChanges {
                    name: "x".to_string(),
                    color: "#fff".to_string(),
                    category: TagCategory::Generic,
                },
            )
            .is_none());
    }

    #[test]
    fn test_update_tag_empty_color_keeps_current() {
        let mut store = TaskStore::new();
        let id = store.create_tag("urgent", "#ff0000", TagCategory::Priority).id();
        let tag = store
            .update_tag(
                id,
                TagChanges {
                    name: "blocker".to_string(),
                    color: "  ".to_string(),
                    category: TagCategory::Generic,
                },
            )
            .unwrap();
        assert_eq!(tag.name(), "blocker");
        assert_eq!(tag.color(), "#ff0000");
        assert_eq!(tag.category(), TagCategory::Generic);
    }

    #[test]
    fn test_create_task_kinds_and_ids() {
        let mut store = TaskStore::new();
        let bug = store
            .create_task(NewTask {
                title: "Crash on save".to_string(),
                kind: "bug".to_string(),
                ..NewTask::default()
            })
            .unwrap();
        assert_eq!(bug.id(), 1);
        assert_eq!(bug.kind().name(), "bug");

        let misc = store
            .create_task(NewTask {
                title: "Tidy backlog".to_string(),
                kind: "chore".to_string(),
                priority: Some(TaskPriority::Low),
                ..NewTask::default()
            })
            .unwrap();
        assert_eq!(misc.id(), 2);
        assert_eq!(misc.kind().name(), "generic");
        assert_eq!(misc.priority(), TaskPriority::Low);
    }

    #[test]
    fn test_create_task_requires_title() {
        let mut store = TaskStore::new();
        let result = store.create_task(NewTask {
            title: "   ".to_string(),
            ..NewTask::default()
        });
        assert_eq!(result.unwrap_err(), TaskboardError::EmptyTitle);
        assert!(store.all_tasks().is_empty());
    }

    #[test]
    fn test_update_task_overwrites_in_place() {
        let (mut store, task_id) = store_with_task("feature");

        let mut edited = store.task(task_id).unwrap().clone();
        edited.set_title("Renamed").unwrap();
        edited.set_complexity(5).unwrap();
        edited.start();

        let stored = store.update_task(edited).unwrap();
        assert_eq!(stored.title(), "Renamed");
        assert_eq!(stored.status(), TaskStatus::InProgress);
        assert_eq!(store.all_tasks().len(), 1);
    }

    #[test]
    fn test_update_task_missing_id_is_none() {
        let mut store = TaskStore::new();
        let orphan = Task::new(9, "Orphan", TaskKind::Generic);
        assert!(store.update_task(orphan).is_none());
        assert!(store.all_tasks().is_empty());
    }

    #[test]
    fn test_add_comment_happy_path() {
        let (mut store, task_id) = store_with_task("bug");
        let author = store
            .create_user(NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                ..NewUser::default()
            })
            .id();

        let comment_id = store
            .add_comment(NewComment {
                task_id,
                content: "  reproduced on main  ".to_string(),
                author: Some(author),
            })
            .unwrap();

        let task = store.task(task_id).unwrap();
        assert_eq!(task.comments().len(), 1);
        assert_eq!(task.comments()[0].id(), comment_id);
        assert_eq!(task.comments()[0].content(), "reproduced on main");
        assert_eq!(task.comments()[0].author(), Some(author));
    }

    #[test]
    fn test_add_comment_unknown_task_mutates_nothing() {
        let (mut store, task_id) = store_with_task("bug");
        let author = store
            .create_user(NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                ..NewUser::default()
            })
            .id();

        let err = store
            .add_comment(NewComment {
                task_id: 999,
                content: "lost".to_string(),
                author: Some(author),
            })
            .unwrap_err();
        assert_eq!(err, TaskboardError::TaskNotFound { id: 999 });
        assert!(store.task(task_id).unwrap().comments().is_empty());
    }

    #[test]
    fn test_add_comment_unknown_author_fails() {
        let (mut store, task_id) = store_with_task("bug");
        let err = store
            .add_comment(NewComment {
                task_id,
                content: "ghost".to_string(),
                author: Some(404),
            })
            .unwrap_err();
        assert_eq!(err, TaskboardError::UserNotFound { id: 404 });
    }

    #[test]
    fn test_anonymous_comments_follow_config() {
        let (mut store, task_id) = store_with_task("bug");
        let err = store
            .add_comment(NewComment {
                task_id,
                content: "anon".to_string(),
                author: None,
            })
            .unwrap_err();
        assert_eq!(err, TaskboardError::AnonymousCommentsDisabled);

        let config = TaskboardConfig {
            allow_anonymous_comments: true,
            ..TaskboardConfig::default()
        };
        let mut open_store = TaskStore::with_config(config);
        let task_id = open_store
            .create_task(NewTask {
                title: "Open".to_string(),
                ..NewTask::default()
            })
            .unwrap()
            .id();
        assert!(open_store
            .add_comment(NewComment {
                task_id,
                content: "anon".to_string(),
                author: None,
            })
            .is_ok());
    }

    #[test]
    fn test_comment_cap_enforced() {
        let config = TaskboardConfig {
            allow_anonymous_comments: true,
            max_comments_per_task: 2,
            ..TaskboardConfig::default()
        };
        let mut store = TaskStore::with_config(config);
        let task_id = store
            .create_task(NewTask {
                title: "Capped".to_string(),
                ..NewTask::default()
            })
            .unwrap()
            .id();

        for text in ["one", "two"] {
            store
                .add_comment(NewComment {
                    task_id,
                    content: text.to_string(),
                    author: None,
                })
                .unwrap();
        }
        let err = store
            .add_comment(NewComment {
                task_id,
                content: "three".to_string(),
                author: None,
            })
            .unwrap_err();
        assert_eq!(
            err,
            TaskboardError::CommentLimitReached { id: task_id, limit: 2 }
        );
        assert_eq!(store.task(task_id).unwrap().comments().len(), 2);
    }

    #[test]
    fn test_add_tag_to_task_requires_catalog_tag() {
        let (mut store, task_id) = store_with_task("bug");
        assert_eq!(
            store.add_tag_to_task(task_id, 5).unwrap_err(),
            TaskboardError::TagNotFound { id: 5 }
        );

        let tag_id = store.create_tag("urgent", "#ff0000", TagCategory::Priority).id();
        assert!(store.add_tag_to_task(task_id, tag_id).unwrap());
        assert!(!store.add_tag_to_task(task_id, tag_id).unwrap());
    }

    #[test]
    fn test_query_helpers() {
        let mut store = TaskStore::new();
        let bug_id = store
            .create_task(NewTask {
                title: "Bug".to_string(),
                kind: "bug".to_string(),
                priority: Some(TaskPriority::Critical),
                ..NewTask::default()
            })
            .unwrap()
            .id();
        store
            .create_task(NewTask {
                title: "Feature".to_string(),
                kind: "feature".to_string(),
                priority: Some(TaskPriority::Low),
                ..NewTask::default()
            })
            .unwrap();

        store.task_mut(bug_id).unwrap().complete();

        assert_eq!(store.open_tasks().len(), 1);
        assert_eq!(store.bugs().len(), 1);
        assert_eq!(store.high_priority_tasks().len(), 1);
    }
}
