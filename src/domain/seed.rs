//! Demo catalog: default tags, example users and a starter board.
//!
//! Seeding is an explicit call on an explicitly constructed store. It is
//! idempotent through duplicate checks (tags by name, users by name or
//! email, tasks only onto an empty board), not through a guard flag.

use tracing::debug;

use super::store::{NewTask, NewUser, TaskStore};
use crate::entities::{TagCategory, TagId, TaskId, TaskPriority, UserId};
use crate::errors::{TaskboardError, TaskboardResult};

/// Seed the full demo catalog: tags, users and nine example tasks.
///
/// # Errors
///
/// Propagates store errors; on a fresh or previously seeded store this
/// does not fail.
pub fn seed(store: &mut TaskStore) -> TaskboardResult<()> {
    seed_default_tags(store);
    seed_default_users(store);
    seed_demo_tasks(store)
}

/// Install the type and priority tag catalog.
pub fn seed_default_tags(store: &mut TaskStore) {
    let defaults = [
        ("BUG", "#e74c3c", TagCategory::Type),
        ("FEATURE", "#3498db", TagCategory::Type),
        ("DOCUMENTATION", "#2ecc71", TagCategory::Type),
        ("LOW", "#3498db", TagCategory::Priority),
        ("MEDIUM", "#ffff00", TagCategory::Priority),
        ("HIGH", "#e74c3c", TagCategory::Priority),
        ("CRITICAL", "#ff0000", TagCategory::Priority),
    ];
    for (name, color, category) in defaults {
        if store.tag_by_name(name).is_none() {
            store.create_tag(name, color, category);
        }
    }
}

/// Install the example users, skipping any whose name or email is
/// already taken.
pub fn seed_default_users(store: &mut TaskStore) {
    let defaults = [
        ("Dana Rivers", "dana@example.com", "DEV"),
        ("Priya Shah", "priya.qa@example.com", "QA"),
        ("Marcus Webb", "marcus.docs@example.com", "DOC"),
        ("Alice Developer", "alice@example.com", "DEV"),
        ("Bob Tester", "bob@example.com", "QA"),
        ("Carol Writer", "carol@example.com", "DOC"),
    ];
    for (name, email, role) in defaults {
        ensure_user(store, name, email, role);
    }
}

fn ensure_user(store: &mut TaskStore, name: &str, email: &str, role: &str) -> UserId {
    let existing = store.all_users().iter().find(|u| {
        u.name().trim().eq_ignore_ascii_case(name.trim())
            || u.email().trim().eq_ignore_ascii_case(email.trim())
    });
    if let Some(user) = existing {
        return user.id();
    }
    store
        .create_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            active: true,
        })
        .id()
}

fn first_user_with_role(store: &TaskStore, role: &str) -> Option<UserId> {
    store
        .all_users()
        .iter()
        .find(|u| u.role == role)
        .map(|u| u.id())
}

fn tag_id(store: &TaskStore, name: &str) -> Option<TagId> {
    store.tag_by_name(name).map(|t| t.id())
}

fn demo_task(
    store: &mut TaskStore,
    title: &str,
    description: &str,
    kind: &str,
    priority: TaskPriority,
) -> TaskboardResult<TaskId> {
    let task = store.create_task(NewTask {
        title: title.to_string(),
        description: description.to_string(),
        kind: kind.to_string(),
        priority: Some(priority),
    })?;
    Ok(task.id())
}

fn link(store: &mut TaskStore, task: TaskId, tag_name: &str) -> TaskboardResult<()> {
    if let Some(tag) = tag_id(store, tag_name) {
        store.add_tag_to_task(task, tag)?;
    }
    Ok(())
}

fn assign(store: &mut TaskStore, task: TaskId, user: Option<UserId>) -> TaskboardResult<()> {
    if let Some(user) = user {
        store.assign_responsible(task, user)?;
    }
    Ok(())
}

fn with_task<F>(store: &mut TaskStore, id: TaskId, f: F) -> TaskboardResult<()>
where
    F: FnOnce(&mut crate::entities::Task) -> TaskboardResult<()>,
{
    let task = store
        .task_mut(id)
        .ok_or(TaskboardError::TaskNotFound { id })?;
    f(task)
}

/// Install the nine-task starter board. No-op on a non-empty board.
#[allow(clippy::too_many_lines)]
pub fn seed_demo_tasks(store: &mut TaskStore) -> TaskboardResult<()> {
    if !store.all_tasks().is_empty() {
        return Ok(());
    }

    let dev = first_user_with_role(store, "DEV");
    let qa = first_user_with_role(store, "QA");
    let doc = first_user_with_role(store, "DOC");

    use crate::entities::BugSeverity;

    // 1) Critical login bug, not started
    let t = demo_task(
        store,
        "Fix login failure",
        "Users with valid credentials cannot sign in.",
        "bug",
        TaskPriority::Critical,
    )?;
    link(store, t, "BUG")?;
    link(store, t, "CRITICAL")?;
    assign(store, t, qa)?;
    with_task(store, t, |task| {
        task.set_severity(BugSeverity::Critical)?;
        task.set_estimated_hours(7.0)
    })?;

    // 2) Dashboard feature, not started
    let t = demo_task(
        store,
        "Build the task dashboard",
        "Dashboard with cards and advanced filters for browsing tasks.",
        "feature",
        TaskPriority::Medium,
    )?;
    link(store, t, "FEATURE")?;
    link(store, t, "MEDIUM")?;
    assign(store, t, dev)?;
    with_task(store, t, |task| {
        task.set_business_value(4)?;
        task.set_estimated_hours(12.0)
    })?;

    // 3) Creation-flow docs, not started
    let t = demo_task(
        store,
        "Document the task creation flow",
        "Step-by-step walkthrough of creating a task.",
        "documentation",
        TaskPriority::Low,
    )?;
    link(store, t, "DOCUMENTATION")?;
    link(store, t, "LOW")?;
    assign(store, t, doc)?;
    with_task(store, t, |task| {
        task.set_pages(3.0)?;
        task.set_estimated_hours(10.0)
    })?;

    // 4) Critical save bug, in progress
    let t = demo_task(
        store,
        "Server error when saving a user",
        "Saving a new user fails with an internal error.",
        "bug",
        TaskPriority::Critical,
    )?;
    link(store, t, "BUG")?;
    link(store, t, "CRITICAL")?;
    assign(store, t, qa)?;
    with_task(store, t, |task| {
        task.set_severity(BugSeverity::Critical)?;
        task.start();
        task.set_estimated_hours(8.0)
    })?;

    // 5) Mobile layout bug, not started
    let t = demo_task(
        store,
        "Broken layout on the mobile dashboard",
        "Dashboard columns overlap in the mobile breakpoint.",
        "bug",
        TaskPriority::High,
    )?;
    link(store, t, "BUG")?;
    link(store, t, "HIGH")?;
    assign(store, t, qa)?;
    with_task(store, t, |task| {
        task.set_severity(BugSeverity::High)?;
        task.set_estimated_hours(9.0)
    })?;

    // 6) Filtering feature, not started
    let t = demo_task(
        store,
        "Advanced task filtering",
        "Filter the task list by status, kind and responsible user.",
        "feature",
        TaskPriority::Medium,
    )?;
    link(store, t, "FEATURE")?;
    link(store, t, "MEDIUM")?;
    assign(store, t, dev)?;
    with_task(store, t, |task| {
        task.set_business_value(5)?;
        task.set_estimated_hours(10.0)
    })?;

    // 7) Chat integration, already done
    let t = demo_task(
        store,
        "Chat tool integration",
        "Post task updates into the team chat tool.",
        "feature",
        TaskPriority::High,
    )?;
    link(store, t, "FEATURE")?;
    link(store, t, "HIGH")?;
    assign(store, t, dev)?;
    with_task(store, t, |task| {
        task.set_complexity(4)?;
        task.set_business_value(5)?;
        task.complete();
        task.set_estimated_hours(11.0)
    })?;

    // 8) User manual update, not started
    let t = demo_task(
        store,
        "Update the user manual",
        "Cover the recently shipped functionality.",
        "documentation",
        TaskPriority::Low,
    )?;
    link(store, t, "DOCUMENTATION")?;
    link(store, t, "LOW")?;
    assign(store, t, doc)?;
    with_task(store, t, |task| {
        task.set_pages(5.0)?;
        task.set_technical(false)?;
        task.set_estimated_hours(10.0)
    })?;

    // 9) API reference, currently blocked
    let t = demo_task(
        store,
        "Write the API reference",
        "Endpoints, parameters and worked examples.",
        "documentation",
        TaskPriority::High,
    )?;
    link(store, t, "DOCUMENTATION")?;
    link(store, t, "HIGH")?;
    assign(store, t, doc)?;
    with_task(store, t, |task| {
        task.set_pages(12.0)?;
        task.block();
        task.set_estimated_hours(11.0)
    })?;

    debug!(tasks = store.all_tasks().len(), "seeded demo board");
    Ok(())
}
