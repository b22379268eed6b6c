//! Task entity: lifecycle state machine, validated setters, estimation
//! entry point and snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::comment::{Comment, CommentId};
use super::kind::{
    BugDetails, BugSeverity, DocumentationDetails, FeatureDetails, TaskKind,
};
use super::tag::TagId;
use super::user::UserId;
use crate::errors::{TaskboardError, TaskboardResult};

/// Task identifier.
pub type TaskId = u64;

/// Task lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Todo => write!(f, "todo"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Blocked => write!(f, "blocked"),
            Self::Done => write!(f, "done"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" | "to-do" => Ok(Self::Todo),
            "in-progress" | "inprogress" | "in_progress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "done" | "completed" => Ok(Self::Done),
            _ => Err(TaskboardError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" | "crit" => Ok(Self::Critical),
            _ => Err(TaskboardError::InvalidPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// A unit of tracked work.
///
/// Status is readable but only mutated through the lifecycle methods.
/// Every successful mutation refreshes `updated_at`; rejected mutations
/// leave both the field and `updated_at` untouched. Tags and the
/// responsible user are held as ids into the store's catalogs, comments
/// are owned. Equality is by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,

    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    kind: TaskKind,

    #[serde(rename = "estimatedHours")]
    estimated_hours: f64,

    responsible: Option<UserId>,
    tags: Vec<TagId>,
    comments: Vec<Comment>,

    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    updated_at: DateTime<Utc>,

    #[serde(rename = "closedAt")]
    closed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task in the `Todo` state with default priority.
    pub fn new(id: TaskId, title: impl Into<String>, kind: TaskKind) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into().trim().to_string(),
            description: String::new(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            kind,
            estimated_hours: 0.0,
            responsible: None,
            tags: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
            closed_at: None,
        }
    }

    /// Set the description at construction time.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_string();
        self
    }

    /// Set the priority at construction time.
    #[must_use]
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the responsible user at construction time.
    #[must_use]
    pub fn with_responsible(mut self, user: UserId) -> Self {
        self.responsible = Some(user);
        self
    }

    // === Accessors ===

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn estimated_hours(&self) -> f64 {
        self.estimated_hours
    }

    pub fn responsible(&self) -> Option<UserId> {
        self.responsible
    }

    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    // === Validated setters ===

    /// Set the title. Rejects empty or whitespace-only input.
    pub fn set_title(&mut self, value: &str) -> TaskboardResult<()> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            warn!(task = self.id, "rejected empty task title");
            return Err(TaskboardError::EmptyTitle);
        }
        self.title = trimmed.to_string();
        self.touch();
        Ok(())
    }

    /// Set the description. Any string is accepted; input is trimmed.
    pub fn set_description(&mut self, value: &str) {
        self.description = value.trim().to_string();
        self.touch();
    }

    pub fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
        self.touch();
    }

    /// Replace the kind wholesale. Variant data for the previous kind is
    /// discarded.
    pub fn set_kind(&mut self, kind: TaskKind) {
        self.kind = kind;
        self.touch();
    }

    /// Set the stored estimate directly. Rejects negative or non-finite
    /// values.
    pub fn set_estimated_hours(&mut self, value: f64) -> TaskboardResult<()> {
        if !value.is_finite() || value < 0.0 {
            warn!(task = self.id, hours = value, "rejected invalid estimate");
            return Err(TaskboardError::NegativeHours { hours: value });
        }
        self.estimated_hours = value;
        self.touch();
        Ok(())
    }

    pub fn set_responsible(&mut self, user: Option<UserId>) {
        self.responsible = user;
        self.touch();
    }

    // === Variant field setters ===
    //
    // These apply to one kind only; using them on another kind is a
    // `KindMismatch` error and leaves the task untouched.

    pub fn bug(&self) -> Option<&BugDetails> {
        match &self.kind {
            TaskKind::Bug(details) => Some(details),
            _ => None,
        }
    }

    pub fn feature(&self) -> Option<&FeatureDetails> {
        match &self.kind {
            TaskKind::Feature(details) => Some(details),
            _ => None,
        }
    }

    pub fn documentation(&self) -> Option<&DocumentationDetails> {
        match &self.kind {
            TaskKind::Documentation(details) => Some(details),
            _ => None,
        }
    }

    pub fn set_severity(&mut self, severity: BugSeverity) -> TaskboardResult<()> {
        match &mut self.kind {
            TaskKind::Bug(details) => {
                details.severity = severity;
                self.touch();
                Ok(())
            }
            other => Err(kind_mismatch(self.id, "bug", other)),
        }
    }

    pub fn set_steps_to_reproduce(&mut self, steps: &str) -> TaskboardResult<()> {
        match &mut self.kind {
            TaskKind::Bug(details) => {
                details.steps_to_reproduce = steps.trim().to_string();
                self.touch();
                Ok(())
            }
            other => Err(kind_mismatch(self.id, "bug", other)),
        }
    }

    /// Set feature complexity (1-5).
    pub fn set_complexity(&mut self, value: u8) -> TaskboardResult<()> {
        match &mut self.kind {
            TaskKind::Feature(details) => {
                if !(1..=5).contains(&value) {
                    warn!(task = self.id, value, "rejected out-of-range complexity");
                    return Err(TaskboardError::ComplexityOutOfRange { value });
                }
                details.complexity = value;
                self.touch();
                Ok(())
            }
            other => Err(kind_mismatch(self.id, "feature", other)),
        }
    }

    /// Set feature business value (1-5).
    pub fn set_business_value(&mut self, value: u8) -> TaskboardResult<()> {
        match &mut self.kind {
            TaskKind::Feature(details) => {
                if !(1..=5).contains(&value) {
                    warn!(task = self.id, value, "rejected out-of-range business value");
                    return Err(TaskboardError::BusinessValueOutOfRange { value });
                }
                details.business_value = value;
                self.touch();
                Ok(())
            }
            other => Err(kind_mismatch(self.id, "feature", other)),
        }
    }

    /// Set the page count. Must be positive; fractional input rounds up.
    pub fn set_pages(&mut self, value: f64) -> TaskboardResult<()> {
        match &mut self.kind {
            TaskKind::Documentation(details) => {
                if !value.is_finite() || value <= 0.0 {
                    warn!(task = self.id, value, "rejected invalid page count");
                    return Err(TaskboardError::InvalidPageCount { value });
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                {
                    details.pages = value.ceil() as u32;
                }
                self.touch();
                Ok(())
            }
            other => Err(kind_mismatch(self.id, "documentation", other)),
        }
    }

    pub fn set_technical(&mut self, value: bool) -> TaskboardResult<()> {
        match &mut self.kind {
            TaskKind::Documentation(details) => {
                details.technical = value;
                self.touch();
                Ok(())
            }
            other => Err(kind_mismatch(self.id, "documentation", other)),
        }
    }

    // === Lifecycle ===

    /// Reset to `Todo` unconditionally.
    pub fn mark_todo(&mut self) {
        self.status = TaskStatus::Todo;
        self.closed_at = None;
        self.touch();
    }

    /// Move to `InProgress`. No-op (no touch) when already done.
    pub fn start(&mut self) {
        if self.status == TaskStatus::Done {
            return;
        }
        self.status = TaskStatus::InProgress;
        self.closed_at = None;
        self.touch();
    }

    /// Move to `Blocked`. No-op (no touch) when already done.
    pub fn block(&mut self) {
        if self.status == TaskStatus::Done {
            return;
        }
        self.status = TaskStatus::Blocked;
        self.closed_at = None;
        self.touch();
    }

    /// Move to `Done` unconditionally and record the close time.
    pub fn complete(&mut self) {
        self.status = TaskStatus::Done;
        self.closed_at = Some(Utc::now());
        self.touch();
    }

    /// Reopen a task: done goes back to `Todo`, blocked resumes as
    /// `InProgress`. Anything else is a no-op (no touch).
    pub fn reopen(&mut self) {
        match self.status {
            TaskStatus::Done => {
                self.status = TaskStatus::Todo;
                self.closed_at = None;
            }
            TaskStatus::Blocked => {
                self.status = TaskStatus::InProgress;
                self.closed_at = None;
            }
            TaskStatus::Todo | TaskStatus::InProgress => return,
        }
        self.touch();
    }

    // === Tags and comments ===

    /// Attach a tag id. Duplicates are ignored (no touch). Returns whether
    /// the tag was added.
    pub fn add_tag(&mut self, tag: TagId) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        self.touch();
        true
    }

    /// Detach a tag id. Returns whether the tag was present.
    pub fn remove_tag(&mut self, tag: TagId) -> bool {
        let Some(idx) = self.tags.iter().position(|t| *t == tag) else {
            return false;
        };
        self.tags.remove(idx);
        self.touch();
        true
    }

    /// Append a comment. The collection is append-only.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
        self.touch();
    }

    // === Estimation ===

    /// Recompute the effort estimate from the current kind fields and
    /// priority, store it, and return it.
    pub fn estimate(&mut self) -> f64 {
        let hours = self.kind.estimate(self.priority);
        self.estimated_hours = hours;
        self.touch();
        hours
    }

    // === Snapshot ===

    /// Serializable view of this task. Variant fields are flattened in
    /// alongside the common fields; comments are referenced by id.
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            priority: self.priority,
            kind: self.kind.name(),
            estimated_hours: self.estimated_hours,
            responsible_id: self.responsible,
            tag_ids: self.tags.clone(),
            comment_ids: self.comments.iter().map(Comment::id).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            closed_at: self.closed_at,
            extra: KindSnapshotFields::from_kind(&self.kind),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

fn kind_mismatch(id: TaskId, expected: &'static str, actual: &TaskKind) -> TaskboardError {
    warn!(task = id, expected, actual = actual.name(), "kind mismatch");
    TaskboardError::KindMismatch {
        id,
        expected,
        actual: actual.name(),
    }
}

/// Serializable view of a task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskSnapshot {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub kind: &'static str,

    #[serde(rename = "estimatedHours")]
    pub estimated_hours: f64,

    #[serde(rename = "responsibleId")]
    pub responsible_id: Option<UserId>,

    #[serde(rename = "tagIds")]
    pub tag_ids: Vec<TagId>,

    #[serde(rename = "commentIds")]
    pub comment_ids: Vec<CommentId>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,

    #[serde(rename = "closedAt")]
    pub closed_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: KindSnapshotFields,
}

/// Variant fields contributed to a task snapshot, flattened into the
/// top-level object.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum KindSnapshotFields {
    Bug(BugDetails),
    Feature(FeatureDetails),
    Documentation(DocumentationDetails),
    Generic {},
}

impl KindSnapshotFields {
    fn from_kind(kind: &TaskKind) -> Self {
        match kind {
            TaskKind::Generic => Self::Generic {},
            TaskKind::Bug(details) => Self::Bug(details.clone()),
            TaskKind::Feature(details) => Self::Feature(details.clone()),
            TaskKind::Documentation(details) => Self::Documentation(details.clone()),
        }
    }
}
