//! Housekeeping and maintenance tasks.
//!
//! Tasks move `pending -> in_progress -> completed`. A task may also be
//! completed straight from `pending`. Completed tasks are final.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::RoomId;

/// Store-generated task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i32);

impl TaskId {
    /// Wrap a raw store identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw store identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of work a task represents.
///
/// Only `cleaning` carries behaviour: completing it frees the room. Any other
/// text is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    Cleaning,
    Maintenance,
    Other(String),
}

impl TaskType {
    /// Storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cleaning => "cleaning",
            Self::Maintenance => "maintenance",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Whether completing this task releases its room.
    #[must_use]
    pub fn releases_room(&self) -> bool {
        matches!(self, Self::Cleaning)
    }
}

impl From<String> for TaskType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "cleaning" => Self::Cleaning,
            "maintenance" => Self::Maintenance,
            _ => Self::Other(raw),
        }
    }
}

impl From<TaskType> for String {
    fn from(value: TaskType) -> Self {
        match value {
            TaskType::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress of a task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Storage and URL representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Whether a task in this status may be started.
    #[must_use]
    pub fn can_start(self) -> bool {
        self == Self::Pending
    }

    /// Whether a task in this status may be completed.
    #[must_use]
    pub fn can_complete(self) -> bool {
        self != Self::Completed
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a [`TaskStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseTaskStatusError(s.to_owned()))
    }
}

/// Validation failures for task input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    #[error("task type must not be empty")]
    EmptyType,
    #[error("task description must not be empty")]
    EmptyDescription,
}

/// Validated attributes of a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    room_id: RoomId,
    task_type: TaskType,
    description: String,
    assigned_to: Option<String>,
}

impl TaskDraft {
    /// Validate a new task.
    ///
    /// # Errors
    /// Rejects a blank type or description.
    pub fn new(
        room_id: RoomId,
        task_type: impl AsRef<str>,
        description: impl AsRef<str>,
        assigned_to: Option<String>,
    ) -> Result<Self, TaskValidationError> {
        let task_type = task_type.as_ref().trim();
        if task_type.is_empty() {
            return Err(TaskValidationError::EmptyType);
        }
        let description = description.as_ref().trim();
        if description.is_empty() {
            return Err(TaskValidationError::EmptyDescription);
        }
        Ok(Self {
            room_id,
            task_type: TaskType::from(task_type.to_owned()),
            description: description.to_owned(),
            assigned_to: assigned_to
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty()),
        })
    }

    /// The cleaning task appended when a guest checks out.
    ///
    /// # Examples
    /// ```
    /// use hotel_ops::domain::{RoomId, TaskDraft, TaskType};
    ///
    /// let draft = TaskDraft::checkout_cleaning(RoomId::new(4));
    /// assert_eq!(draft.task_type(), &TaskType::Cleaning);
    /// assert_eq!(draft.description(), "Cleaning after guest checkout");
    /// ```
    #[must_use]
    pub fn checkout_cleaning(room_id: RoomId) -> Self {
        Self {
            room_id,
            task_type: TaskType::Cleaning,
            description: "Cleaning after guest checkout".to_owned(),
            assigned_to: None,
        }
    }

    #[must_use]
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    #[must_use]
    pub fn task_type(&self) -> &TaskType {
        &self.task_type
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn assigned_to(&self) -> Option<&str> {
        self.assigned_to.as_deref()
    }
}

/// A task as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub room_id: RoomId,
    pub task_type: TaskType,
    pub description: String,
    pub status: TaskStatus,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Task joined with its room number. The room may have been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListing {
    #[serde(flatten)]
    pub task: Task,
    pub room_number: Option<String>,
}

/// Result of completing a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskCompletion {
    pub task_id: TaskId,
    pub room_id: RoomId,
    /// True when the room was set back to `available`.
    pub room_released: bool,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("cleaning", TaskType::Cleaning)]
    #[case("maintenance", TaskType::Maintenance)]
    #[case("restock minibar", TaskType::Other("restock minibar".to_owned()))]
    fn task_type_keeps_free_text(#[case] raw: &str, #[case] expected: TaskType) {
        let parsed = TaskType::from(raw.to_owned());
        assert_eq!(parsed, expected);
        assert_eq!(String::from(parsed), raw);
    }

    #[test]
    fn only_cleaning_releases_room() {
        assert!(TaskType::Cleaning.releases_room());
        assert!(!TaskType::Maintenance.releases_room());
        assert!(!TaskType::Other("inspection".to_owned()).releases_room());
    }

    #[rstest]
    #[case(TaskStatus::Pending, true, true)]
    #[case(TaskStatus::InProgress, false, true)]
    #[case(TaskStatus::Completed, false, false)]
    fn transitions(#[case] status: TaskStatus, #[case] start: bool, #[case] complete: bool) {
        assert_eq!(status.can_start(), start);
        assert_eq!(status.can_complete(), complete);
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert_eq!(
            "done".parse::<TaskStatus>(),
            Err(ParseTaskStatusError("done".to_owned()))
        );
    }

    #[rstest]
    #[case(" ", "fix tap", TaskValidationError::EmptyType)]
    #[case("maintenance", "", TaskValidationError::EmptyDescription)]
    fn draft_rejects_blank_fields(
        #[case] task_type: &str,
        #[case] description: &str,
        #[case] expected: TaskValidationError,
    ) {
        assert_eq!(
            TaskDraft::new(RoomId::new(1), task_type, description, None),
            Err(expected)
        );
    }

    #[test]
    fn draft_drops_blank_assignee() {
        let draft = TaskDraft::new(RoomId::new(1), "maintenance", "fix tap", Some(" ".to_owned()))
            .expect("valid draft");
        assert_eq!(draft.assigned_to(), None);
        assert_eq!(draft.task_type(), &TaskType::Maintenance);
    }

    #[test]
    fn serialises_type_as_plain_text() {
        let value = serde_json::to_value(TaskType::Other("linen".to_owned())).expect("serialise");
        assert_eq!(value, serde_json::json!("linen"));
    }
}
