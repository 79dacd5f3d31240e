//! Read-side aggregates for the dashboard, reports page and polling API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{QualityAverages, RecentCheckIn, RoomStatus, TaskListing, TaskStatus};

/// `part / whole * 100`, or zero when `whole` is zero.
///
/// # Examples
/// ```
/// use hotel_ops::domain::percentage;
///
/// assert_eq!(percentage(2, 5), 40.0);
/// assert_eq!(percentage(0, 0), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "row counts are far below f64's exact integer range"
)]
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Number of rooms in each status. Every status is present, zero if unused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RoomStatusCounts(BTreeMap<RoomStatus, u64>);

impl RoomStatusCounts {
    /// Build from `(status, count)` pairs; missing statuses count as zero.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (RoomStatus, u64)>) -> Self {
        let mut counts: BTreeMap<_, _> = RoomStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        for (status, count) in pairs {
            *counts.entry(status).or_default() += count;
        }
        Self(counts)
    }

    #[must_use]
    pub fn get(&self, status: RoomStatus) -> u64 {
        self.0.get(&status).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Share of rooms that are occupied, in percent.
    #[must_use]
    pub fn occupancy_rate(&self) -> f64 {
        percentage(self.get(RoomStatus::Occupied), self.total())
    }
}

/// Number of tasks in each status. Every status is present, zero if unused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TaskStatusCounts(BTreeMap<TaskStatus, u64>);

impl TaskStatusCounts {
    /// Build from `(status, count)` pairs; missing statuses count as zero.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (TaskStatus, u64)>) -> Self {
        let mut counts: BTreeMap<_, _> = TaskStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        for (status, count) in pairs {
            *counts.entry(status).or_default() += count;
        }
        Self(counts)
    }

    #[must_use]
    pub fn get(&self, status: TaskStatus) -> u64 {
        self.0.get(&status).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Share of tasks that are completed, in percent.
    #[must_use]
    pub fn completion_rate(&self) -> f64 {
        percentage(self.get(TaskStatus::Completed), self.total())
    }
}

/// Data behind the dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub room_stats: RoomStatusCounts,
    pub recent_tasks: Vec<TaskListing>,
    pub quality_averages: QualityAverages,
}

/// Payload of the dashboard polling endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub room_stats: RoomStatusCounts,
    pub task_stats: TaskStatusCounts,
    pub timestamp: DateTime<Utc>,
}

/// Data behind the reports page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub total_rooms: u64,
    pub occupied_rooms: u64,
    pub occupancy_rate: f64,
    pub today_revenue: f64,
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub completion_rate: f64,
    pub avg_quality: f64,
    pub recent_activity: Vec<RecentCheckIn>,
}
