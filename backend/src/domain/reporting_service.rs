//! Dashboard and report aggregation service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use mockable::Clock;
use tracing::info;

use crate::domain::front_desk_service::map_guest_repository_error;
use crate::domain::housekeeping_service::map_task_repository_error;
use crate::domain::ports::{
    GuestRepository, HotelReporting, QualityCheckRepository, RoomRepository, TaskRepository,
};
use crate::domain::quality_service::map_quality_repository_error;
use crate::domain::room_service::map_room_repository_error;
use crate::domain::{
    DashboardStats, DashboardView, Error, QualityAverages, ReportView, RoomStatus, TaskStatus,
};

/// Inspections younger than this feed the quality averages.
pub const QUALITY_WINDOW_DAYS: u64 = 30;
/// Check-ins younger than this appear in recent activity.
pub const RECENT_ACTIVITY_DAYS: u64 = 7;
pub const RECENT_ACTIVITY_LIMIT: i64 = 10;
pub const DASHBOARD_TASK_LIMIT: i64 = 5;

fn days_before(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// Midnight UTC `days` before `now`'s date.
fn window_start(now: DateTime<Utc>, days: u64) -> DateTime<Utc> {
    days_before(now.date_naive(), days)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Read-side service implementing [`HotelReporting`].
#[derive(Clone)]
pub struct ReportingService<R, G, T, Q> {
    rooms: Arc<R>,
    guests: Arc<G>,
    tasks: Arc<T>,
    checks: Arc<Q>,
    clock: Arc<dyn Clock>,
}

impl<R, G, T, Q> ReportingService<R, G, T, Q> {
    pub fn new(
        rooms: Arc<R>,
        guests: Arc<G>,
        tasks: Arc<T>,
        checks: Arc<Q>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            rooms,
            guests,
            tasks,
            checks,
            clock,
        }
    }
}

impl<R, G, T, Q> ReportingService<R, G, T, Q>
where
    Q: QualityCheckRepository,
{
    async fn quality_averages(&self, now: DateTime<Utc>) -> Result<QualityAverages, Error> {
        let scores = self
            .checks
            .scores_since(window_start(now, QUALITY_WINDOW_DAYS))
            .await
            .map_err(map_quality_repository_error)?;
        Ok(QualityAverages::from_scores(&scores))
    }
}

#[async_trait]
impl<R, G, T, Q> HotelReporting for ReportingService<R, G, T, Q>
where
    R: RoomRepository,
    G: GuestRepository,
    T: TaskRepository,
    Q: QualityCheckRepository,
{
    async fn dashboard(&self) -> Result<DashboardView, Error> {
        let changes = self
            .rooms
            .reconcile_statuses()
            .await
            .map_err(map_room_repository_error)?;
        if !changes.is_empty() {
            info!(changed = changes.len(), "room statuses reconciled for dashboard");
        }
        let room_stats = self
            .rooms
            .count_by_status()
            .await
            .map_err(map_room_repository_error)?;
        let recent_tasks = self
            .tasks
            .list_tasks(Some(DASHBOARD_TASK_LIMIT))
            .await
            .map_err(map_task_repository_error)?;
        let quality_averages = self.quality_averages(self.clock.utc()).await?;
        Ok(DashboardView {
            room_stats,
            recent_tasks,
            quality_averages,
        })
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, Error> {
        let room_stats = self
            .rooms
            .count_by_status()
            .await
            .map_err(map_room_repository_error)?;
        let task_stats = self
            .tasks
            .count_by_status()
            .await
            .map_err(map_task_repository_error)?;
        Ok(DashboardStats {
            room_stats,
            task_stats,
            timestamp: self.clock.utc(),
        })
    }

    async fn report(&self) -> Result<ReportView, Error> {
        let now = self.clock.utc();
        let today = now.date_naive();
        let room_counts = self
            .rooms
            .count_by_status()
            .await
            .map_err(map_room_repository_error)?;
        let task_counts = self
            .tasks
            .count_by_status()
            .await
            .map_err(map_task_repository_error)?;
        let today_revenue = self
            .guests
            .revenue_for_check_in_date(today)
            .await
            .map_err(map_guest_repository_error)?;
        let recent_activity = self
            .guests
            .recent_check_ins(
                days_before(today, RECENT_ACTIVITY_DAYS),
                RECENT_ACTIVITY_LIMIT,
            )
            .await
            .map_err(map_guest_repository_error)?;
        let avg_quality = self.quality_averages(now).await?.overall;

        Ok(ReportView {
            total_rooms: room_counts.total(),
            occupied_rooms: room_counts.get(RoomStatus::Occupied),
            occupancy_rate: room_counts.occupancy_rate(),
            today_revenue,
            total_tasks: task_counts.total(),
            completed_tasks: task_counts.get(TaskStatus::Completed),
            completion_rate: task_counts.completion_rate(),
            avg_quality,
            recent_activity,
        })
    }
}
