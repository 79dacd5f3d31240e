//! Driving port for dashboard and report aggregates.

use async_trait::async_trait;

use crate::domain::{DashboardStats, DashboardView, Error, ReportView};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HotelReporting: Send + Sync {
    /// Reconcile room statuses, then aggregate the dashboard.
    async fn dashboard(&self) -> Result<DashboardView, Error>;

    /// Room and task status counts for polling clients.
    async fn dashboard_stats(&self) -> Result<DashboardStats, Error>;

    async fn report(&self) -> Result<ReportView, Error>;
}
