//! Driving port for quality inspections.

use async_trait::async_trait;

use crate::domain::{Error, QualityCheck, QualityCheckDraft, QualityCheckListing};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QualityInspections: Send + Sync {
    /// Record an inspection of an existing room, stamped now.
    async fn record_check(&self, draft: QualityCheckDraft) -> Result<QualityCheck, Error>;

    /// Most recent inspections first.
    async fn recent_checks(&self, limit: i64) -> Result<Vec<QualityCheckListing>, Error>;
}
