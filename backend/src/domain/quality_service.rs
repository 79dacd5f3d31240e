//! Quality inspection service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    QualityCheckRepository, QualityCheckRepositoryError, QualityInspections,
};
use crate::domain::{Error, QualityCheck, QualityCheckDraft, QualityCheckListing};

pub(crate) fn map_quality_repository_error(error: QualityCheckRepositoryError) -> Error {
    match error {
        QualityCheckRepositoryError::Connection { message } => Error::service_unavailable(
            format!("quality check repository unavailable: {message}"),
        ),
        QualityCheckRepositoryError::Query { message } => {
            Error::internal(format!("quality check repository error: {message}"))
        }
        err @ QualityCheckRepositoryError::RoomNotFound { .. } => Error::not_found(err.to_string()),
    }
}

/// Inspection service implementing [`QualityInspections`].
#[derive(Clone)]
pub struct QualityService<Q> {
    checks: Arc<Q>,
    clock: Arc<dyn Clock>,
}

impl<Q> QualityService<Q> {
    pub fn new(checks: Arc<Q>, clock: Arc<dyn Clock>) -> Self {
        Self { checks, clock }
    }
}

#[async_trait]
impl<Q> QualityInspections for QualityService<Q>
where
    Q: QualityCheckRepository,
{
    async fn record_check(&self, draft: QualityCheckDraft) -> Result<QualityCheck, Error> {
        let check = self
            .checks
            .record(&draft, self.clock.utc())
            .await
            .map_err(map_quality_repository_error)?;
        info!(
            check_id = %check.id,
            room_id = %check.room_id,
            overall = check.scores.overall(),
            "quality check recorded"
        );
        Ok(check)
    }

    async fn recent_checks(&self, limit: i64) -> Result<Vec<QualityCheckListing>, Error> {
        self.checks
            .recent(limit)
            .await
            .map_err(map_quality_repository_error)
    }
}
