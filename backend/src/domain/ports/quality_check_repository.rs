//! Port for the append-only inspection log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{QualityCheck, QualityCheckDraft, QualityCheckListing, QualityScores, RoomId};

/// Errors raised by quality check repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualityCheckRepositoryError {
    /// Repository connection could not be established.
    #[error("quality check repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("quality check repository query failed: {message}")]
    Query { message: String },
    #[error("room {room_id} not found")]
    RoomNotFound { room_id: RoomId },
}

impl QualityCheckRepositoryError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QualityCheckRepository: Send + Sync {
    /// Append an inspection of an existing room taken at `at`.
    async fn record(
        &self,
        draft: &QualityCheckDraft,
        at: DateTime<Utc>,
    ) -> Result<QualityCheck, QualityCheckRepositoryError>;

    /// Most recent inspections first.
    async fn recent(&self, limit: i64)
    -> Result<Vec<QualityCheckListing>, QualityCheckRepositoryError>;

    /// Scores of every inspection taken at or after `since`.
    async fn scores_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<QualityScores>, QualityCheckRepositoryError>;
}
