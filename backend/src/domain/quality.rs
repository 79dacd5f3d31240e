//! Quality inspections.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::RoomId;

/// Store-generated inspection identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualityCheckId(i32);

impl QualityCheckId {
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for QualityCheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validation failures for inspection input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualityValidationError {
    #[error("{category} score must be between {min} and {max}, got {value}", min = Score::MIN, max = Score::MAX)]
    ScoreOutOfRange { category: &'static str, value: i32 },
    #[error("inspector name must not be empty")]
    EmptyInspector,
}

/// Inspection score on a `0..=10` scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(i32);

impl Score {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 10;

    /// Validate a raw score for the named category.
    ///
    /// # Examples
    /// ```
    /// use hotel_ops::domain::Score;
    ///
    /// assert_eq!(Score::new("cleanliness", 9).map(Score::get), Ok(9));
    /// assert!(Score::new("cleanliness", 11).is_err());
    /// ```
    pub fn new(category: &'static str, value: i32) -> Result<Self, QualityValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(QualityValidationError::ScoreOutOfRange { category, value })
        }
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Cleanliness, amenities and maintenance scores of one inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualityScores {
    pub cleanliness: Score,
    pub amenities: Score,
    pub maintenance: Score,
}

impl QualityScores {
    /// Mean of the three category scores.
    #[must_use]
    pub fn overall(&self) -> f64 {
        f64::from(self.cleanliness.get() + self.amenities.get() + self.maintenance.get()) / 3.0
    }
}

/// Validated inspection about to be recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityCheckDraft {
    room_id: RoomId,
    scores: QualityScores,
    notes: String,
    checked_by: String,
}

impl QualityCheckDraft {
    /// Validate an inspection.
    ///
    /// # Errors
    /// Rejects scores outside `0..=10` and a blank inspector name.
    pub fn new(
        room_id: RoomId,
        (cleanliness, amenities, maintenance): (i32, i32, i32),
        notes: impl Into<String>,
        checked_by: impl AsRef<str>,
    ) -> Result<Self, QualityValidationError> {
        let scores = QualityScores {
            cleanliness: Score::new("cleanliness", cleanliness)?,
            amenities: Score::new("amenities", amenities)?,
            maintenance: Score::new("maintenance", maintenance)?,
        };
        let checked_by = checked_by.as_ref().trim();
        if checked_by.is_empty() {
            return Err(QualityValidationError::EmptyInspector);
        }
        Ok(Self {
            room_id,
            scores,
            notes: notes.into().trim().to_owned(),
            checked_by: checked_by.to_owned(),
        })
    }

    #[must_use]
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    #[must_use]
    pub fn scores(&self) -> QualityScores {
        self.scores
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn checked_by(&self) -> &str {
        &self.checked_by
    }
}

/// An inspection as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityCheck {
    pub id: QualityCheckId,
    pub room_id: RoomId,
    #[serde(flatten)]
    pub scores: QualityScores,
    pub notes: String,
    pub checked_by: String,
    pub check_date: DateTime<Utc>,
}

/// Inspection joined with its room number. The room may have been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityCheckListing {
    #[serde(flatten)]
    pub check: QualityCheck,
    pub room_number: Option<String>,
}

/// Per-category and overall score means over a window of inspections.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct QualityAverages {
    pub cleanliness: f64,
    pub amenities: f64,
    pub maintenance: f64,
    pub overall: f64,
    pub sample_size: usize,
}

impl QualityAverages {
    /// Averages over `scores`; all zero when there are none.
    ///
    /// # Examples
    /// ```
    /// use hotel_ops::domain::{QualityAverages, QualityScores, Score};
    ///
    /// let s = |v| Score::new("any", v).expect("in range");
    /// let averages = QualityAverages::from_scores(&[
    ///     QualityScores { cleanliness: s(9), amenities: s(6), maintenance: s(6) },
    ///     QualityScores { cleanliness: s(7), amenities: s(8), maintenance: s(6) },
    /// ]);
    /// assert_eq!(averages.cleanliness, 8.0);
    /// assert_eq!(averages.overall, 7.0);
    /// ```
    #[must_use]
    pub fn from_scores(scores: &[QualityScores]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "inspection counts are far below f64's exact integer range"
        )]
        let count = scores.len() as f64;
        let mean = |pick: fn(&QualityScores) -> f64| scores.iter().map(pick).sum::<f64>() / count;
        Self {
            cleanliness: mean(|s| f64::from(s.cleanliness.get())),
            amenities: mean(|s| f64::from(s.amenities.get())),
            maintenance: mean(|s| f64::from(s.maintenance.get())),
            overall: mean(QualityScores::overall),
            sample_size: scores.len(),
        }
    }
}
