//! Rooms and their operational status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Store-generated room identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i32);

impl RoomId {
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

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operational status of a room.
///
/// `Available` and `Occupied` are derived from guest activity by the status
/// reconciler. `Cleaning` and `Maintenance` are set explicitly and are never
/// changed by reconciliation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
    Maintenance,
}

impl RoomStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::Occupied,
        Self::Cleaning,
        Self::Maintenance,
    ];

    /// Statuses the reconciler must leave untouched.
    pub const STICKY: [Self; 2] = [Self::Cleaning, Self::Maintenance];

    /// Whether this status is pinned against reconciliation.
    #[must_use]
    pub fn is_sticky(self) -> bool {
        Self::STICKY.contains(&self)
    }

    /// Stable storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Cleaning => "cleaning",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a [`RoomStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown room status: {0}")]
pub struct ParseRoomStatusError(pub String);

impl FromStr for RoomStatus {
    type Err = ParseRoomStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseRoomStatusError(s.to_owned()))
    }
}

/// Validation failures for room input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoomValidationError {
    #[error("room number must not be empty")]
    EmptyNumber,
    #[error("room type must not be empty")]
    EmptyType,
    #[error("price must be a non-negative number, got {0}")]
    InvalidPrice(f64),
}

/// Unique, human-facing room number such as `"101"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomNumber(String);

impl RoomNumber {
    /// Validate and wrap a room number. Surrounding whitespace is trimmed.
    ///
    /// # Examples
    /// ```
    /// use hotel_ops::domain::RoomNumber;
    ///
    /// let number = RoomNumber::new(" 101 ").expect("valid number");
    /// assert_eq!(number.as_str(), "101");
    /// assert!(RoomNumber::new("   ").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RoomValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RoomValidationError::EmptyNumber);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the number as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated attributes for creating or editing a room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDraft {
    number: RoomNumber,
    room_type: String,
    price: f64,
}

impl RoomDraft {
    /// Validate room attributes.
    ///
    /// # Errors
    /// Rejects blank numbers or types and negative or non-finite prices.
    pub fn new(
        number: impl AsRef<str>,
        room_type: impl AsRef<str>,
        price: f64,
    ) -> Result<Self, RoomValidationError> {
        let number = RoomNumber::new(number)?;
        let room_type = room_type.as_ref().trim();
        if room_type.is_empty() {
            return Err(RoomValidationError::EmptyType);
        }
        if !price.is_finite() || price < 0.0 {
            return Err(RoomValidationError::InvalidPrice(price));
        }
        Ok(Self {
            number,
            room_type: room_type.to_owned(),
            price,
        })
    }

    /// The room number.
    #[must_use]
    pub fn number(&self) -> &RoomNumber {
        &self.number
    }

    /// Free-text room category.
    #[must_use]
    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    /// Nightly rate.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }
}

/// A room as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub room_number: String,
    pub room_type: String,
    pub status: RoomStatus,
    pub price: f64,
}

/// A room inserted by first-run seeding.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSeed {
    pub draft: RoomDraft,
    pub status: RoomStatus,
}

/// The five rooms a fresh database starts with.
///
/// # Errors
/// Only fails if the built-in seed values stop satisfying [`RoomDraft`]
/// validation.
pub fn default_room_seeds() -> Result<Vec<RoomSeed>, RoomValidationError> {
    [
        ("101", "Standard", RoomStatus::Available, 350_000.0),
        ("102", "Standard", RoomStatus::Occupied, 350_000.0),
        ("201", "Deluxe", RoomStatus::Cleaning, 500_000.0),
        ("202", "Deluxe", RoomStatus::Maintenance, 500_000.0),
        ("301", "Suite", RoomStatus::Available, 750_000.0),
    ]
    .into_iter()
    .map(|(number, room_type, status, price)| {
        Ok(RoomSeed {
            draft: RoomDraft::new(number, room_type, price)?,
            status,
        })
    })
    .collect()
}
