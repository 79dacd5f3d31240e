//! Guests, stays and the check-in payload.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{RoomId, TaskId};

/// Store-generated guest identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(i32);

impl GuestId {
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

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether a guest is still staying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestStatus {
    Active,
    CheckedOut,
}

impl GuestStatus {
    /// Stable storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::CheckedOut => "checked_out",
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a [`GuestStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown guest status: {0}")]
pub struct ParseGuestStatusError(pub String);

impl FromStr for GuestStatus {
    type Err = ParseGuestStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "checked_out" => Ok(Self::CheckedOut),
            other => Err(ParseGuestStatusError(other.to_owned())),
        }
    }
}

/// Validation failures for check-in input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestValidationError {
    #[error("guest name must not be empty")]
    EmptyName,
    #[error("check-out date {check_out} must be after check-in date {check_in}")]
    StayNotPositive {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

/// Validated check-in request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInDraft {
    name: String,
    phone: Option<String>,
    email: Option<String>,
    room_id: RoomId,
    check_in: NaiveDate,
    check_out: NaiveDate,
}

/// Raw fields for [`CheckInDraft::new`].
#[derive(Debug, Clone)]
pub struct CheckInFields {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl CheckInDraft {
    /// Validate a check-in.
    ///
    /// # Errors
    /// Rejects a blank name and stays where check-out is not after check-in.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use hotel_ops::domain::{CheckInDraft, CheckInFields, RoomId};
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).expect("date");
    /// let draft = CheckInDraft::new(CheckInFields {
    ///     name: "Ada Lovelace".to_owned(),
    ///     phone: None,
    ///     email: Some("ada@example.com".to_owned()),
    ///     room_id: RoomId::new(1),
    ///     check_in: day(1),
    ///     check_out: day(4),
    /// })
    /// .expect("valid stay");
    /// assert_eq!(draft.nights(), 3);
    /// ```
    pub fn new(fields: CheckInFields) -> Result<Self, GuestValidationError> {
        let CheckInFields {
            name,
            phone,
            email,
            room_id,
            check_in,
            check_out,
        } = fields;
        let name = name.trim();
        if name.is_empty() {
            return Err(GuestValidationError::EmptyName);
        }
        if check_out <= check_in {
            return Err(GuestValidationError::StayNotPositive {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            name: name.to_owned(),
            phone: non_blank(phone),
            email: non_blank(email),
            room_id,
            check_in,
            check_out,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    #[must_use]
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    #[must_use]
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights booked.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// A guest as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub room_id: RoomId,
    pub status: GuestStatus,
}

/// Active guest row for the guest list. The room may have been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestListing {
    #[serde(flatten)]
    pub guest: Guest,
    pub room_number: Option<String>,
}

/// A guest joined with the room they stay in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestStay {
    #[serde(flatten)]
    pub guest: Guest,
    pub room_number: String,
    pub room_type: String,
    pub price: f64,
}

/// Stay length and cost derived from a [`GuestStay`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestDetails {
    pub stay: GuestStay,
    pub stay_nights: i64,
    pub total_cost: f64,
}

impl From<GuestStay> for GuestDetails {
    fn from(stay: GuestStay) -> Self {
        let stay_nights = (stay.guest.check_out - stay.guest.check_in).num_days();
        #[expect(
            clippy::cast_precision_loss,
            reason = "stay lengths are far below f64's exact integer range"
        )]
        let total_cost = stay_nights as f64 * stay.price;
        Self {
            stay,
            stay_nights,
            total_cost,
        }
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckoutOutcome {
    pub guest_id: GuestId,
    pub room_id: RoomId,
    pub cleaning_task_id: TaskId,
}

/// Entry in the recent check-in activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentCheckIn {
    pub name: String,
    pub check_in: NaiveDate,
    pub room_number: String,
}
