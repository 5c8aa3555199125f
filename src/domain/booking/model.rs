//! Booking domain entity

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{DomainError, DomainResult};

/// Booking status
///
/// Admins may move a booking between `Pending`, `Confirmed` and `Denied`
/// in any order. `Cancelled` is only reached through guest cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Denied,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Denied => "Denied",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether a booking in this status keeps its rooms out of the
    /// available pool.
    pub fn holds_rooms(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Statuses an admin is allowed to set.
    pub fn is_admin_settable(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "denied" => Ok(Self::Denied),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "Unknown booking status '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Longest stay a single booking may cover
pub const MAX_NIGHTS: i64 = 365;

/// Most units of one room a booking line may request
pub const MAX_ROOM_QUANTITY: u32 = 20;

/// Stay dates. Check-out is always strictly after check-in and at most
/// [`MAX_NIGHTS`] later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> DomainResult<Self> {
        if check_out <= check_in {
            return Err(DomainError::Validation(format!(
                "check_out_date ({}) must be after check_in_date ({})",
                check_out, check_in
            )));
        }
        if (check_out - check_in).num_days() > MAX_NIGHTS {
            return Err(DomainError::Validation(format!(
                "A stay may last at most {} nights",
                MAX_NIGHTS
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// One room line of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedRoom {
    pub room_id: i32,
    pub quantity: u32,
}

impl BookedRoom {
    pub fn new(room_id: i32, quantity: u32) -> Self {
        Self { room_id, quantity }
    }
}

/// Guest reservation
#[derive(Debug, Clone)]
pub struct Booking {
    pub id: i32,
    pub guest_id: i32,
    pub hotel_id: i32,
    pub dates: DateRange,
    /// Number of people staying
    pub guests: u32,
    pub status: BookingStatus,
    pub rooms: Vec<BookedRoom>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn room_ids(&self) -> Vec<i32> {
        self.rooms.iter().map(|r| r.room_id).collect()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

/// Validated input for a new booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub guest_id: i32,
    pub hotel_id: i32,
    pub dates: DateRange,
    pub guests: u32,
    pub rooms: Vec<BookedRoom>,
}

impl NewBooking {
    pub fn new(
        guest_id: i32,
        hotel_id: i32,
        dates: DateRange,
        guests: u32,
        rooms: Vec<BookedRoom>,
    ) -> DomainResult<Self> {
        if guests == 0 {
            return Err(DomainError::Validation(
                "At least one guest is required".into(),
            ));
        }
        validate_room_selection(&rooms)?;
        Ok(Self {
            guest_id,
            hotel_id,
            dates,
            guests,
            rooms,
        })
    }
}

/// A selection must name at least one room, each once, with a quantity
/// between 1 and [`MAX_ROOM_QUANTITY`].
pub fn validate_room_selection(rooms: &[BookedRoom]) -> DomainResult<()> {
    if rooms.is_empty() {
        return Err(DomainError::Validation(
            "Please select at least one room".into(),
        ));
    }

    let mut seen = HashSet::new();
    for room in rooms {
        if room.quantity == 0 {
            return Err(DomainError::Validation(format!(
                "Room {} must have a quantity of at least 1",
                room.room_id
            )));
        }
        if room.quantity > MAX_ROOM_QUANTITY {
            return Err(DomainError::Validation(format!(
                "Room {} may be booked at most {} times",
                room.room_id, MAX_ROOM_QUANTITY
            )));
        }
        if !seen.insert(room.room_id) {
            return Err(DomainError::Validation(format!(
                "Room {} is selected more than once",
                room.room_id
            )));
        }
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────
