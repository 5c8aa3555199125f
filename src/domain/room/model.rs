//! Room and room type domain entities

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};

/// Bookable room of a hotel
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i32,
    pub hotel_id: i32,
    pub room_type_id: i32,
    pub room_name: String,
    pub price_per_night: Decimal,
    /// Cleared while a Pending/Confirmed booking holds the room
    pub is_available: bool,
}

/// Editable room fields, used for both create and update
#[derive(Debug, Clone)]
pub struct RoomDraft {
    pub room_type_id: i32,
    pub room_name: String,
    pub price_per_night: Decimal,
    /// `None` makes new rooms available and leaves an existing room's flag
    /// as it is
    pub is_available: Option<bool>,
}

impl RoomDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.room_name.trim().is_empty() {
            return Err(DomainError::Validation("Room name is required".into()));
        }
        validate_price(self.price_per_night)
    }
}

/// Room category, e.g. "Suite"
#[derive(Debug, Clone, PartialEq)]
pub struct RoomType {
    pub id: i32,
    pub type_name: String,
    pub description: String,
}

/// Prices are positive with at most two fractional digits.
pub fn validate_price(price: Decimal) -> DomainResult<()> {
    if price <= Decimal::ZERO {
        return Err(DomainError::Validation("Price must be positive".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(DomainError::Validation(
            "Price may have at most 2 decimal places".into(),
        ));
    }
    price_to_minor_units(price).map(|_| ())
}

/// Convert a price to integer cents for storage.
pub fn price_to_minor_units(price: Decimal) -> DomainResult<i64> {
    (price * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| DomainError::Validation("Price is out of range".into()))
}

pub fn price_from_minor_units(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
