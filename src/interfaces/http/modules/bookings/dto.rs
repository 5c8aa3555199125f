//! Booking DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{BookedRoomView, BookingView};
use crate::domain::{BookedRoom, Booking, DateRange, DomainResult};

/// One requested room line
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RoomSelection {
    pub room_id: i32,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, max = 20, message = "quantity must be between 1 and 20"))]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    pub hotel_id: i32,
    #[schema(value_type = String, format = Date, example = "2025-06-01")]
    pub check_in_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-06-03")]
    pub check_out_date: NaiveDate,
    #[validate(range(max = 50, message = "guests must be at most 50"))]
    pub guests: u32,
    #[validate(length(max = 50, message = "at most 50 rooms per booking"), nested)]
    pub rooms: Vec<RoomSelection>,
}

impl CreateBookingRequest {
    pub fn dates(&self) -> DomainResult<DateRange> {
        DateRange::new(self.check_in_date, self.check_out_date)
    }

    pub fn room_lines(&self) -> Vec<BookedRoom> {
        self.rooms
            .iter()
            .map(|r| BookedRoom::new(r.room_id, r.quantity))
            .collect()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDatesRequest {
    #[schema(value_type = String, format = Date, example = "2025-06-02")]
    pub check_in_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-06-05")]
    pub check_out_date: NaiveDate,
}

impl UpdateDatesRequest {
    pub fn dates(&self) -> DomainResult<DateRange> {
        DateRange::new(self.check_in_date, self.check_out_date)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookedRoomDto {
    pub room_id: i32,
    pub quantity: u32,
}

/// A booking as stored
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: i32,
    pub guest_id: i32,
    pub hotel_id: i32,
    #[schema(value_type = String, format = Date)]
    pub check_in_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub check_out_date: NaiveDate,
    pub guests: u32,
    /// Pending, Confirmed, Denied or Cancelled
    pub status: String,
    pub rooms: Vec<BookedRoomDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            guest_id: b.guest_id,
            hotel_id: b.hotel_id,
            check_in_date: b.dates.check_in(),
            check_out_date: b.dates.check_out(),
            guests: b.guests,
            status: b.status.to_string(),
            rooms: b
                .rooms
                .iter()
                .map(|r| BookedRoomDto {
                    room_id: r.room_id,
                    quantity: r.quantity,
                })
                .collect(),
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookedRoomDetailsDto {
    pub room_id: i32,
    pub room_name: String,
    #[schema(value_type = String, example = "120.00")]
    pub price_per_night: Decimal,
    pub quantity: u32,
}

impl From<BookedRoomView> for BookedRoomDetailsDto {
    fn from(v: BookedRoomView) -> Self {
        Self {
            room_id: v.room_id,
            room_name: v.room_name,
            price_per_night: v.price_per_night,
            quantity: v.quantity,
        }
    }
}

/// A booking on the guest's own list, with hotel and pricing details
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MyBookingDto {
    pub id: i32,
    pub hotel_id: i32,
    pub hotel_name: String,
    #[schema(value_type = String, format = Date)]
    pub check_in_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub check_out_date: NaiveDate,
    pub guests: u32,
    pub status: String,
    pub rooms: Vec<BookedRoomDetailsDto>,
    pub nights: i64,
    /// nights × Σ(price × quantity)
    #[schema(value_type = String, example = "240.00")]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<BookingView> for MyBookingDto {
    fn from(v: BookingView) -> Self {
        let status = v.status().to_string();
        Self {
            id: v.booking.id,
            hotel_id: v.booking.hotel_id,
            hotel_name: v.hotel_name,
            check_in_date: v.booking.dates.check_in(),
            check_out_date: v.booking.dates.check_out(),
            guests: v.booking.guests,
            status,
            rooms: v.rooms.into_iter().map(BookedRoomDetailsDto::from).collect(),
            nights: v.nights,
            total_price: v.total_price,
            created_at: v.booking.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(rooms: serde_json::Value) -> CreateBookingRequest {
        serde_json::from_value(json!({
            "hotel_id": 1,
            "check_in_date": "2025-06-01",
            "check_out_date": "2025-06-03",
            "guests": 2,
            "rooms": rooms,
        }))
        .unwrap()
    }

    #[test]
    fn quantity_defaults_to_one() {
        let req = parse(json!([{ "room_id": 7 }]));
        assert!(req.validate().is_ok());
        assert_eq!(req.room_lines(), vec![BookedRoom::new(7, 1)]);
    }

    #[test]
    fn quantity_outside_bounds_is_rejected() {
        assert!(parse(json!([{ "room_id": 7, "quantity": 21 }])).validate().is_err());
        assert!(parse(json!([{ "room_id": 7, "quantity": 0 }])).validate().is_err());
        assert!(parse(json!([{ "room_id": 7, "quantity": 20 }])).validate().is_ok());
    }

    #[test]
    fn too_many_room_lines_are_rejected() {
        let rooms: Vec<_> = (1..=51).map(|id| json!({ "room_id": id })).collect();
        assert!(parse(json!(rooms)).validate().is_err());
    }
}
