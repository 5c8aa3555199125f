//! Reservation DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::ReservationView;
use crate::interfaces::http::modules::bookings::BookedRoomDetailsDto;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReservationQuery {
    /// Filter by status: Pending, Confirmed, Denied or Cancelled
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    /// Pending, Confirmed or Denied
    #[validate(length(min = 1, message = "status is required"))]
    #[schema(example = "Confirmed")]
    pub status: String,
}

/// A reservation row on the admin's list
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub guest_id: i32,
    pub guest_name: String,
    #[schema(value_type = String, format = Date)]
    pub check_in_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub check_out_date: NaiveDate,
    pub guests: u32,
    pub status: String,
    pub rooms: Vec<BookedRoomDetailsDto>,
    pub nights: i64,
    #[schema(value_type = String, example = "240.00")]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<ReservationView> for ReservationDto {
    fn from(r: ReservationView) -> Self {
        let v = r.view;
        let status = v.status().to_string();
        Self {
            id: v.booking.id,
            guest_id: v.booking.guest_id,
            guest_name: r.guest_name,
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
