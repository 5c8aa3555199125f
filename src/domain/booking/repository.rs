//! Booking repository interface

use async_trait::async_trait;

use super::model::{Booking, BookingStatus, DateRange, NewBooking};
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking with status `Pending` and its room lines
    async fn create(&self, booking: NewBooking) -> DomainResult<Booking>;

    /// Find booking (with rooms) by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    /// All bookings of a guest, newest first
    async fn find_by_guest(&self, guest_id: i32) -> DomainResult<Vec<Booking>>;

    /// All bookings of a hotel, newest first, optionally filtered by status
    async fn find_by_hotel(
        &self,
        hotel_id: i32,
        status: Option<BookingStatus>,
    ) -> DomainResult<Vec<Booking>>;

    /// Replace the stay dates of a booking
    async fn update_dates(&self, id: i32, dates: DateRange) -> DomainResult<Booking>;

    /// Set the status of a booking
    async fn update_status(&self, id: i32, status: BookingStatus) -> DomainResult<Booking>;

    /// Whether any booking, in any status, has a line for this room
    async fn references_room(&self, room_id: i32) -> DomainResult<bool>;
}
