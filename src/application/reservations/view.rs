//! Read models for the guest's booking list and the admin's reservation
//! list

use rust_decimal::Decimal;

use crate::domain::{Booking, BookingStatus, DomainError, DomainResult, Room};

/// One room line with the room's current name and price
#[derive(Debug, Clone, PartialEq)]
pub struct BookedRoomView {
    pub room_id: i32,
    pub room_name: String,
    pub price_per_night: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone)]
pub struct BookingView {
    pub booking: Booking,
    pub hotel_name: String,
    pub rooms: Vec<BookedRoomView>,
    pub nights: i64,
    pub total_price: Decimal,
}

impl BookingView {
    /// Build the view from the booking and whatever rooms still exist.
    /// Lines whose room is gone are listed without a name or price.
    pub fn new(booking: Booking, hotel_name: String, rooms: &[Room]) -> DomainResult<Self> {
        let lines: Vec<BookedRoomView> = booking
            .rooms
            .iter()
            .map(|line| {
                let room = rooms.iter().find(|r| r.id == line.room_id);
                BookedRoomView {
                    room_id: line.room_id,
                    room_name: room.map(|r| r.room_name.clone()).unwrap_or_default(),
                    price_per_night: room.map(|r| r.price_per_night).unwrap_or_default(),
                    quantity: line.quantity,
                }
            })
            .collect();

        let nights = booking.dates.nights();
        let total_price = total_price(nights, &lines).ok_or_else(|| {
            DomainError::Storage(format!("Total price of booking {} overflows", booking.id))
        })?;
        Ok(Self {
            booking,
            hotel_name,
            rooms: lines,
            nights,
            total_price,
        })
    }

    pub fn status(&self) -> BookingStatus {
        self.booking.status
    }
}

/// A booking at the admin's hotel, with the guest's name
#[derive(Debug, Clone)]
pub struct ReservationView {
    pub guest_name: String,
    pub view: BookingView,
}

/// `nights × Σ(price × quantity)`, or `None` on overflow
pub fn total_price(nights: i64, lines: &[BookedRoomView]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |sum, l| {
            l.price_per_night
                .checked_mul(Decimal::from(l.quantity))
                .and_then(|line| sum.checked_add(line))
        })?
        .checked_mul(Decimal::from(nights))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::domain::{BookedRoom, DateRange};

    fn room(id: i32, name: &str, cents: i64) -> Room {
        Room {
            id,
            hotel_id: 1,
            room_type_id: 1,
            room_name: name.into(),
            price_per_night: Decimal::new(cents, 2),
            is_available: false,
        }
    }

    #[test]
    fn total_is_nights_times_sum_of_lines() {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let booking = Booking {
            id: 1,
            guest_id: 1,
            hotel_id: 1,
            dates: DateRange::new(d("2025-06-01"), d("2025-06-04")).unwrap(),
            guests: 3,
            status: BookingStatus::Confirmed,
            rooms: vec![BookedRoom::new(1, 2), BookedRoom::new(2, 1), BookedRoom::new(9, 1)],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let rooms = [room(1, "Twin", 8050), room(2, "Suite", 20000)];

        let view = BookingView::new(booking, "Seaside".into(), &rooms).unwrap();
        assert_eq!(view.nights, 3);
        // (80.50 * 2 + 200.00) * 3
        assert_eq!(view.total_price, Decimal::new(108300, 2));
        assert_eq!(view.rooms[0].room_name, "Twin");
        assert_eq!(view.rooms[2].room_name, "");
        assert_eq!(view.status(), BookingStatus::Confirmed);
    }

    #[test]
    fn overflowing_total_is_reported() {
        let huge = BookedRoomView {
            room_id: 1,
            room_name: "Palace".into(),
            price_per_night: Decimal::new(9_000_000_000_000_000, 2),
            quantity: 2_000_000_000,
        };
        assert_eq!(total_price(1_000_000, std::slice::from_ref(&huge)), None);
        assert_eq!(
            total_price(2, &[BookedRoomView { quantity: 1, ..huge }]),
            Some(Decimal::new(18_000_000_000_000_000, 2))
        );
    }
}
