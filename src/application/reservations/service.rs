//! Reservation workflow
//!
//! Create, amend, cancel and admin status changes. Room availability
//! follows the booking status: Pending and Confirmed bookings hold their
//! rooms, Denied and Cancelled ones release them.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;

use super::view::{BookingView, ReservationView};
use crate::application::session::SessionContext;
use crate::domain::{
    BookedRoom, Booking, BookingPolicy, BookingStatus, DateRange, DomainError, DomainResult,
    Hotel, NewBooking, RepositoryProvider,
};

/// Guest input for a new booking
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub hotel_id: i32,
    pub dates: DateRange,
    pub guests: u32,
    pub rooms: Vec<BookedRoom>,
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    policy: BookingPolicy,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, policy: BookingPolicy) -> Self {
        Self { repos, policy }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    // ── Guest actions ───────────────────────────────────────────

    /// Book rooms of one hotel. The booking starts `Pending` and its rooms
    /// become unavailable.
    pub async fn create_booking(
        &self,
        session: &SessionContext,
        request: BookingRequest,
    ) -> DomainResult<Booking> {
        let guest_id = session.require_guest()?;
        let new = NewBooking::new(
            guest_id,
            request.hotel_id,
            request.dates,
            request.guests,
            request.rooms,
        )?;

        self.find_hotel(new.hotel_id).await?;
        self.policy
            .check_lead_time(new.dates.check_in(), Self::today(), "create")?;
        self.check_rooms_bookable(new.hotel_id, &new.rooms).await?;

        let booking = self.repos.bookings().create(new).await?;
        self.repos
            .rooms()
            .set_availability(&booking.room_ids(), false)
            .await?;

        metrics::counter!("bookings_created_total").increment(1);
        info!(
            booking_id = booking.id,
            guest_id,
            hotel_id = booking.hotel_id,
            check_in = %booking.dates.check_in(),
            check_out = %booking.dates.check_out(),
            "Booking created"
        );
        Ok(booking)
    }

    /// Move the stay of the guest's own booking. Rooms, guest count and
    /// status are left as they are.
    pub async fn update_booking_dates(
        &self,
        session: &SessionContext,
        booking_id: i32,
        dates: DateRange,
    ) -> DomainResult<Booking> {
        let booking = self.own_booking(session, booking_id).await?;
        if booking.is_cancelled() {
            return Err(DomainError::Conflict(format!(
                "Booking {} is cancelled and cannot be changed",
                booking_id
            )));
        }

        let today = Self::today();
        self.policy
            .check_lead_time(booking.dates.check_in(), today, "update")?;
        self.policy.check_lead_time(dates.check_in(), today, "update")?;

        let updated = self.repos.bookings().update_dates(booking_id, dates).await?;
        info!(
            booking_id,
            check_in = %dates.check_in(),
            check_out = %dates.check_out(),
            "Booking dates updated"
        );
        Ok(updated)
    }

    /// Cancel the guest's own booking and release its rooms.
    /// Cancelling twice returns the booking unchanged.
    pub async fn cancel_booking(&self, session: &SessionContext, booking_id: i32) -> DomainResult<Booking> {
        let booking = self.own_booking(session, booking_id).await?;
        if booking.is_cancelled() {
            return Ok(booking);
        }

        self.policy
            .check_lead_time(booking.dates.check_in(), Self::today(), "cancel")?;

        let cancelled = self
            .transition(booking, BookingStatus::Cancelled)
            .await?;
        info!(booking_id, "Booking cancelled");
        Ok(cancelled)
    }

    /// The guest's bookings, newest first, with hotel and room details.
    pub async fn my_bookings(&self, session: &SessionContext) -> DomainResult<Vec<BookingView>> {
        let guest_id = session.require_guest()?;
        let bookings = self.repos.bookings().find_by_guest(guest_id).await?;

        let mut room_ids: Vec<i32> = bookings.iter().flat_map(|b| b.room_ids()).collect();
        room_ids.sort_unstable();
        room_ids.dedup();
        let rooms = self.repos.rooms().find_by_ids(&room_ids).await?;

        let mut hotel_names: HashMap<i32, String> = HashMap::new();
        let mut views = Vec::with_capacity(bookings.len());
        for booking in bookings {
            if !hotel_names.contains_key(&booking.hotel_id) {
                let name = self
                    .repos
                    .hotels()
                    .find_by_id(booking.hotel_id)
                    .await?
                    .map(|h| h.name)
                    .unwrap_or_default();
                hotel_names.insert(booking.hotel_id, name);
            }
            let hotel_name = hotel_names
                .get(&booking.hotel_id)
                .cloned()
                .unwrap_or_default();
            views.push(BookingView::new(booking, hotel_name, &rooms)?);
        }
        Ok(views)
    }

    // ── Admin actions ───────────────────────────────────────────

    /// Set the status of a booking at the admin's hotel. Any of Pending,
    /// Confirmed and Denied may be set from any current status.
    pub async fn set_booking_status(
        &self,
        session: &SessionContext,
        booking_id: i32,
        status: BookingStatus,
    ) -> DomainResult<Booking> {
        let admin_id = session.require_admin()?;
        if !status.is_admin_settable() {
            return Err(DomainError::Validation(format!(
                "Admins cannot set status {}",
                status
            )));
        }

        let booking = self.find_booking(booking_id).await?;
        let hotel = self.find_hotel(booking.hotel_id).await?;
        if hotel.admin_id != admin_id {
            return Err(DomainError::Forbidden(format!(
                "Booking {} belongs to another hotel",
                booking_id
            )));
        }

        let previous = booking.status;
        let updated = self.transition(booking, status).await?;

        metrics::counter!("booking_status_changes_total", "status" => status.as_str()).increment(1);
        info!(booking_id, from = %previous, to = %status, "Booking status changed");
        Ok(updated)
    }

    /// Reservations at the admin's hotel, newest first, with guest and
    /// room names.
    pub async fn list_hotel_bookings(
        &self,
        session: &SessionContext,
        status: Option<BookingStatus>,
    ) -> DomainResult<Vec<ReservationView>> {
        let admin_id = session.require_admin()?;
        let Some(hotel) = self.repos.hotels().find_by_admin(admin_id).await? else {
            return Ok(Vec::new());
        };
        let bookings = self.repos.bookings().find_by_hotel(hotel.id, status).await?;
        let rooms = self.repos.rooms().find_by_hotel(hotel.id).await?;

        let mut guest_names: HashMap<i32, String> = HashMap::new();
        let mut views = Vec::with_capacity(bookings.len());
        for booking in bookings {
            if !guest_names.contains_key(&booking.guest_id) {
                let name = self
                    .repos
                    .guests()
                    .find_by_id(booking.guest_id)
                    .await?
                    .map(|g| g.name)
                    .unwrap_or_default();
                guest_names.insert(booking.guest_id, name);
            }
            let guest_name = guest_names
                .get(&booking.guest_id)
                .cloned()
                .unwrap_or_default();
            views.push(ReservationView {
                guest_name,
                view: BookingView::new(booking, hotel.name.clone(), &rooms)?,
            });
        }
        Ok(views)
    }

    // ── Shared ──────────────────────────────────────────────────

    /// One booking, readable by its guest or the hotel's admin.
    pub async fn get_booking(&self, session: &SessionContext, booking_id: i32) -> DomainResult<Booking> {
        let booking = self.find_booking(booking_id).await?;
        let allowed = if session.is_admin() {
            self.find_hotel(booking.hotel_id).await?.admin_id == session.account_id
        } else {
            booking.guest_id == session.account_id
        };
        if !allowed {
            return Err(DomainError::Forbidden(format!(
                "Booking {} is not accessible",
                booking_id
            )));
        }
        Ok(booking)
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn find_booking(&self, booking_id: i32) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", booking_id))
    }

    async fn find_hotel(&self, hotel_id: i32) -> DomainResult<Hotel> {
        self.repos
            .hotels()
            .find_by_id(hotel_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", hotel_id))
    }

    async fn own_booking(&self, session: &SessionContext, booking_id: i32) -> DomainResult<Booking> {
        let guest_id = session.require_guest()?;
        let booking = self.find_booking(booking_id).await?;
        if booking.guest_id != guest_id {
            return Err(DomainError::Forbidden(format!(
                "Booking {} belongs to another guest",
                booking_id
            )));
        }
        Ok(booking)
    }

    /// Every requested room must exist, belong to the hotel and be free.
    async fn check_rooms_bookable(&self, hotel_id: i32, lines: &[BookedRoom]) -> DomainResult<()> {
        let ids: Vec<i32> = lines.iter().map(|l| l.room_id).collect();
        let rooms = self.repos.rooms().find_by_ids(&ids).await?;

        for id in ids {
            let room = rooms
                .iter()
                .find(|r| r.id == id)
                .ok_or_else(|| DomainError::not_found("Room", id))?;
            if room.hotel_id != hotel_id {
                return Err(DomainError::Validation(format!(
                    "Room {} does not belong to hotel {}",
                    id, hotel_id
                )));
            }
            if !room.is_available {
                return Err(DomainError::Conflict(format!("Room {} is not available", id)));
            }
        }
        Ok(())
    }

    /// Persist a status change and flip room availability when the change
    /// crosses the holds-rooms boundary.
    async fn transition(&self, booking: Booking, status: BookingStatus) -> DomainResult<Booking> {
        let was_holding = booking.status.holds_rooms();
        if !was_holding && status.holds_rooms() {
            self.check_rooms_bookable(booking.hotel_id, &booking.rooms)
                .await?;
        }
        let updated = self.repos.bookings().update_status(booking.id, status).await?;

        if was_holding != status.holds_rooms() {
            self.repos
                .rooms()
                .set_availability(&updated.room_ids(), !status.holds_rooms())
                .await?;
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{HotelDraft, RoomDraft};
    use crate::infrastructure::InMemoryRepositoryProvider;

    struct Fixture {
        svc: ReservationService,
        repos: Arc<InMemoryRepositoryProvider>,
        hotel_id: i32,
        rooms: Vec<i32>,
        admin: SessionContext,
        guest: SessionContext,
    }

    fn hotel_draft(name: &str) -> HotelDraft {
        HotelDraft {
            name: name.into(),
            email: "desk@hotel.test".into(),
            phone: "555-0100".into(),
            city: "Madrid".into(),
            country: "Spain".into(),
            address: "Gran Via 1".into(),
        }
    }

    async fn add_room(repos: &InMemoryRepositoryProvider, hotel_id: i32, name: &str) -> i32 {
        repos
            .rooms()
            .create(
                hotel_id,
                RoomDraft {
                    room_type_id: 1,
                    room_name: name.into(),
                    price_per_night: Decimal::new(10000, 2),
                    is_available: Some(true),
                },
            )
            .await
            .unwrap()
            .id
    }

    async fn fixture(advance_booking_days: u32) -> Fixture {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let admin = repos.admins().create("owner", "h").await.unwrap();
        let guest = repos.guests().create("Ana", "ana@x.io", "h").await.unwrap();
        let hotel = repos.hotels().create(admin.id, hotel_draft("Sol")).await.unwrap();
        let rooms = vec![
            add_room(&repos, hotel.id, "101").await,
            add_room(&repos, hotel.id, "102").await,
        ];
        Fixture {
            svc: ReservationService::new(repos.clone(), BookingPolicy::new(advance_booking_days)),
            repos,
            hotel_id: hotel.id,
            rooms,
            admin: SessionContext::admin(admin.id, "owner"),
            guest: SessionContext::guest(guest.id, "Ana"),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn days_from_today(days: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(days)
    }

    fn range(check_in: NaiveDate, nights: i64) -> DateRange {
        DateRange::new(check_in, check_in + Duration::days(nights)).unwrap()
    }

    fn request(f: &Fixture, dates: DateRange, rooms: &[i32]) -> BookingRequest {
        BookingRequest {
            hotel_id: f.hotel_id,
            dates,
            guests: 2,
            rooms: rooms.iter().map(|id| BookedRoom::new(*id, 1)).collect(),
        }
    }

    async fn is_available(f: &Fixture, room_id: i32) -> bool {
        f.repos.rooms().find_by_id(room_id).await.unwrap().unwrap().is_available
    }

    #[tokio::test]
    async fn create_starts_pending_and_holds_rooms() {
        let f = fixture(0).await;
        let dates = DateRange::new(date("2025-06-01"), date("2025-06-03")).unwrap();
        let booking = f
            .svc
            .create_booking(&f.guest, request(&f, dates, &[f.rooms[0]]))
            .await
            .unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.dates.nights(), 2);
        assert!(!is_available(&f, f.rooms[0]).await);
        assert!(is_available(&f, f.rooms[1]).await);
    }

    #[tokio::test]
    async fn editing_a_held_room_keeps_it_held() {
        let f = fixture(0).await;
        let catalog = crate::application::CatalogService::new(f.repos.clone());
        let dates = range(date("2025-06-01"), 2);
        f.svc
            .create_booking(&f.guest, request(&f, dates, &[f.rooms[0]]))
            .await
            .unwrap();

        let mut edit = RoomDraft {
            room_type_id: 1,
            room_name: "101".into(),
            price_per_night: Decimal::new(12500, 2),
            is_available: None,
        };
        let updated = catalog.update_room(&f.admin, f.rooms[0], edit.clone()).await.unwrap();
        assert_eq!(updated.price_per_night, Decimal::new(12500, 2));
        assert!(!updated.is_available);

        edit.is_available = Some(true);
        assert!(matches!(
            catalog.update_room(&f.admin, f.rooms[0], edit).await,
            Err(DomainError::Conflict(_))
        ));

        let other = f.repos.guests().create("Bo", "bo@x.io", "h").await.unwrap();
        let other = SessionContext::guest(other.id, "Bo");
        assert!(matches!(
            f.svc.create_booking(&other, request(&f, dates, &[f.rooms[0]])).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn create_rejects_empty_selection_and_same_day_checkout() {
        let f = fixture(0).await;
        assert!(DateRange::new(date("2025-06-01"), date("2025-06-01")).is_err());

        let dates = range(date("2025-06-01"), 1);
        assert!(matches!(
            f.svc.create_booking(&f.guest, request(&f, dates, &[])).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn create_rejects_foreign_unknown_and_held_rooms() {
        let f = fixture(0).await;
        let other_admin = f.repos.admins().create("other", "h").await.unwrap();
        let other_hotel = f
            .repos
            .hotels()
            .create(other_admin.id, hotel_draft("Luna"))
            .await
            .unwrap();
        let foreign_room = add_room(&f.repos, other_hotel.id, "201").await;
        let dates = range(date("2025-06-01"), 2);

        assert!(matches!(
            f.svc.create_booking(&f.guest, request(&f, dates, &[foreign_room])).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            f.svc.create_booking(&f.guest, request(&f, dates, &[999])).await,
            Err(DomainError::NotFound { .. })
        ));

        f.svc
            .create_booking(&f.guest, request(&f, dates, &[f.rooms[0]]))
            .await
            .unwrap();
        assert!(matches!(
            f.svc.create_booking(&f.guest, request(&f, dates, &[f.rooms[0]])).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn admins_cannot_book() {
        let f = fixture(0).await;
        let dates = range(date("2025-06-01"), 1);
        assert!(matches!(
            f.svc.create_booking(&f.admin, request(&f, dates, &[f.rooms[0]])).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn cancel_releases_rooms_and_is_idempotent() {
        let f = fixture(0).await;
        let booking = f
            .svc
            .create_booking(&f.guest, request(&f, range(date("2025-06-01"), 2), &f.rooms))
            .await
            .unwrap();

        let cancelled = f.svc.cancel_booking(&f.guest, booking.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert!(is_available(&f, f.rooms[0]).await);
        assert!(is_available(&f, f.rooms[1]).await);

        let again = f.svc.cancel_booking(&f.guest, booking.id).await.unwrap();
        assert_eq!(again.status, BookingStatus::Cancelled);
        assert_eq!(again.updated_at, cancelled.updated_at);
    }

    #[tokio::test]
    async fn guests_cannot_touch_other_guests_bookings() {
        let f = fixture(0).await;
        let booking = f
            .svc
            .create_booking(&f.guest, request(&f, range(date("2025-06-01"), 2), &[f.rooms[0]]))
            .await
            .unwrap();
        let intruder = SessionContext::guest(f.guest.account_id + 100, "eve");

        assert!(matches!(
            f.svc.cancel_booking(&intruder, booking.id).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            f.svc
                .update_booking_dates(&intruder, booking.id, range(date("2025-07-01"), 1))
                .await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            f.svc.get_booking(&intruder, booking.id).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(f.svc.get_booking(&f.guest, booking.id).await.is_ok());
        assert!(f.svc.get_booking(&f.admin, booking.id).await.is_ok());
    }

    #[tokio::test]
    async fn amending_dates_keeps_rooms_and_status() {
        let f = fixture(0).await;
        let booking = f
            .svc
            .create_booking(&f.guest, request(&f, range(date("2025-06-01"), 2), &[f.rooms[0]]))
            .await
            .unwrap();

        let new_dates = range(date("2025-06-10"), 4);
        let updated = f
            .svc
            .update_booking_dates(&f.guest, booking.id, new_dates)
            .await
            .unwrap();
        assert_eq!(updated.dates, new_dates);
        assert_eq!(updated.rooms, booking.rooms);
        assert_eq!(updated.status, BookingStatus::Pending);
        assert_eq!(updated.guests, booking.guests);

        f.svc.cancel_booking(&f.guest, booking.id).await.unwrap();
        assert!(matches!(
            f.svc
                .update_booking_dates(&f.guest, booking.id, range(date("2025-06-20"), 1))
                .await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn status_changes_follow_holds_rooms_rule() {
        let f = fixture(0).await;
        let dates = range(date("2025-06-01"), 2);
        let booking = f
            .svc
            .create_booking(&f.guest, request(&f, dates, &[f.rooms[0]]))
            .await
            .unwrap();

        let confirmed = f
            .svc
            .set_booking_status(&f.admin, booking.id, BookingStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert_eq!(confirmed.dates, dates);
        assert_eq!(confirmed.rooms, booking.rooms);
        assert_eq!(confirmed.guest_id, booking.guest_id);
        assert!(!is_available(&f, f.rooms[0]).await);

        f.svc
            .set_booking_status(&f.admin, booking.id, BookingStatus::Denied)
            .await
            .unwrap();
        assert!(is_available(&f, f.rooms[0]).await);

        f.svc
            .set_booking_status(&f.admin, booking.id, BookingStatus::Pending)
            .await
            .unwrap();
        assert!(!is_available(&f, f.rooms[0]).await);
    }

    #[tokio::test]
    async fn reholding_a_taken_room_conflicts() {
        let f = fixture(0).await;
        let dates = range(date("2025-06-01"), 2);
        let first = f
            .svc
            .create_booking(&f.guest, request(&f, dates, &[f.rooms[0]]))
            .await
            .unwrap();
        f.svc
            .set_booking_status(&f.admin, first.id, BookingStatus::Denied)
            .await
            .unwrap();
        f.svc
            .create_booking(&f.guest, request(&f, dates, &[f.rooms[0]]))
            .await
            .unwrap();

        assert!(matches!(
            f.svc
                .set_booking_status(&f.admin, first.id, BookingStatus::Confirmed)
                .await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn admins_only_manage_their_own_hotel() {
        let f = fixture(0).await;
        let booking = f
            .svc
            .create_booking(&f.guest, request(&f, range(date("2025-06-01"), 2), &[f.rooms[0]]))
            .await
            .unwrap();
        let stranger = SessionContext::admin(f.admin.account_id + 100, "stranger");

        assert!(matches!(
            f.svc
                .set_booking_status(&stranger, booking.id, BookingStatus::Confirmed)
                .await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            f.svc
                .set_booking_status(&f.admin, booking.id, BookingStatus::Cancelled)
                .await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            f.svc
                .set_booking_status(&f.guest, booking.id, BookingStatus::Confirmed)
                .await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(f.svc.list_hotel_bookings(&stranger, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn hotel_bookings_can_be_filtered_by_status() {
        let f = fixture(0).await;
        let dates = range(date("2025-06-01"), 2);
        let first = f
            .svc
            .create_booking(&f.guest, request(&f, dates, &[f.rooms[0]]))
            .await
            .unwrap();
        let second = f
            .svc
            .create_booking(&f.guest, request(&f, dates, &[f.rooms[1]]))
            .await
            .unwrap();
        f.svc
            .set_booking_status(&f.admin, first.id, BookingStatus::Confirmed)
            .await
            .unwrap();

        let all = f.svc.list_hotel_bookings(&f.admin, None).await.unwrap();
        assert_eq!(
            all.iter().map(|r| r.view.booking.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );
        assert_eq!(all[0].guest_name, "Ana");
        assert_eq!(all[0].view.rooms[0].room_name, "102");
        assert_eq!(all[1].view.total_price, Decimal::new(200, 0));

        let confirmed = f
            .svc
            .list_hotel_bookings(&f.admin, Some(BookingStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].view.booking.id, first.id);
    }

    #[tokio::test]
    async fn advance_rule_applies_to_create_update_and_cancel() {
        let f = fixture(3).await;

        assert!(matches!(
            f.svc
                .create_booking(&f.guest, request(&f, range(days_from_today(1), 2), &[f.rooms[0]]))
                .await,
            Err(DomainError::Forbidden(_))
        ));

        let booking = f
            .svc
            .create_booking(&f.guest, request(&f, range(days_from_today(3), 2), &[f.rooms[0]]))
            .await
            .unwrap();

        assert!(matches!(
            f.svc
                .update_booking_dates(&f.guest, booking.id, range(days_from_today(2), 2))
                .await,
            Err(DomainError::Forbidden(_))
        ));

        let later = f
            .svc
            .update_booking_dates(&f.guest, booking.id, range(days_from_today(10), 2))
            .await
            .unwrap();
        assert_eq!(later.dates.check_in(), days_from_today(10));

        f.svc.cancel_booking(&f.guest, booking.id).await.unwrap();
    }

    #[tokio::test]
    async fn cancel_inside_advance_window_is_forbidden_but_repeat_cancel_is_not() {
        let f = fixture(0).await;
        let booking = f
            .svc
            .create_booking(&f.guest, request(&f, range(days_from_today(1), 2), &[f.rooms[0]]))
            .await
            .unwrap();

        let strict = ReservationService::new(f.repos.clone(), BookingPolicy::new(3));
        assert!(matches!(
            strict.cancel_booking(&f.guest, booking.id).await,
            Err(DomainError::Forbidden(_))
        ));

        f.svc.cancel_booking(&f.guest, booking.id).await.unwrap();
        let again = strict.cancel_booking(&f.guest, booking.id).await.unwrap();
        assert!(again.is_cancelled());
    }

    #[tokio::test]
    async fn my_bookings_include_hotel_rooms_and_totals() {
        let f = fixture(0).await;
        let dates = range(date("2025-06-01"), 3);
        let mut req = request(&f, dates, &f.rooms);
        req.rooms[1].quantity = 2;
        f.svc.create_booking(&f.guest, req).await.unwrap();

        let views = f.svc.my_bookings(&f.guest).await.unwrap();
        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.hotel_name, "Sol");
        assert_eq!(view.nights, 3);
        assert_eq!(view.rooms.len(), 2);
        assert_eq!(view.rooms[0].room_name, "101");
        // (100 + 100 * 2) * 3
        assert_eq!(view.total_price, Decimal::new(900, 0));

        assert!(matches!(
            f.svc.my_bookings(&f.admin).await,
            Err(DomainError::Forbidden(_))
        ));
    }
}
