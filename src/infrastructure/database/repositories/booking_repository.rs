//! SeaORM implementation of BookingRepository
//!
//! A booking row and its `booked_rooms` lines are written in one
//! transaction and always loaded together.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::booking::BookingRepository;
use crate::domain::{
    BookedRoom, Booking, BookingStatus, DateRange, DomainError, DomainResult, NewBooking,
};
use crate::infrastructure::database::entities::{booked_room, booking};

use super::db_err;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_lines<C: ConnectionTrait>(
        conn: &C,
        booking_ids: Vec<i32>,
    ) -> DomainResult<HashMap<i32, Vec<BookedRoom>>> {
        let mut lines: HashMap<i32, Vec<BookedRoom>> = HashMap::new();
        if booking_ids.is_empty() {
            return Ok(lines);
        }

        let models = booked_room::Entity::find()
            .filter(booked_room::Column::BookingId.is_in(booking_ids))
            .order_by_asc(booked_room::Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;

        for m in models {
            let quantity = u32::try_from(m.quantity)
                .map_err(|_| corrupt("booked room quantity", m.quantity))?;
            lines
                .entry(m.booking_id)
                .or_default()
                .push(BookedRoom::new(m.room_id, quantity));
        }
        Ok(lines)
    }

    async fn hydrate(&self, models: Vec<booking::Model>) -> DomainResult<Vec<Booking>> {
        let ids = models.iter().map(|m| m.id).collect();
        let mut lines = Self::load_lines(&self.db, ids).await?;
        models
            .into_iter()
            .map(|m| {
                let rooms = lines.remove(&m.id).unwrap_or_default();
                model_to_domain(m, rooms)
            })
            .collect()
    }

    async fn fetch(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match model {
            Some(m) => Ok(self.hydrate(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn corrupt(field: &str, value: impl std::fmt::Display) -> DomainError {
    DomainError::Storage(format!("Invalid stored {}: {}", field, value))
}

fn model_to_domain(m: booking::Model, rooms: Vec<BookedRoom>) -> DomainResult<Booking> {
    let dates = DateRange::new(m.check_in_date, m.check_out_date)
        .map_err(|_| corrupt("booking dates", format!("{}..{}", m.check_in_date, m.check_out_date)))?;
    let status = m
        .status
        .parse::<BookingStatus>()
        .map_err(|_| corrupt("booking status", &m.status))?;
    let guests = u32::try_from(m.guests).map_err(|_| corrupt("guest count", m.guests))?;

    Ok(Booking {
        id: m.id,
        guest_id: m.guest_id,
        hotel_id: m.hotel_id,
        dates,
        guests,
        status,
        rooms,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn to_i32(value: u32, field: &str) -> DomainResult<i32> {
    i32::try_from(value).map_err(|_| DomainError::Validation(format!("{} is too large", field)))
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn create(&self, new: NewBooking) -> DomainResult<Booking> {
        debug!(
            "Creating booking for guest {} at hotel {} ({} rooms)",
            new.guest_id,
            new.hotel_id,
            new.rooms.len()
        );

        let now = Utc::now();
        let txn = self.db.begin().await.map_err(db_err)?;

        let saved = booking::ActiveModel {
            guest_id: Set(new.guest_id),
            hotel_id: Set(new.hotel_id),
            check_in_date: Set(new.dates.check_in()),
            check_out_date: Set(new.dates.check_out()),
            guests: Set(to_i32(new.guests, "guests")?),
            status: Set(BookingStatus::Pending.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_err)?;

        for line in &new.rooms {
            booked_room::ActiveModel {
                booking_id: Set(saved.id),
                room_id: Set(line.room_id),
                quantity: Set(to_i32(line.quantity, "quantity")?),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        model_to_domain(saved, new.rooms)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        self.fetch(id).await
    }

    async fn find_by_guest(&self, guest_id: i32) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::GuestId.eq(guest_id))
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.hydrate(models).await
    }

    async fn find_by_hotel(
        &self,
        hotel_id: i32,
        status: Option<BookingStatus>,
    ) -> DomainResult<Vec<Booking>> {
        let mut query = booking::Entity::find().filter(booking::Column::HotelId.eq(hotel_id));
        if let Some(status) = status {
            query = query.filter(booking::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(booking::Column::CreatedAt)
            .order_by_desc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        self.hydrate(models).await
    }

    async fn update_dates(&self, id: i32, dates: DateRange) -> DomainResult<Booking> {
        debug!("Updating booking {} dates to {}..{}", id, dates.check_in(), dates.check_out());

        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        let mut model: booking::ActiveModel = existing.into();
        model.check_in_date = Set(dates.check_in());
        model.check_out_date = Set(dates.check_out());
        model.updated_at = Set(Utc::now());
        model.update(&self.db).await.map_err(db_err)?;

        self.fetch(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))
    }

    async fn update_status(&self, id: i32, status: BookingStatus) -> DomainResult<Booking> {
        debug!("Updating booking {} status to {}", id, status);

        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Booking", id))?;

        let mut model: booking::ActiveModel = existing.into();
        model.status = Set(status.as_str().to_string());
        model.updated_at = Set(Utc::now());
        model.update(&self.db).await.map_err(db_err)?;

        self.fetch(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Booking", id))
    }

    async fn references_room(&self, room_id: i32) -> DomainResult<bool> {
        let count = booked_room::Entity::find()
            .filter(booked_room::Column::RoomId.eq(room_id))
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::{HotelDraft, RepositoryProvider, RoomDraft};
    use crate::infrastructure::database::{seed_room_types, test_connection, SeaOrmRepositoryProvider};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn fixture() -> (SeaOrmRepositoryProvider, i32, i32, i32) {
        let repos = SeaOrmRepositoryProvider::new(test_connection().await);
        seed_room_types(&repos).await.unwrap();

        let admin = repos.admins().create("manager", "hash").await.unwrap();
        let hotel = repos
            .hotels()
            .create(
                admin.id,
                HotelDraft {
                    name: "Seaside".into(),
                    email: "desk@seaside.test".into(),
                    phone: "+1 555 0100".into(),
                    city: "Lisbon".into(),
                    country: "Portugal".into(),
                    address: "1 Beach Road".into(),
                },
            )
            .await
            .unwrap();
        let suite = repos.room_types().find_by_name("Suite").await.unwrap().unwrap();
        let room = repos
            .rooms()
            .create(
                hotel.id,
                RoomDraft {
                    room_type_id: suite.id,
                    room_name: "Ocean Suite".into(),
                    price_per_night: Decimal::new(12050, 2),
                    is_available: Some(true),
                },
            )
            .await
            .unwrap();
        let guest = repos
            .guests()
            .create("Ana", "Ana@Example.com", "hash")
            .await
            .unwrap();
        (repos, hotel.id, room.id, guest.id)
    }

    #[tokio::test]
    async fn booking_round_trips_with_room_lines() {
        let (repos, hotel_id, room_id, guest_id) = fixture().await;

        let dates = DateRange::new(date("2025-06-01"), date("2025-06-03")).unwrap();
        let new = NewBooking::new(guest_id, hotel_id, dates, 2, vec![BookedRoom::new(room_id, 1)])
            .unwrap();
        let created = repos.bookings().create(new).await.unwrap();
        assert_eq!(created.status, BookingStatus::Pending);

        let loaded = repos.bookings().find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(loaded.rooms, vec![BookedRoom::new(room_id, 1)]);
        assert_eq!(loaded.dates.nights(), 2);
        assert_eq!(loaded.guests, 2);

        let mine = repos.bookings().find_by_guest(guest_id).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert!(repos.bookings().references_room(room_id).await.unwrap());

        let denied = repos
            .bookings()
            .update_status(created.id, BookingStatus::Denied)
            .await
            .unwrap();
        assert_eq!(denied.status, BookingStatus::Denied);
        assert_eq!(denied.dates, dates);

        let pending = repos
            .bookings()
            .find_by_hotel(hotel_id, Some(BookingStatus::Pending))
            .await
            .unwrap();
        assert!(pending.is_empty());
    }

    #[tokio::test]
    async fn prices_and_emails_are_normalized() {
        let (repos, _, room_id, _) = fixture().await;

        let room = repos.rooms().find_by_id(room_id).await.unwrap().unwrap();
        assert_eq!(room.price_per_night, Decimal::new(12050, 2));

        let guest = repos.guests().find_by_email("ANA@example.COM").await.unwrap();
        assert!(guest.is_some());

        repos.rooms().set_availability(&[room_id], false).await.unwrap();
        let room = repos.rooms().find_by_id(room_id).await.unwrap().unwrap();
        assert!(!room.is_available);
    }

    #[tokio::test]
    async fn deleting_hotel_removes_children() {
        let (repos, hotel_id, room_id, guest_id) = fixture().await;

        let dates = DateRange::new(date("2025-06-01"), date("2025-06-02")).unwrap();
        let new = NewBooking::new(guest_id, hotel_id, dates, 1, vec![BookedRoom::new(room_id, 1)])
            .unwrap();
        repos.bookings().create(new).await.unwrap();
        repos
            .amenities()
            .create(hotel_id, "Pool", "Outdoor pool")
            .await
            .unwrap();

        repos.hotels().delete(hotel_id).await.unwrap();

        assert!(repos.hotels().find_by_id(hotel_id).await.unwrap().is_none());
        assert!(repos.rooms().find_by_hotel(hotel_id).await.unwrap().is_empty());
        assert!(repos.amenities().find_by_hotel(hotel_id).await.unwrap().is_empty());
        assert!(repos.bookings().find_by_guest(guest_id).await.unwrap().is_empty());
        assert!(!repos.bookings().references_room(room_id).await.unwrap());
    }
}
