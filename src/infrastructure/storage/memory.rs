//! In-memory repository provider
//!
//! DashMap-backed tables with atomic ID counters. Used by tests and by
//! the `memory` database URL.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::account::{AdminRepository, GuestRepository};
use crate::domain::amenity::AmenityRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::hotel::HotelRepository;
use crate::domain::room::{RoomRepository, RoomTypeRepository};
use crate::domain::{
    Admin, Amenity, Booking, BookingStatus, DateRange, DomainError, DomainResult, Guest, Hotel,
    HotelDraft, NewBooking, RepositoryProvider, Room, RoomDraft, RoomType,
};

/// Auto-increment sequence starting at 1
struct Sequence(AtomicI32);

impl Sequence {
    fn new() -> Self {
        Self(AtomicI32::new(1))
    }

    fn next(&self) -> i32 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

struct Tables {
    guests: DashMap<i32, Guest>,
    admins: DashMap<i32, Admin>,
    hotels: DashMap<i32, Hotel>,
    rooms: DashMap<i32, Room>,
    room_types: DashMap<i32, RoomType>,
    amenities: DashMap<i32, Amenity>,
    bookings: DashMap<i32, Booking>,
    guest_seq: Sequence,
    admin_seq: Sequence,
    hotel_seq: Sequence,
    room_seq: Sequence,
    room_type_seq: Sequence,
    amenity_seq: Sequence,
    booking_seq: Sequence,
}

impl Tables {
    fn new() -> Self {
        Self {
            guests: DashMap::new(),
            admins: DashMap::new(),
            hotels: DashMap::new(),
            rooms: DashMap::new(),
            room_types: DashMap::new(),
            amenities: DashMap::new(),
            bookings: DashMap::new(),
            guest_seq: Sequence::new(),
            admin_seq: Sequence::new(),
            hotel_seq: Sequence::new(),
            room_seq: Sequence::new(),
            room_type_seq: Sequence::new(),
            amenity_seq: Sequence::new(),
            booking_seq: Sequence::new(),
        }
    }
}

/// Repository view over the shared tables
#[derive(Clone)]
pub struct MemoryRepository {
    tables: Arc<Tables>,
}

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    repo: MemoryRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            repo: MemoryRepository {
                tables: Arc::new(Tables::new()),
            },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn guests(&self) -> &dyn GuestRepository {
        &self.repo
    }

    fn admins(&self) -> &dyn AdminRepository {
        &self.repo
    }

    fn hotels(&self) -> &dyn HotelRepository {
        &self.repo
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.repo
    }

    fn room_types(&self) -> &dyn RoomTypeRepository {
        &self.repo
    }

    fn amenities(&self) -> &dyn AmenityRepository {
        &self.repo
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.repo
    }
}

fn newest_first(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

// ── Accounts ────────────────────────────────────────────────────

#[async_trait]
impl GuestRepository for MemoryRepository {
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> DomainResult<Guest> {
        let email = email.trim().to_lowercase();
        if self.tables.guests.iter().any(|g| g.email == email) {
            return Err(DomainError::Conflict(format!("Guest with email '{}'", email)));
        }
        let guest = Guest {
            id: self.tables.guest_seq.next(),
            name: name.to_string(),
            email,
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        self.tables.guests.insert(guest.id, guest.clone());
        Ok(guest)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Guest>> {
        Ok(self.tables.guests.get(&id).map(|g| g.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Guest>> {
        let email = email.trim().to_lowercase();
        Ok(self
            .tables
            .guests
            .iter()
            .find(|g| g.email == email)
            .map(|g| g.value().clone()))
    }
}

#[async_trait]
impl AdminRepository for MemoryRepository {
    async fn create(&self, name: &str, password_hash: &str) -> DomainResult<Admin> {
        if self.tables.admins.iter().any(|a| a.name == name) {
            return Err(DomainError::Conflict(format!("Admin with name '{}'", name)));
        }
        let admin = Admin {
            id: self.tables.admin_seq.next(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        self.tables.admins.insert(admin.id, admin.clone());
        Ok(admin)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Admin>> {
        Ok(self.tables.admins.get(&id).map(|a| a.clone()))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Admin>> {
        Ok(self
            .tables
            .admins
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value().clone()))
    }
}

// ── Hotels ──────────────────────────────────────────────────────

#[async_trait]
impl HotelRepository for MemoryRepository {
    async fn create(&self, admin_id: i32, draft: HotelDraft) -> DomainResult<Hotel> {
        if self.tables.hotels.iter().any(|h| h.admin_id == admin_id) {
            return Err(DomainError::Conflict(format!(
                "Hotel for admin {}",
                admin_id
            )));
        }
        let hotel = Hotel {
            id: self.tables.hotel_seq.next(),
            admin_id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            city: draft.city,
            country: draft.country,
            address: draft.address,
            created_at: Utc::now(),
        };
        self.tables.hotels.insert(hotel.id, hotel.clone());
        Ok(hotel)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Hotel>> {
        Ok(self.tables.hotels.get(&id).map(|h| h.clone()))
    }

    async fn find_by_admin(&self, admin_id: i32) -> DomainResult<Option<Hotel>> {
        Ok(self
            .tables
            .hotels
            .iter()
            .find(|h| h.admin_id == admin_id)
            .map(|h| h.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let mut hotels: Vec<Hotel> = self.tables.hotels.iter().map(|h| h.value().clone()).collect();
        hotels.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(hotels)
    }

    async fn update(&self, id: i32, draft: HotelDraft) -> DomainResult<Hotel> {
        let mut hotel = self
            .tables
            .hotels
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Hotel", id))?;
        hotel.name = draft.name;
        hotel.email = draft.email;
        hotel.phone = draft.phone;
        hotel.city = draft.city;
        hotel.country = draft.country;
        hotel.address = draft.address;
        Ok(hotel.clone())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.tables
            .hotels
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Hotel", id))?;
        self.tables.rooms.retain(|_, r| r.hotel_id != id);
        self.tables.amenities.retain(|_, a| a.hotel_id != id);
        self.tables.bookings.retain(|_, b| b.hotel_id != id);
        Ok(())
    }
}

// ── Rooms ───────────────────────────────────────────────────────

#[async_trait]
impl RoomRepository for MemoryRepository {
    async fn create(&self, hotel_id: i32, draft: RoomDraft) -> DomainResult<Room> {
        let room = Room {
            id: self.tables.room_seq.next(),
            hotel_id,
            room_type_id: draft.room_type_id,
            room_name: draft.room_name,
            price_per_night: draft.price_per_night,
            is_available: draft.is_available.unwrap_or(true),
        };
        self.tables.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        Ok(self.tables.rooms.get(&id).map(|r| r.clone()))
    }

    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .tables
            .rooms
            .iter()
            .filter(|r| r.hotel_id == hotel_id)
            .map(|r| r.value().clone())
            .collect();
        rooms.sort_by_key(|r| r.id);
        Ok(rooms)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = ids
            .iter()
            .filter_map(|id| self.tables.rooms.get(id).map(|r| r.clone()))
            .collect();
        rooms.sort_by_key(|r| r.id);
        rooms.dedup_by_key(|r| r.id);
        Ok(rooms)
    }

    async fn update(&self, id: i32, draft: RoomDraft) -> DomainResult<Room> {
        let mut room = self
            .tables
            .rooms
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Room", id))?;
        room.room_type_id = draft.room_type_id;
        room.room_name = draft.room_name;
        room.price_per_night = draft.price_per_night;
        if let Some(available) = draft.is_available {
            room.is_available = available;
        }
        Ok(room.clone())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.tables
            .rooms
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Room", id))
    }

    async fn set_availability(&self, ids: &[i32], available: bool) -> DomainResult<()> {
        for id in ids {
            if let Some(mut room) = self.tables.rooms.get_mut(id) {
                room.is_available = available;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RoomTypeRepository for MemoryRepository {
    async fn create(&self, type_name: &str, description: &str) -> DomainResult<RoomType> {
        if self.tables.room_types.iter().any(|t| t.type_name == type_name) {
            return Err(DomainError::Conflict(format!("Room type '{}'", type_name)));
        }
        let room_type = RoomType {
            id: self.tables.room_type_seq.next(),
            type_name: type_name.to_string(),
            description: description.to_string(),
        };
        self.tables.room_types.insert(room_type.id, room_type.clone());
        Ok(room_type)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RoomType>> {
        Ok(self.tables.room_types.get(&id).map(|t| t.clone()))
    }

    async fn find_by_name(&self, type_name: &str) -> DomainResult<Option<RoomType>> {
        Ok(self
            .tables
            .room_types
            .iter()
            .find(|t| t.type_name == type_name)
            .map(|t| t.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<RoomType>> {
        let mut types: Vec<RoomType> = self
            .tables
            .room_types
            .iter()
            .map(|t| t.value().clone())
            .collect();
        types.sort_by_key(|t| t.id);
        Ok(types)
    }
}

// ── Amenities ───────────────────────────────────────────────────

#[async_trait]
impl AmenityRepository for MemoryRepository {
    async fn create(&self, hotel_id: i32, name: &str, description: &str) -> DomainResult<Amenity> {
        let amenity = Amenity {
            id: self.tables.amenity_seq.next(),
            hotel_id,
            name: name.to_string(),
            description: description.to_string(),
        };
        self.tables.amenities.insert(amenity.id, amenity.clone());
        Ok(amenity)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Amenity>> {
        Ok(self.tables.amenities.get(&id).map(|a| a.clone()))
    }

    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Amenity>> {
        let mut amenities: Vec<Amenity> = self
            .tables
            .amenities
            .iter()
            .filter(|a| a.hotel_id == hotel_id)
            .map(|a| a.value().clone())
            .collect();
        amenities.sort_by_key(|a| a.id);
        Ok(amenities)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.tables
            .amenities
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Amenity", id))
    }
}

// ── Bookings ────────────────────────────────────────────────────

#[async_trait]
impl BookingRepository for MemoryRepository {
    async fn create(&self, new: NewBooking) -> DomainResult<Booking> {
        let now = Utc::now();
        let booking = Booking {
            id: self.tables.booking_seq.next(),
            guest_id: new.guest_id,
            hotel_id: new.hotel_id,
            dates: new.dates,
            guests: new.guests,
            status: BookingStatus::Pending,
            rooms: new.rooms,
            created_at: now,
            updated_at: now,
        };
        self.tables.bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        Ok(self.tables.bookings.get(&id).map(|b| b.clone()))
    }

    async fn find_by_guest(&self, guest_id: i32) -> DomainResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .tables
            .bookings
            .iter()
            .filter(|b| b.guest_id == guest_id)
            .map(|b| b.value().clone())
            .collect();
        newest_first(&mut bookings);
        Ok(bookings)
    }

    async fn find_by_hotel(
        &self,
        hotel_id: i32,
        status: Option<BookingStatus>,
    ) -> DomainResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .tables
            .bookings
            .iter()
            .filter(|b| b.hotel_id == hotel_id && status.map_or(true, |s| b.status == s))
            .map(|b| b.value().clone())
            .collect();
        newest_first(&mut bookings);
        Ok(bookings)
    }

    async fn update_dates(&self, id: i32, dates: DateRange) -> DomainResult<Booking> {
        let mut booking = self
            .tables
            .bookings
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Booking", id))?;
        booking.dates = dates;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn update_status(&self, id: i32, status: BookingStatus) -> DomainResult<Booking> {
        let mut booking = self
            .tables
            .bookings
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Booking", id))?;
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn references_room(&self, room_id: i32) -> DomainResult<bool> {
        Ok(self
            .tables
            .bookings
            .iter()
            .any(|b| b.rooms.iter().any(|r| r.room_id == room_id)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::BookedRoom;

    fn draft(name: &str) -> HotelDraft {
        HotelDraft {
            name: name.into(),
            email: "desk@hotel.test".into(),
            phone: "123".into(),
            city: "Oslo".into(),
            country: "Norway".into(),
            address: "Main St 1".into(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_per_table() {
        let repos = InMemoryRepositoryProvider::new();
        let a = repos.admins().create("a", "h").await.unwrap();
        let b = repos.admins().create("b", "h").await.unwrap();
        let g = repos.guests().create("g", "g@x.io", "h").await.unwrap();
        assert_eq!((a.id, b.id, g.id), (1, 2, 1));
    }

    #[tokio::test]
    async fn hotels_are_listed_by_name() {
        let repos = InMemoryRepositoryProvider::new();
        repos.hotels().create(1, draft("Zephyr")).await.unwrap();
        repos.hotels().create(2, draft("Alpine")).await.unwrap();
        let names: Vec<String> = repos
            .hotels()
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["Alpine", "Zephyr"]);
    }

    #[tokio::test]
    async fn hotel_delete_cascades() {
        let repos = InMemoryRepositoryProvider::new();
        let hotel = repos.hotels().create(1, draft("Fjord")).await.unwrap();
        let room = repos
            .rooms()
            .create(
                hotel.id,
                RoomDraft {
                    room_type_id: 1,
                    room_name: "101".into(),
                    price_per_night: Decimal::new(9900, 2),
                    is_available: Some(true),
                },
            )
            .await
            .unwrap();
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        let new = NewBooking::new(
            1,
            hotel.id,
            DateRange::new(d("2025-01-01"), d("2025-01-02")).unwrap(),
            1,
            vec![BookedRoom::new(room.id, 1)],
        )
        .unwrap();
        repos.bookings().create(new).await.unwrap();
        assert!(repos.bookings().references_room(room.id).await.unwrap());

        repos.hotels().delete(hotel.id).await.unwrap();
        assert!(repos.rooms().find_by_id(room.id).await.unwrap().is_none());
        assert!(!repos.bookings().references_room(room.id).await.unwrap());
        assert!(matches!(
            repos.hotels().delete(hotel.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
