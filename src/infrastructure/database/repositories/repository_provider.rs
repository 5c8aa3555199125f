//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::account::{AdminRepository, GuestRepository};
use crate::domain::amenity::AmenityRepository;
use crate::domain::booking::BookingRepository;
use crate::domain::hotel::HotelRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::{RoomRepository, RoomTypeRepository};

use super::account_repository::{SeaOrmAdminRepository, SeaOrmGuestRepository};
use super::amenity_repository::SeaOrmAmenityRepository;
use super::booking_repository::SeaOrmBookingRepository;
use super::hotel_repository::SeaOrmHotelRepository;
use super::room_repository::{SeaOrmRoomRepository, SeaOrmRoomTypeRepository};

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let hotel = repos.hotels().find_by_id(1).await?;
/// let bookings = repos.bookings().find_by_guest(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    guests: SeaOrmGuestRepository,
    admins: SeaOrmAdminRepository,
    hotels: SeaOrmHotelRepository,
    rooms: SeaOrmRoomRepository,
    room_types: SeaOrmRoomTypeRepository,
    amenities: SeaOrmAmenityRepository,
    bookings: SeaOrmBookingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            guests: SeaOrmGuestRepository::new(db.clone()),
            admins: SeaOrmAdminRepository::new(db.clone()),
            hotels: SeaOrmHotelRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            room_types: SeaOrmRoomTypeRepository::new(db.clone()),
            amenities: SeaOrmAmenityRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn guests(&self) -> &dyn GuestRepository {
        &self.guests
    }

    fn admins(&self) -> &dyn AdminRepository {
        &self.admins
    }

    fn hotels(&self) -> &dyn HotelRepository {
        &self.hotels
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn room_types(&self) -> &dyn RoomTypeRepository {
        &self.room_types
    }

    fn amenities(&self) -> &dyn AmenityRepository {
        &self.amenities
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }
}
