//! Domain layer: entities, invariants and repository interfaces

pub mod account;
pub mod amenity;
pub mod booking;
pub mod hotel;
pub mod repositories;
pub mod room;

pub use account::{Admin, Guest, Role};
pub use amenity::Amenity;
pub use booking::{BookedRoom, Booking, BookingPolicy, BookingStatus, DateRange, NewBooking};
pub use hotel::{Hotel, HotelDraft};
pub use repositories::{DomainResult, RepositoryProvider};
pub use room::{Room, RoomDraft, RoomType};

pub use crate::shared::errors::DomainError;
