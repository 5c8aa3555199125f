//! Repository provider for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories; `DomainResult` is the standard result type.

use super::account::{AdminRepository, GuestRepository};
use super::amenity::AmenityRepository;
use super::booking::BookingRepository;
use super::hotel::HotelRepository;
use super::room::{RoomRepository, RoomTypeRepository};
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let hotel = repos.hotels().find_by_id(1).await?;
///     let rooms = repos.rooms().find_by_hotel(1).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn guests(&self) -> &dyn GuestRepository;
    fn admins(&self) -> &dyn AdminRepository;
    fn hotels(&self) -> &dyn HotelRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn room_types(&self) -> &dyn RoomTypeRepository;
    fn amenities(&self) -> &dyn AmenityRepository;
    fn bookings(&self) -> &dyn BookingRepository;
}
