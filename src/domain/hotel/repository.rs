//! Hotel repository interface

use async_trait::async_trait;

use super::model::{Hotel, HotelDraft};
use crate::domain::DomainResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create(&self, admin_id: i32, draft: HotelDraft) -> DomainResult<Hotel>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Hotel>>;

    /// The hotel owned by an admin, if any
    async fn find_by_admin(&self, admin_id: i32) -> DomainResult<Option<Hotel>>;

    /// All hotels ordered by name
    async fn find_all(&self) -> DomainResult<Vec<Hotel>>;

    async fn update(&self, id: i32, draft: HotelDraft) -> DomainResult<Hotel>;

    /// Delete a hotel together with its rooms, amenities and bookings
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
