//! Room and room type repository interfaces

use async_trait::async_trait;

use super::model::{Room, RoomDraft, RoomType};
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, hotel_id: i32, draft: RoomDraft) -> DomainResult<Room>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// Rooms of a hotel ordered by ID
    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Room>>;

    /// Rooms with the given IDs; unknown IDs are skipped
    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Room>>;

    async fn update(&self, id: i32, draft: RoomDraft) -> DomainResult<Room>;

    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Set `is_available` on every listed room
    async fn set_availability(&self, ids: &[i32], available: bool) -> DomainResult<()>;
}

#[async_trait]
pub trait RoomTypeRepository: Send + Sync {
    async fn create(&self, type_name: &str, description: &str) -> DomainResult<RoomType>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RoomType>>;

    async fn find_by_name(&self, type_name: &str) -> DomainResult<Option<RoomType>>;

    async fn find_all(&self) -> DomainResult<Vec<RoomType>>;
}
