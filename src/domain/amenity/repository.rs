//! Amenity repository interface

use async_trait::async_trait;

use super::model::Amenity;
use crate::domain::DomainResult;

#[async_trait]
pub trait AmenityRepository: Send + Sync {
    async fn create(&self, hotel_id: i32, name: &str, description: &str) -> DomainResult<Amenity>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Amenity>>;

    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Amenity>>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
