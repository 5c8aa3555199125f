//! Account repository interfaces

use async_trait::async_trait;

use super::model::{Admin, Guest};
use crate::domain::DomainResult;

#[async_trait]
pub trait GuestRepository: Send + Sync {
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> DomainResult<Guest>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Guest>>;

    /// Lookup is case-insensitive
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Guest>>;
}

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, name: &str, password_hash: &str) -> DomainResult<Admin>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Admin>>;

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Admin>>;
}
