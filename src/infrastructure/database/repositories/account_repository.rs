//! SeaORM implementations of GuestRepository and AdminRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::account::{AdminRepository, GuestRepository};
use crate::domain::{Admin, DomainResult, Guest};
use crate::infrastructure::database::entities::{admin, guest};

use super::db_err;

pub struct SeaOrmGuestRepository {
    db: DatabaseConnection,
}

impl SeaOrmGuestRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn guest_to_domain(m: guest::Model) -> Guest {
    Guest {
        id: m.id,
        name: m.name,
        email: m.email,
        password_hash: m.password_hash,
        created_at: m.created_at,
    }
}

#[async_trait]
impl GuestRepository for SeaOrmGuestRepository {
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> DomainResult<Guest> {
        debug!("Creating guest: {}", email);

        let model = guest::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.trim().to_lowercase()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(guest_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Guest>> {
        let model = guest::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(guest_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Guest>> {
        let model = guest::Entity::find()
            .filter(guest::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(guest_to_domain))
    }
}

pub struct SeaOrmAdminRepository {
    db: DatabaseConnection,
}

impl SeaOrmAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn admin_to_domain(m: admin::Model) -> Admin {
    Admin {
        id: m.id,
        name: m.name,
        password_hash: m.password_hash,
        created_at: m.created_at,
    }
}

#[async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn create(&self, name: &str, password_hash: &str) -> DomainResult<Admin> {
        debug!("Creating admin: {}", name);

        let model = admin::ActiveModel {
            name: Set(name.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(admin_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Admin>> {
        let model = admin::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(admin_to_domain))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Admin>> {
        let model = admin::Entity::find()
            .filter(admin::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(admin_to_domain))
    }
}
