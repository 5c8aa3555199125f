//! SeaORM implementation of HotelRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use crate::domain::hotel::HotelRepository;
use crate::domain::{DomainError, DomainResult, Hotel, HotelDraft};
use crate::infrastructure::database::entities::{amenity, booked_room, booking, hotel, room};

use super::db_err;

pub struct SeaOrmHotelRepository {
    db: DatabaseConnection,
}

impl SeaOrmHotelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: hotel::Model) -> Hotel {
    Hotel {
        id: m.id,
        admin_id: m.admin_id,
        name: m.name,
        email: m.email,
        phone: m.phone,
        city: m.city,
        country: m.country,
        address: m.address,
        created_at: m.created_at,
    }
}

#[async_trait]
impl HotelRepository for SeaOrmHotelRepository {
    async fn create(&self, admin_id: i32, draft: HotelDraft) -> DomainResult<Hotel> {
        debug!("Creating hotel '{}' for admin {}", draft.name, admin_id);

        let model = hotel::ActiveModel {
            admin_id: Set(admin_id),
            name: Set(draft.name),
            email: Set(draft.email),
            phone: Set(draft.phone),
            city: Set(draft.city),
            country: Set(draft.country),
            address: Set(draft.address),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Hotel>> {
        let model = hotel::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_admin(&self, admin_id: i32) -> DomainResult<Option<Hotel>> {
        let model = hotel::Entity::find()
            .filter(hotel::Column::AdminId.eq(admin_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Hotel>> {
        let models = hotel::Entity::find()
            .order_by_asc(hotel::Column::Name)
            .order_by_asc(hotel::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, draft: HotelDraft) -> DomainResult<Hotel> {
        debug!("Updating hotel: {}", id);

        let existing = hotel::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Hotel", id))?;

        let mut model: hotel::ActiveModel = existing.into();
        model.name = Set(draft.name);
        model.email = Set(draft.email);
        model.phone = Set(draft.phone);
        model.city = Set(draft.city);
        model.country = Set(draft.country);
        model.address = Set(draft.address);
        let saved = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting hotel: {}", id);

        let txn = self.db.begin().await.map_err(db_err)?;

        let booking_ids: Vec<i32> = booking::Entity::find()
            .select_only()
            .column(booking::Column::Id)
            .filter(booking::Column::HotelId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(db_err)?;

        if !booking_ids.is_empty() {
            booked_room::Entity::delete_many()
                .filter(booked_room::Column::BookingId.is_in(booking_ids))
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }
        booking::Entity::delete_many()
            .filter(booking::Column::HotelId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        amenity::Entity::delete_many()
            .filter(amenity::Column::HotelId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        room::Entity::delete_many()
            .filter(room::Column::HotelId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let result = hotel::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Hotel", id));
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
