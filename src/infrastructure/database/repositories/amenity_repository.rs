//! SeaORM implementation of AmenityRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::amenity::AmenityRepository;
use crate::domain::{Amenity, DomainError, DomainResult};
use crate::infrastructure::database::entities::amenity;

use super::db_err;

pub struct SeaOrmAmenityRepository {
    db: DatabaseConnection,
}

impl SeaOrmAmenityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: amenity::Model) -> Amenity {
    Amenity {
        id: m.id,
        hotel_id: m.hotel_id,
        name: m.name,
        description: m.description,
    }
}

#[async_trait]
impl AmenityRepository for SeaOrmAmenityRepository {
    async fn create(&self, hotel_id: i32, name: &str, description: &str) -> DomainResult<Amenity> {
        debug!("Creating amenity '{}' for hotel {}", name, hotel_id);

        let model = amenity::ActiveModel {
            hotel_id: Set(hotel_id),
            name: Set(name.to_string()),
            description: Set(description.to_string()),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Amenity>> {
        let model = amenity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Amenity>> {
        let models = amenity::Entity::find()
            .filter(amenity::Column::HotelId.eq(hotel_id))
            .order_by_asc(amenity::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting amenity: {}", id);

        let result = amenity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Amenity", id));
        }
        Ok(())
    }
}
