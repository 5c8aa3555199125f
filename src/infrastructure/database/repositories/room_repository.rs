//! SeaORM implementations of RoomRepository and RoomTypeRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::room::{
    price_from_minor_units, price_to_minor_units, RoomRepository, RoomTypeRepository,
};
use crate::domain::{DomainError, DomainResult, Room, RoomDraft, RoomType};
use crate::infrastructure::database::entities::{room, room_type};

use super::db_err;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn room_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        hotel_id: m.hotel_id,
        room_type_id: m.room_type_id,
        room_name: m.room_name,
        price_per_night: price_from_minor_units(m.price_per_night),
        is_available: m.is_available,
    }
}

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn create(&self, hotel_id: i32, draft: RoomDraft) -> DomainResult<Room> {
        debug!("Creating room '{}' in hotel {}", draft.room_name, hotel_id);

        let model = room::ActiveModel {
            hotel_id: Set(hotel_id),
            room_type_id: Set(draft.room_type_id),
            room_name: Set(draft.room_name),
            price_per_night: Set(price_to_minor_units(draft.price_per_night)?),
            is_available: Set(draft.is_available.unwrap_or(true)),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(room_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(room_to_domain))
    }

    async fn find_by_hotel(&self, hotel_id: i32) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .filter(room::Column::HotelId.eq(hotel_id))
            .order_by_asc(room::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(room_to_domain).collect())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Room>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = room::Entity::find()
            .filter(room::Column::Id.is_in(ids.to_vec()))
            .order_by_asc(room::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(room_to_domain).collect())
    }

    async fn update(&self, id: i32, draft: RoomDraft) -> DomainResult<Room> {
        debug!("Updating room: {}", id);

        let existing = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Room", id))?;

        let mut model: room::ActiveModel = existing.into();
        model.room_type_id = Set(draft.room_type_id);
        model.room_name = Set(draft.room_name);
        model.price_per_night = Set(price_to_minor_units(draft.price_per_night)?);
        if let Some(available) = draft.is_available {
            model.is_available = Set(available);
        }
        let saved = model.update(&self.db).await.map_err(db_err)?;
        Ok(room_to_domain(saved))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting room: {}", id);

        let result = room::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Room", id));
        }
        Ok(())
    }

    async fn set_availability(&self, ids: &[i32], available: bool) -> DomainResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        debug!("Setting availability={} on rooms {:?}", available, ids);

        room::Entity::update_many()
            .col_expr(room::Column::IsAvailable, Expr::value(available))
            .filter(room::Column::Id.is_in(ids.to_vec()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

pub struct SeaOrmRoomTypeRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomTypeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn room_type_to_domain(m: room_type::Model) -> RoomType {
    RoomType {
        id: m.id,
        type_name: m.type_name,
        description: m.description,
    }
}

#[async_trait]
impl RoomTypeRepository for SeaOrmRoomTypeRepository {
    async fn create(&self, type_name: &str, description: &str) -> DomainResult<RoomType> {
        debug!("Creating room type: {}", type_name);

        let model = room_type::ActiveModel {
            type_name: Set(type_name.to_string()),
            description: Set(description.to_string()),
            ..Default::default()
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        Ok(room_type_to_domain(saved))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RoomType>> {
        let model = room_type::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(room_type_to_domain))
    }

    async fn find_by_name(&self, type_name: &str) -> DomainResult<Option<RoomType>> {
        let model = room_type::Entity::find()
            .filter(room_type::Column::TypeName.eq(type_name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(room_type_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<RoomType>> {
        let models = room_type::Entity::find()
            .order_by_asc(room_type::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(room_type_to_domain).collect())
    }
}
