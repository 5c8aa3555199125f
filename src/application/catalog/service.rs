//! Catalog service
//!
//! Public listings are open to everyone. Every hotel-scoped write requires
//! the session's admin to own the hotel.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::application::session::SessionContext;
use crate::domain::{
    Amenity, DomainError, DomainResult, Hotel, HotelDraft, RepositoryProvider, Room, RoomDraft,
    RoomType,
};
use crate::shared::{PaginatedResult, PaginationParams};

/// A room together with its type name
#[derive(Debug, Clone)]
pub struct RoomListing {
    pub room: Room,
    pub type_name: String,
}

/// Hotel with everything a guest needs to pick rooms
#[derive(Debug, Clone)]
pub struct HotelDetails {
    pub hotel: Hotel,
    pub rooms: Vec<RoomListing>,
    pub amenities: Vec<Amenity>,
}

pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Public queries ──────────────────────────────────────────

    /// Hotels whose name, city or country contains `search`, paginated.
    pub async fn list_hotels(
        &self,
        search: Option<&str>,
        params: PaginationParams,
    ) -> DomainResult<PaginatedResult<Hotel>> {
        let query = search.unwrap_or_default();
        let matching: Vec<Hotel> = self
            .repos
            .hotels()
            .find_all()
            .await?
            .into_iter()
            .filter(|h| h.matches(query))
            .collect();
        Ok(PaginatedResult::from_vec(matching, params))
    }

    pub async fn get_hotel(&self, hotel_id: i32) -> DomainResult<Hotel> {
        self.repos
            .hotels()
            .find_by_id(hotel_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Hotel", hotel_id))
    }

    pub async fn get_hotel_details(&self, hotel_id: i32) -> DomainResult<HotelDetails> {
        let hotel = self.get_hotel(hotel_id).await?;
        let rooms = self.room_listings(hotel_id, false).await?;
        let amenities = self.repos.amenities().find_by_hotel(hotel_id).await?;
        Ok(HotelDetails {
            hotel,
            rooms,
            amenities,
        })
    }

    /// Rooms of a hotel; `only_available` hides rooms held by bookings.
    pub async fn list_rooms(&self, hotel_id: i32, only_available: bool) -> DomainResult<Vec<RoomListing>> {
        self.get_hotel(hotel_id).await?;
        self.room_listings(hotel_id, only_available).await
    }

    pub async fn list_amenities(&self, hotel_id: i32) -> DomainResult<Vec<Amenity>> {
        self.get_hotel(hotel_id).await?;
        self.repos.amenities().find_by_hotel(hotel_id).await
    }

    pub async fn list_room_types(&self) -> DomainResult<Vec<RoomType>> {
        self.repos.room_types().find_all().await
    }

    // ── Hotels ──────────────────────────────────────────────────

    /// Create the admin's hotel. An admin owns at most one hotel.
    pub async fn create_hotel(&self, session: &SessionContext, draft: HotelDraft) -> DomainResult<Hotel> {
        let admin_id = session.require_admin()?;
        draft.validate()?;

        if self.repos.hotels().find_by_admin(admin_id).await?.is_some() {
            return Err(DomainError::Conflict("Admin already owns a hotel".into()));
        }

        let hotel = self.repos.hotels().create(admin_id, draft).await?;
        info!(hotel_id = hotel.id, admin_id, name = %hotel.name, "Hotel created");
        Ok(hotel)
    }

    pub async fn update_hotel(
        &self,
        session: &SessionContext,
        hotel_id: i32,
        draft: HotelDraft,
    ) -> DomainResult<Hotel> {
        self.owned_hotel(session, hotel_id).await?;
        draft.validate()?;
        let hotel = self.repos.hotels().update(hotel_id, draft).await?;
        info!(hotel_id, "Hotel updated");
        Ok(hotel)
    }

    /// Delete a hotel with its rooms, amenities and bookings.
    pub async fn delete_hotel(&self, session: &SessionContext, hotel_id: i32) -> DomainResult<()> {
        self.owned_hotel(session, hotel_id).await?;
        self.repos.hotels().delete(hotel_id).await?;
        info!(hotel_id, "Hotel deleted");
        Ok(())
    }

    // ── Rooms ───────────────────────────────────────────────────

    pub async fn create_room(
        &self,
        session: &SessionContext,
        hotel_id: i32,
        draft: RoomDraft,
    ) -> DomainResult<Room> {
        self.owned_hotel(session, hotel_id).await?;
        draft.validate()?;
        self.require_room_type(draft.room_type_id).await?;

        let room = self.repos.rooms().create(hotel_id, draft).await?;
        info!(room_id = room.id, hotel_id, "Room created");
        Ok(room)
    }

    pub async fn update_room(
        &self,
        session: &SessionContext,
        room_id: i32,
        draft: RoomDraft,
    ) -> DomainResult<Room> {
        let room = self.find_room(room_id).await?;
        self.owned_hotel(session, room.hotel_id).await?;
        draft.validate()?;
        self.require_room_type(draft.room_type_id).await?;

        if draft.is_available == Some(true) && self.is_held(&room).await? {
            return Err(DomainError::Conflict(format!(
                "Room {} is held by an active booking",
                room_id
            )));
        }

        let room = self.repos.rooms().update(room_id, draft).await?;
        info!(room_id, "Room updated");
        Ok(room)
    }

    /// Delete a room. Rooms that appear on any booking are kept.
    pub async fn delete_room(&self, session: &SessionContext, room_id: i32) -> DomainResult<()> {
        let room = self.find_room(room_id).await?;
        self.owned_hotel(session, room.hotel_id).await?;

        if self.repos.bookings().references_room(room_id).await? {
            return Err(DomainError::Conflict(format!(
                "Room {} is referenced by bookings",
                room_id
            )));
        }

        self.repos.rooms().delete(room_id).await?;
        info!(room_id, "Room deleted");
        Ok(())
    }

    // ── Amenities ───────────────────────────────────────────────

    pub async fn create_amenity(
        &self,
        session: &SessionContext,
        hotel_id: i32,
        name: &str,
        description: &str,
    ) -> DomainResult<Amenity> {
        self.owned_hotel(session, hotel_id).await?;
        let (name, description) = (name.trim(), description.trim());
        Amenity::validate_fields(name, description)?;

        let amenity = self.repos.amenities().create(hotel_id, name, description).await?;
        info!(amenity_id = amenity.id, hotel_id, "Amenity created");
        Ok(amenity)
    }

    pub async fn delete_amenity(&self, session: &SessionContext, amenity_id: i32) -> DomainResult<()> {
        let amenity = self
            .repos
            .amenities()
            .find_by_id(amenity_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Amenity", amenity_id))?;
        self.owned_hotel(session, amenity.hotel_id).await?;

        self.repos.amenities().delete(amenity_id).await?;
        info!(amenity_id, "Amenity deleted");
        Ok(())
    }

    // ── Room types ──────────────────────────────────────────────

    pub async fn create_room_type(
        &self,
        session: &SessionContext,
        type_name: &str,
        description: &str,
    ) -> DomainResult<RoomType> {
        session.require_admin()?;
        let type_name = type_name.trim();
        if type_name.is_empty() {
            return Err(DomainError::Validation("Room type name is required".into()));
        }
        if self.repos.room_types().find_by_name(type_name).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Room type '{}' already exists",
                type_name
            )));
        }

        let room_type = self
            .repos
            .room_types()
            .create(type_name, description.trim())
            .await?;
        info!(room_type_id = room_type.id, "Room type created");
        Ok(room_type)
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// The hotel, provided the session's admin owns it
    async fn owned_hotel(&self, session: &SessionContext, hotel_id: i32) -> DomainResult<Hotel> {
        let admin_id = session.require_admin()?;
        let hotel = self.get_hotel(hotel_id).await?;
        if hotel.admin_id != admin_id {
            return Err(DomainError::Forbidden(format!(
                "Hotel {} is managed by another admin",
                hotel_id
            )));
        }
        Ok(hotel)
    }

    async fn find_room(&self, room_id: i32) -> DomainResult<Room> {
        self.repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Room", room_id))
    }

    /// Whether a Pending or Confirmed booking has a line for this room
    async fn is_held(&self, room: &Room) -> DomainResult<bool> {
        Ok(self
            .repos
            .bookings()
            .find_by_hotel(room.hotel_id, None)
            .await?
            .iter()
            .any(|b| b.status.holds_rooms() && b.rooms.iter().any(|l| l.room_id == room.id)))
    }

    async fn require_room_type(&self, room_type_id: i32) -> DomainResult<RoomType> {
        self.repos
            .room_types()
            .find_by_id(room_type_id)
            .await?
            .ok_or_else(|| {
                DomainError::Validation(format!("Room type {} does not exist", room_type_id))
            })
    }

    async fn room_listings(&self, hotel_id: i32, only_available: bool) -> DomainResult<Vec<RoomListing>> {
        let type_names: HashMap<i32, String> = self
            .repos
            .room_types()
            .find_all()
            .await?
            .into_iter()
            .map(|t| (t.id, t.type_name))
            .collect();

        Ok(self
            .repos
            .rooms()
            .find_by_hotel(hotel_id)
            .await?
            .into_iter()
            .filter(|r| !only_available || r.is_available)
            .map(|room| RoomListing {
                type_name: type_names.get(&room.room_type_id).cloned().unwrap_or_default(),
                room,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::infrastructure::database::seed_room_types;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn draft(name: &str, city: &str, country: &str) -> HotelDraft {
        HotelDraft {
            name: name.into(),
            email: "front@desk.test".into(),
            phone: "+47 1234".into(),
            city: city.into(),
            country: country.into(),
            address: "Street 1".into(),
        }
    }

    fn room(name: &str, room_type_id: i32) -> RoomDraft {
        RoomDraft {
            room_type_id,
            room_name: name.into(),
            price_per_night: Decimal::new(15000, 2),
            is_available: Some(true),
        }
    }

    async fn setup() -> (CatalogService, Arc<InMemoryRepositoryProvider>) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        seed_room_types(repos.as_ref()).await.unwrap();
        (CatalogService::new(repos.clone()), repos)
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_paginated() {
        let (svc, _) = setup().await;
        for (i, (name, city, country)) in [
            ("Grand Plaza", "Paris", "France"),
            ("Riverside", "Lyon", "France"),
            ("Alpine Lodge", "Zermatt", "Switzerland"),
        ]
        .into_iter()
        .enumerate()
        {
            let admin = SessionContext::admin(i as i32 + 1, "a");
            svc.create_hotel(&admin, draft(name, city, country)).await.unwrap();
        }

        let page = PaginationParams { page: 1, limit: 10 };
        let france = svc.list_hotels(Some("fRaNcE"), page).await.unwrap();
        assert_eq!(france.total, 2);

        let by_city = svc.list_hotels(Some("zerm"), page).await.unwrap();
        assert_eq!(by_city.items[0].name, "Alpine Lodge");

        let first = svc
            .list_hotels(None, PaginationParams { page: 2, limit: 2 })
            .await
            .unwrap();
        assert_eq!(first.total, 3);
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.total_pages, 2);
    }

    #[tokio::test]
    async fn admin_may_own_only_one_hotel() {
        let (svc, _) = setup().await;
        let admin = SessionContext::admin(1, "boss");
        svc.create_hotel(&admin, draft("One", "Rome", "Italy")).await.unwrap();
        assert!(matches!(
            svc.create_hotel(&admin, draft("Two", "Rome", "Italy")).await,
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn guests_cannot_write_catalog() {
        let (svc, _) = setup().await;
        let guest = SessionContext::guest(1, "ana");
        assert!(matches!(
            svc.create_hotel(&guest, draft("One", "Rome", "Italy")).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            svc.create_room_type(&guest, "Loft", "").await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn writes_require_hotel_ownership() {
        let (svc, _) = setup().await;
        let owner = SessionContext::admin(1, "owner");
        let other = SessionContext::admin(2, "other");
        let hotel = svc.create_hotel(&owner, draft("Mine", "Oslo", "Norway")).await.unwrap();

        assert!(matches!(
            svc.create_room(&other, hotel.id, room("101", 1)).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            svc.update_hotel(&other, hotel.id, draft("Stolen", "Oslo", "Norway")).await,
            Err(DomainError::Forbidden(_))
        ));

        let created = svc.create_room(&owner, hotel.id, room("101", 1)).await.unwrap();
        assert!(matches!(
            svc.delete_room(&other, created.id).await,
            Err(DomainError::Forbidden(_))
        ));
        svc.delete_room(&owner, created.id).await.unwrap();
    }

    #[tokio::test]
    async fn room_type_must_exist() {
        let (svc, _) = setup().await;
        let owner = SessionContext::admin(1, "owner");
        let hotel = svc.create_hotel(&owner, draft("Mine", "Oslo", "Norway")).await.unwrap();
        assert!(matches!(
            svc.create_room(&owner, hotel.id, room("101", 999)).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn details_include_rooms_with_type_names_and_amenities() {
        let (svc, repos) = setup().await;
        let owner = SessionContext::admin(1, "owner");
        let hotel = svc.create_hotel(&owner, draft("Mine", "Oslo", "Norway")).await.unwrap();
        let suite = repos.room_types().find_by_name("Suite").await.unwrap().unwrap();

        let held = svc.create_room(&owner, hotel.id, room("Penthouse", suite.id)).await.unwrap();
        svc.create_room(&owner, hotel.id, room("101", 1)).await.unwrap();
        repos.rooms().set_availability(&[held.id], false).await.unwrap();
        svc.create_amenity(&owner, hotel.id, "Sauna", "Finnish sauna").await.unwrap();

        let details = svc.get_hotel_details(hotel.id).await.unwrap();
        assert_eq!(details.rooms.len(), 2);
        assert_eq!(details.rooms[0].type_name, "Suite");
        assert_eq!(details.amenities[0].name, "Sauna");

        let available = svc.list_rooms(hotel.id, true).await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].room.room_name, "101");
    }

    #[tokio::test]
    async fn amenity_limits_are_enforced() {
        let (svc, _) = setup().await;
        let owner = SessionContext::admin(1, "owner");
        let hotel = svc.create_hotel(&owner, draft("Mine", "Oslo", "Norway")).await.unwrap();
        let long_name = "x".repeat(26);
        assert!(matches!(
            svc.create_amenity(&owner, hotel.id, &long_name, "desc").await,
            Err(DomainError::Validation(_))
        ));

        let amenity = svc.create_amenity(&owner, hotel.id, "Gym", "24h gym").await.unwrap();
        svc.delete_amenity(&owner, amenity.id).await.unwrap();
        assert!(svc.list_amenities(hotel.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn room_types_are_unique() {
        let (svc, _) = setup().await;
        let admin = SessionContext::admin(1, "owner");
        assert_eq!(svc.list_room_types().await.unwrap().len(), 5);
        assert!(matches!(
            svc.create_room_type(&admin, "Suite", "dup").await,
            Err(DomainError::Conflict(_))
        ));
        svc.create_room_type(&admin, "Loft", "Open plan").await.unwrap();
        assert_eq!(svc.list_room_types().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn missing_hotel_is_not_found() {
        let (svc, _) = setup().await;
        assert!(matches!(
            svc.list_rooms(42, false).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
