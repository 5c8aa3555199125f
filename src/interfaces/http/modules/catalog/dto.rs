//! Catalog DTOs: hotels, rooms, room types, amenities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{HotelDetails, RoomListing};
use crate::domain::{Amenity, Hotel, HotelDraft, Room, RoomDraft, RoomType};

/// Hotel list query: search text plus pagination
#[derive(Debug, Deserialize, IntoParams)]
pub struct HotelQuery {
    /// Case-insensitive match on name, city or country
    pub search: Option<String>,
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Items per page (1-100, default 20)
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RoomQuery {
    /// Only rooms not held by a booking
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct HotelRequest {
    #[validate(length(min = 1, max = 25, message = "name must be 1-25 characters"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 17, message = "phone must be 1-17 characters"))]
    pub phone: String,
    #[validate(length(min = 1, max = 100, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, max = 100, message = "country is required"))]
    pub country: String,
    #[validate(length(min = 1, max = 200, message = "address is required"))]
    pub address: String,
}

impl From<HotelRequest> for HotelDraft {
    fn from(r: HotelRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            phone: r.phone,
            city: r.city,
            country: r.country,
            address: r.address,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HotelDto {
    pub id: i32,
    pub admin_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl From<Hotel> for HotelDto {
    fn from(h: Hotel) -> Self {
        Self {
            id: h.id,
            admin_id: h.admin_id,
            name: h.name,
            email: h.email,
            phone: h.phone,
            city: h.city,
            country: h.country,
            address: h.address,
            created_at: h.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HotelDetailsDto {
    #[serde(flatten)]
    pub hotel: HotelDto,
    pub rooms: Vec<RoomDto>,
    pub amenities: Vec<AmenityDto>,
}

impl From<HotelDetails> for HotelDetailsDto {
    fn from(d: HotelDetails) -> Self {
        Self {
            hotel: d.hotel.into(),
            rooms: d.rooms.into_iter().map(RoomDto::from).collect(),
            amenities: d.amenities.into_iter().map(AmenityDto::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoomRequest {
    pub room_type_id: i32,
    #[validate(length(min = 1, max = 50, message = "room_name must be 1-50 characters"))]
    pub room_name: String,
    /// Nightly price, e.g. "120.50"
    #[schema(value_type = String, example = "120.50")]
    pub price_per_night: Decimal,
    /// Defaults to `true` on create; omitted on update keeps the current value
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl From<RoomRequest> for RoomDraft {
    fn from(r: RoomRequest) -> Self {
        Self {
            room_type_id: r.room_type_id,
            room_name: r.room_name,
            price_per_night: r.price_per_night,
            is_available: r.is_available,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub hotel_id: i32,
    pub room_type_id: i32,
    /// Empty when the listing was built without type names
    pub room_type: String,
    pub room_name: String,
    #[schema(value_type = String, example = "120.50")]
    pub price_per_night: Decimal,
    pub is_available: bool,
}

impl RoomDto {
    fn new(room: Room, room_type: String) -> Self {
        Self {
            id: room.id,
            hotel_id: room.hotel_id,
            room_type_id: room.room_type_id,
            room_type,
            room_name: room.room_name,
            price_per_night: room.price_per_night,
            is_available: room.is_available,
        }
    }
}

impl From<RoomListing> for RoomDto {
    fn from(l: RoomListing) -> Self {
        Self::new(l.room, l.type_name)
    }
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self::new(room, String::new())
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AmenityRequest {
    #[validate(length(min = 1, max = 25, message = "name must be 1-25 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "description must be 1-200 characters"))]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AmenityDto {
    pub id: i32,
    pub hotel_id: i32,
    pub name: String,
    pub description: String,
}

impl From<Amenity> for AmenityDto {
    fn from(a: Amenity) -> Self {
        Self {
            id: a.id,
            hotel_id: a.hotel_id,
            name: a.name,
            description: a.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoomTypeRequest {
    #[validate(length(min = 1, max = 50, message = "type_name must be 1-50 characters"))]
    pub type_name: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "description must be at most 200 characters"))]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomTypeDto {
    pub id: i32,
    pub type_name: String,
    pub description: String,
}

impl From<RoomType> for RoomTypeDto {
    fn from(t: RoomType) -> Self {
        Self {
            id: t.id,
            type_name: t.type_name,
            description: t.description,
        }
    }
}
