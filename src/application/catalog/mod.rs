//! Catalog module — hotels, rooms, room types and amenities

pub mod service;

pub use service::{CatalogService, HotelDetails, RoomListing};
