//! Room aggregate
//!
//! Rooms belong to a hotel and reference a room type (reference data).

pub mod model;
pub mod repository;

pub use model::{price_from_minor_units, price_to_minor_units, Room, RoomDraft, RoomType};
pub use repository::{RoomRepository, RoomTypeRepository};
