//! Catalog module: hotels, rooms, amenities and room types

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
