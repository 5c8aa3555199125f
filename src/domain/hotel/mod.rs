//! Hotel aggregate

pub mod model;
pub mod repository;

pub use model::{Hotel, HotelDraft};
pub use repository::HotelRepository;
