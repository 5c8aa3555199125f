//! Reservations module: admin view of the hotel's bookings

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
