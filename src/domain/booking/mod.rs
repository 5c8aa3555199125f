//! Booking aggregate
//!
//! Contains the Booking entity, the date-range and room-selection rules,
//! the advance-booking policy and the repository interface.

pub mod model;
pub mod policy;
pub mod repository;

pub use model::{BookedRoom, Booking, BookingStatus, DateRange, NewBooking};
pub use policy::BookingPolicy;
pub use repository::BookingRepository;
