//! Application layer — use cases orchestrating the domain
//!
//! Services take an explicit `SessionContext` for every call that depends
//! on who is asking.

pub mod catalog;
pub mod identity;
pub mod reservations;
pub mod session;

pub use catalog::{CatalogService, HotelDetails, RoomListing};
pub use identity::{AuthResult, IdentityService, Profile};
pub use reservations::{
    BookedRoomView, BookingRequest, BookingView, ReservationService, ReservationView,
};
pub use session::SessionContext;
