//! Reservation workflow and the guest's booking view

pub mod service;
pub mod view;

pub use service::{BookingRequest, ReservationService};
pub use view::{BookedRoomView, BookingView, ReservationView};
