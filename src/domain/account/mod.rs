//! Guest and admin accounts

pub mod model;
pub mod repository;

pub use model::{Admin, Guest, Role};
pub use repository::{AdminRepository, GuestRepository};
