//! Authentication module — guest/admin signup and login, current profile

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
