//! Identity module — guest and admin accounts & authentication
//!
//! Contains the `IdentityService` which orchestrates signup, login and
//! profile lookup for both principal kinds.

pub mod service;

pub use service::{AuthResult, IdentityService, Profile};
