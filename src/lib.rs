//! # Hotel Booking Service
//!
//! Hotel search, room booking and reservation management over a REST API.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: entities, invariants and repository traits
//! - **application**: use cases (identity, catalog, reservations) driven by an explicit session
//! - **infrastructure**: SeaORM persistence, in-memory storage, password hashing and JWT
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: process lifecycle (storage setup, HTTP serving, graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use interfaces::{create_api_router, ApiState};
