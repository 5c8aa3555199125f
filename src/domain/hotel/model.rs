//! Hotel domain entity

use chrono::{DateTime, Utc};

use crate::domain::{DomainError, DomainResult};

/// Hotel listing, owned by exactly one admin
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: i32,
    pub admin_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Hotel {
    /// Case-insensitive substring match over name, city and country.
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&self.name, &self.city, &self.country]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Editable hotel fields, used for both create and update
#[derive(Debug, Clone)]
pub struct HotelDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub country: String,
    pub address: String,
}

impl HotelDraft {
    pub fn validate(&self) -> DomainResult<()> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 || name_len > 25 {
            return Err(DomainError::Validation(
                "Hotel name must be 1-25 characters".into(),
            ));
        }
        if !self.email.contains('@') {
            return Err(DomainError::Validation("Invalid email".into()));
        }
        let phone_len = self.phone.trim().chars().count();
        if phone_len == 0 || phone_len > 17 {
            return Err(DomainError::Validation(
                "Phone must be 1-17 characters".into(),
            ));
        }
        for (field, value) in [
            ("city", &self.city),
            ("country", &self.country),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!("{} is required", field)));
            }
        }
        Ok(())
    }
}
