//! Amenity domain entity

use crate::domain::{DomainError, DomainResult};

/// A named hotel feature
#[derive(Debug, Clone, PartialEq)]
pub struct Amenity {
    pub id: i32,
    pub hotel_id: i32,
    pub name: String,
    pub description: String,
}

impl Amenity {
    pub fn validate_fields(name: &str, description: &str) -> DomainResult<()> {
        let name_len = name.trim().chars().count();
        if name_len == 0 || name_len > 25 {
            return Err(DomainError::Validation(
                "Amenity name must be 1-25 characters".into(),
            ));
        }
        let desc_len = description.trim().chars().count();
        if desc_len == 0 || desc_len > 200 {
            return Err(DomainError::Validation(
                "Description must be 1-200 characters".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_limits() {
        assert!(Amenity::validate_fields("Free Wi-Fi", "Fast wireless everywhere").is_ok());
        assert!(Amenity::validate_fields("", "desc").is_err());
        assert!(Amenity::validate_fields(&"a".repeat(26), "desc").is_err());
        assert!(Amenity::validate_fields("Pool", &"d".repeat(201)).is_err());
    }
}
