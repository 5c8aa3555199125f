//! Account domain entities

use chrono::{DateTime, Utc};

/// Principal role carried in tokens and session contexts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Guest,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "guest" => Some(Self::Guest),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Guest account; logs in by email
#[derive(Debug, Clone)]
pub struct Guest {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Hotel-side account; logs in by name
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: i32,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
