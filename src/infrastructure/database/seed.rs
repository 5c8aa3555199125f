//! Reference data seeding

use log::info;

use crate::domain::{DomainResult, RepositoryProvider};

/// Room types every deployment starts with
pub const DEFAULT_ROOM_TYPES: [(&str, &str); 5] = [
    ("Single Room", "A room with one single bed"),
    ("Double Room", "A room with one double bed"),
    ("Twin Room", "A room with two single beds"),
    ("Suite", "A room with a separate living area"),
    ("Deluxe Room", "A larger room with premium furnishings"),
];

/// Insert the default room types that are not present yet.
///
/// Returns the number of rows inserted.
pub async fn seed_room_types(repos: &dyn RepositoryProvider) -> DomainResult<usize> {
    let mut inserted = 0;
    for (name, description) in DEFAULT_ROOM_TYPES {
        if repos.room_types().find_by_name(name).await?.is_none() {
            repos.room_types().create(name, description).await?;
            inserted += 1;
        }
    }
    if inserted > 0 {
        info!("Seeded {} room types", inserted);
    }
    Ok(inserted)
}
