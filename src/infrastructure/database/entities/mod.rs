//! Database entities module

pub mod admin;
pub mod amenity;
pub mod booked_room;
pub mod booking;
pub mod guest;
pub mod hotel;
pub mod room;
pub mod room_type;

pub use admin::Entity as Admin;
pub use amenity::Entity as Amenity;
pub use booked_room::Entity as BookedRoom;
pub use booking::Entity as Booking;
pub use guest::Entity as Guest;
pub use hotel::Entity as Hotel;
pub use room::Entity as Room;
pub use room_type::Entity as RoomType;
