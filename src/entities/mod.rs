//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod booking;
pub mod event;
pub mod guest;
pub mod user;

// Re-export specific types to avoid conflicts
pub use booking::{
    BookingStatus, BookingType, Column as BookingColumn, Entity as Booking, Model as BookingModel,
};
pub use event::{Column as EventColumn, Entity as Event, EventStatus, Model as EventModel};
pub use guest::{Column as GuestColumn, Entity as Guest, Model as GuestModel, RsvpStatus};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
