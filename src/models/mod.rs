pub mod appointment;
pub mod enums;
pub mod filters;
pub mod ids;
pub mod image;
pub mod listing;

pub use appointment::{Appointment, Decision, NewAppointment, StatusUpdate, TransitionError};
pub use enums::{AppointmentStatus, Role, UnknownVariant};
pub use filters::StatusFilter;
pub use ids::RecordId;
pub use image::ImageUpload;
pub use listing::{AdoptionListing, NewListing};
