//! Backend REST API: the trait the application talks to, its HTTP
//! implementation, and an in-memory stand-in for tests.

pub mod error;
pub mod http;
pub mod mock;
pub(crate) mod transport;
pub mod types;

pub use error::ApiError;
pub use http::HttpPetCareApi;
pub use mock::MockPetCareApi;
pub use types::{LoginRequest, RegisterRequest};

use crate::models::{AdoptionListing, Appointment, NewAppointment, NewListing, RecordId, Role, StatusUpdate};
use crate::session::Session;

/// Operations the client needs from the pet-care backend.
pub trait PetCareApi: Send + Sync {
    /// `GET /api/dogs`
    fn list_listings(&self) -> Result<Vec<AdoptionListing>, ApiError>;

    /// `POST /api/dogs`
    fn create_listing(&self, listing: &NewListing) -> Result<AdoptionListing, ApiError>;

    /// `GET /api/appointments?role&email`, scoped server-side.
    fn list_appointments(&self, role: Role, email: &str) -> Result<Vec<Appointment>, ApiError>;

    /// `POST /api/appointments`
    fn create_appointment(&self, appointment: &NewAppointment) -> Result<Appointment, ApiError>;

    /// `PATCH /api/appointments/:id`
    fn update_appointment(&self, id: &RecordId, update: &StatusUpdate) -> Result<Appointment, ApiError>;

    /// `POST /login`
    fn login(&self, request: &LoginRequest) -> Result<Session, ApiError>;

    /// `POST /register`
    fn register(&self, request: &RegisterRequest) -> Result<Session, ApiError>;
}
