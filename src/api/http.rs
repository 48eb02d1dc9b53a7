use std::time::Duration;

use reqwest::blocking::Client;

use super::error::ApiError;
use super::transport::{build_client, coerce_array, decode, execute};
use super::types::{AuthResponse, LoginRequest, RegisterRequest};
use super::PetCareApi;
use crate::config::{normalize_base_url, ClientConfig};
use crate::models::{AdoptionListing, Appointment, NewAppointment, NewListing, RecordId, Role, StatusUpdate};
use crate::session::Session;

/// Blocking HTTP client for the pet-care backend.
pub struct HttpPetCareApi {
    base_url: String,
    client: Client,
}

impl HttpPetCareApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: normalize_base_url(base_url),
            client: build_client(timeout)?,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn appointment_url(&self, id: &RecordId) -> Result<reqwest::Url, ApiError> {
        let mut url = reqwest::Url::parse(&self.url("/api/appointments"))
            .map_err(|e| ApiError::HttpClient(format!("Invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::HttpClient(format!("Base URL cannot take a path: {}", self.base_url)))?
            .push(id.as_str());
        Ok(url)
    }
}

impl PetCareApi for HttpPetCareApi {
    fn list_listings(&self) -> Result<Vec<AdoptionListing>, ApiError> {
        let body = execute(self.client.get(self.url("/api/dogs")), &self.base_url)?;
        coerce_array(body, "listings")
    }

    fn create_listing(&self, listing: &NewListing) -> Result<AdoptionListing, ApiError> {
        let request = self.client.post(self.url("/api/dogs")).json(listing);
        let body = execute(request, &self.base_url)?;
        decode(body, "created listing")
    }

    fn list_appointments(&self, role: Role, email: &str) -> Result<Vec<Appointment>, ApiError> {
        let request = self
            .client
            .get(self.url("/api/appointments"))
            .query(&[("role", role.as_str()), ("email", email)]);
        let body = execute(request, &self.base_url)?;
        coerce_array(body, "appointments")
    }

    fn create_appointment(&self, appointment: &NewAppointment) -> Result<Appointment, ApiError> {
        let request = self.client.post(self.url("/api/appointments")).json(appointment);
        let body = execute(request, &self.base_url)?;
        decode(body, "created appointment")
    }

    fn update_appointment(&self, id: &RecordId, update: &StatusUpdate) -> Result<Appointment, ApiError> {
        let request = self.client.patch(self.appointment_url(id)?).json(update);
        let body = execute(request, &self.base_url)?;
        decode(body, "updated appointment")
    }

    fn login(&self, request: &LoginRequest) -> Result<Session, ApiError> {
        let body = execute(self.client.post(self.url("/login")).json(request), &self.base_url)?;
        decode::<AuthResponse>(body, "login response").map(Session::from)
    }

    fn register(&self, request: &RegisterRequest) -> Result<Session, ApiError> {
        let body = execute(self.client.post(self.url("/register")).json(request), &self.base_url)?;
        decode::<AuthResponse>(body, "register response").map(Session::from)
    }
}
