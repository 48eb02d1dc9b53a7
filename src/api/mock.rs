use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::error::ApiError;
use super::types::{LoginRequest, RegisterRequest};
use super::PetCareApi;
use crate::models::{AdoptionListing, Appointment, NewAppointment, NewListing, RecordId, Role, StatusUpdate};
use crate::session::Session;

#[derive(Debug, Clone)]
struct Account {
    email: String,
    password: String,
    role: Role,
}

/// In-memory backend for testing: same scoping and status rules as the real
/// server, plus a switch to simulate an unreachable host and a call counter.
#[derive(Default)]
pub struct MockPetCareApi {
    listings: Mutex<Vec<AdoptionListing>>,
    appointments: Mutex<Vec<Appointment>>,
    accounts: Mutex<Vec<Account>>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

impl MockPetCareApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listings(self, listings: Vec<AdoptionListing>) -> Self {
        if let Ok(mut guard) = self.listings.lock() {
            *guard = listings;
        }
        self
    }

    pub fn with_appointments(self, appointments: Vec<Appointment>) -> Self {
        if let Ok(mut guard) = self.appointments.lock() {
            *guard = appointments;
        }
        self
    }

    pub fn with_account(self, email: &str, password: &str, role: Role) -> Self {
        if let Ok(mut guard) = self.accounts.lock() {
            guard.push(Account {
                email: email.to_string(),
                password: password.to_string(),
                role,
            });
        }
        self
    }

    /// Every subsequent call fails with a connection error while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of calls received so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn stored_listings(&self) -> Vec<AdoptionListing> {
        self.listings.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn stored_appointments(&self) -> Vec<Appointment> {
        self.appointments.lock().map(|g| g.clone()).unwrap_or_default()
    }

    fn enter(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ApiError::Connection("mock://offline".into()));
        }
        Ok(())
    }
}

fn poisoned() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "mock state poisoned".into(),
    }
}

impl PetCareApi for MockPetCareApi {
    fn list_listings(&self) -> Result<Vec<AdoptionListing>, ApiError> {
        self.enter()?;
        self.listings.lock().map(|g| g.clone()).map_err(|_| poisoned())
    }

    fn create_listing(&self, listing: &NewListing) -> Result<AdoptionListing, ApiError> {
        self.enter()?;
        let created = listing.clone().into_listing(RecordId::generate());
        self.listings
            .lock()
            .map_err(|_| poisoned())?
            .push(created.clone());
        Ok(created)
    }

    fn list_appointments(&self, role: Role, email: &str) -> Result<Vec<Appointment>, ApiError> {
        self.enter()?;
        let guard = self.appointments.lock().map_err(|_| poisoned())?;
        Ok(match role {
            Role::Veterinarian => guard.clone(),
            Role::Owner => guard.iter().filter(|a| a.belongs_to(email)).cloned().collect(),
        })
    }

    fn create_appointment(&self, appointment: &NewAppointment) -> Result<Appointment, ApiError> {
        self.enter()?;
        let created = appointment.clone().into_appointment(RecordId::generate());
        self.appointments
            .lock()
            .map_err(|_| poisoned())?
            .push(created.clone());
        Ok(created)
    }

    fn update_appointment(&self, id: &RecordId, update: &StatusUpdate) -> Result<Appointment, ApiError> {
        self.enter()?;
        let mut guard = self.appointments.lock().map_err(|_| poisoned())?;
        let record = guard
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: format!("Appointment {id} not found"),
            })?;
        record.apply(update).map_err(|e| ApiError::Status {
            status: 409,
            message: e.to_string(),
        })?;
        Ok(record.clone())
    }

    fn login(&self, request: &LoginRequest) -> Result<Session, ApiError> {
        self.enter()?;
        let guard = self.accounts.lock().map_err(|_| poisoned())?;
        guard
            .iter()
            .find(|a| {
                a.email.eq_ignore_ascii_case(request.email.trim())
                    && a.password == request.password
                    && a.role == request.role
            })
            .map(|a| Session::new(a.email.clone(), a.role))
            .ok_or_else(|| ApiError::Rejected("Invalid credentials".into()))
    }

    fn register(&self, request: &RegisterRequest) -> Result<Session, ApiError> {
        self.enter()?;
        let mut guard = self.accounts.lock().map_err(|_| poisoned())?;
        if guard
            .iter()
            .any(|a| a.email.eq_ignore_ascii_case(request.email.trim()))
        {
            return Err(ApiError::Rejected("Email already registered".into()));
        }
        guard.push(Account {
            email: request.email.trim().to_string(),
            password: request.password.clone(),
            role: request.role,
        });
        Ok(Session::new(request.email.clone(), request.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment::fixtures::appointment;
    use crate::models::AppointmentStatus;

    #[test]
    fn owner_sees_only_own_appointments() {
        let mut other = appointment("2", AppointmentStatus::Pending);
        other.email = "sam@example.com".into();
        let api = MockPetCareApi::new()
            .with_appointments(vec![appointment("1", AppointmentStatus::Pending), other]);

        assert_eq!(api.list_appointments(Role::Owner, "jane@example.com").unwrap().len(), 1);
        assert_eq!(api.list_appointments(Role::Veterinarian, "vet@clinic.test").unwrap().len(), 2);
    }

    #[test]
    fn offline_fails_and_counts() {
        let api = MockPetCareApi::new();
        api.set_offline(true);
        assert!(api.list_listings().unwrap_err().is_network());
        assert_eq!(api.call_count(), 1);
        api.set_offline(false);
        assert!(api.list_listings().is_ok());
        assert_eq!(api.call_count(), 2);
    }

    #[test]
    fn second_status_change_is_conflict() {
        let api = MockPetCareApi::new()
            .with_appointments(vec![appointment("1", AppointmentStatus::Pending)]);
        let accept = StatusUpdate {
            status: AppointmentStatus::Accepted,
            response: None,
        };
        api.update_appointment(&RecordId::from("1"), &accept).unwrap();
        let err = api.update_appointment(&RecordId::from("1"), &accept).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 409, .. }));
    }

    #[test]
    fn login_requires_matching_role() {
        let api = MockPetCareApi::new().with_account("vet@clinic.test", "pw", Role::Veterinarian);
        let wrong_role = LoginRequest {
            email: "vet@clinic.test".into(),
            password: "pw".into(),
            role: Role::Owner,
        };
        assert!(api.login(&wrong_role).is_err());
        let ok = LoginRequest {
            role: Role::Veterinarian,
            ..wrong_role
        };
        assert!(api.login(&ok).unwrap().is_veterinarian());
    }

    #[test]
    fn duplicate_registration_rejected() {
        let api = MockPetCareApi::new();
        let req = RegisterRequest {
            full_name: "Jane".into(),
            email: "jane@example.com".into(),
            password: "pw".into(),
            role: Role::Owner,
        };
        api.register(&req).unwrap();
        assert_eq!(
            api.register(&req).unwrap_err(),
            ApiError::Rejected("Email already registered".into())
        );
    }
}
