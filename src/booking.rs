//! Appointment requests from visitors and owners, and the owner's own
//! booking history.

use chrono::{SecondsFormat, Utc};

use crate::config;
use crate::core_state::CoreState;
use crate::error::{AppError, FormError};
use crate::forms;
use crate::models::{Appointment, AppointmentStatus, NewAppointment};
use crate::router::View;

pub const CONFIRMATION_TITLE: &str = "Appointment Requested!";
pub const CONFIRMATION_MESSAGE: &str =
    "Thank you for booking. The veterinarian will review your request shortly.";

// ─── Form ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub dog_name: String,
    pub owner_name: String,
    pub contact: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub notes: String,
}

impl BookingForm {
    /// Check every field and build a pending request stamped now.
    pub fn validate(&self) -> Result<NewAppointment, FormError> {
        let dog_name = forms::require(&self.dog_name, "Dog's name")?;
        let owner_name = forms::require(&self.owner_name, "Owner's name")?;
        let contact = forms::require(&self.contact, "Contact number")?;
        let email = forms::email(&self.email)?;
        let date = forms::date(&self.date)?;
        let time = forms::time(&self.time)?;

        Ok(NewAppointment {
            dog_name,
            owner_name,
            contact,
            email,
            date,
            time,
            notes: self.notes.trim().to_string(),
            status: AppointmentStatus::Pending,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

// ─── Operations ───────────────────────────────────────────────────────────────

/// Validate, persist, cache, then show the timed confirmation.
pub fn submit(state: &mut CoreState, form: &BookingForm) -> Result<Appointment, AppError> {
    state.ensure_access(View::Booking)?;
    let request = form.validate()?;

    let created = state.api().create_appointment(&request)?;
    tracing::info!(
        id = %created.id,
        date = %created.date,
        time = %created.time,
        "Appointment requested"
    );

    state.commit_appointment(created.clone());
    state.show_confirmation(
        CONFIRMATION_TITLE,
        CONFIRMATION_MESSAGE,
        config::BOOKING_CONFIRMATION,
    );
    Ok(created)
}

/// The signed-in owner's bookings, newest date first.
pub fn owner_appointments(state: &CoreState) -> Result<Vec<&Appointment>, AppError> {
    state.ensure_access(View::MyAppointments)?;
    let session = state.session().ok_or(AppError::NotSignedIn)?;
    let mut mine = state.cache().appointments_for(&session.email);
    mine.sort_by(|a, b| (&b.date, &b.time).cmp(&(&a.date, &a.time)));
    Ok(mine)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn filled_form() -> BookingForm {
        BookingForm {
            dog_name: "Buddy".into(),
            owner_name: "Jane Doe".into(),
            contact: "(123) 456-7890".into(),
            email: "jane@example.com".into(),
            date: "2026-11-02".into(),
            time: "10:30".into(),
            notes: "Scratching a lot".into(),
        }
    }
}
