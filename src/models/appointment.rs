use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;
use super::ids::RecordId;

/// Canned response attached when a veterinarian accepts.
pub const ACCEPTED_MESSAGE: &str = "Your appointment has been confirmed.";

/// Canned response attached when a veterinarian rejects without a reason.
pub const REJECTED_MESSAGE: &str = "Appointment was rejected.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub dog_name: String,
    pub owner_name: String,
    pub contact: String,
    pub email: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub notes: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Payload for `POST /api/appointments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub dog_name: String,
    pub owner_name: String,
    pub contact: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    pub status: AppointmentStatus,
    pub timestamp: String,
}

/// Payload for `PATCH /api/appointments/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// A veterinarian's ruling on a pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject { reason: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Appointment {id} is already {from}; cannot mark it {to}")]
pub struct TransitionError {
    pub id: RecordId,
    pub from: AppointmentStatus,
    pub to: AppointmentStatus,
}

impl Decision {
    pub fn target_status(&self) -> AppointmentStatus {
        match self {
            Self::Accept => AppointmentStatus::Accepted,
            Self::Reject { .. } => AppointmentStatus::Rejected,
        }
    }

    /// Response text; blank reasons fall back to the canned rejection.
    pub fn response_text(&self) -> String {
        match self {
            Self::Accept => ACCEPTED_MESSAGE.to_string(),
            Self::Reject { reason } => reason
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(REJECTED_MESSAGE)
                .to_string(),
        }
    }
}

impl NewAppointment {
    /// Materialize as a stored record (used by in-memory backends).
    pub fn into_appointment(self, id: RecordId) -> Appointment {
        Appointment {
            id,
            dog_name: self.dog_name,
            owner_name: self.owner_name,
            contact: self.contact,
            email: self.email,
            date: self.date,
            time: self.time,
            notes: self.notes,
            status: self.status,
            response: None,
            timestamp: Some(self.timestamp),
        }
    }
}

impl Appointment {
    pub fn is_pending(&self) -> bool {
        self.status == AppointmentStatus::Pending
    }

    /// Build the update for a decision, refusing anything but `pending → terminal`.
    pub fn decide(&self, decision: &Decision) -> Result<StatusUpdate, TransitionError> {
        let to = decision.target_status();
        if !self.status.can_transition_to(to) {
            return Err(TransitionError {
                id: self.id.clone(),
                from: self.status,
                to,
            });
        }
        Ok(StatusUpdate {
            status: to,
            response: Some(decision.response_text()),
        })
    }

    /// Apply an update under the same transition rule.
    pub fn apply(&mut self, update: &StatusUpdate) -> Result<(), TransitionError> {
        if !self.status.can_transition_to(update.status) {
            return Err(TransitionError {
                id: self.id.clone(),
                from: self.status,
                to: update.status,
            });
        }
        self.status = update.status;
        self.response = update.response.clone();
        Ok(())
    }

    /// Case-insensitive match on the booking email.
    pub fn belongs_to(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::appointment;
    use super::*;

    #[test]
    fn accept_pending_sets_canned_message() {
        let appt = appointment("1", AppointmentStatus::Pending);
        let update = appt.decide(&Decision::Accept).unwrap();
        assert_eq!(update.status, AppointmentStatus::Accepted);
        assert_eq!(update.response.as_deref(), Some(ACCEPTED_MESSAGE));
    }

    #[test]
    fn reject_uses_reason_or_fallback() {
        let appt = appointment("1", AppointmentStatus::Pending);
        let with_reason = appt
            .decide(&Decision::Reject {
                reason: Some("Clinic closed that day".into()),
            })
            .unwrap();
        assert_eq!(with_reason.response.as_deref(), Some("Clinic closed that day"));

        for reason in [None, Some(String::new()), Some("   ".into())] {
            let update = appt.decide(&Decision::Reject { reason }).unwrap();
            assert_eq!(update.status, AppointmentStatus::Rejected);
            assert_eq!(update.response.as_deref(), Some(REJECTED_MESSAGE));
        }
    }

    #[test]
    fn terminal_appointments_refuse_second_decision() {
        for status in [AppointmentStatus::Accepted, AppointmentStatus::Rejected] {
            let appt = appointment("7", status);
            let err = appt.decide(&Decision::Accept).unwrap_err();
            assert_eq!(err.from, status);
            assert!(appt
                .decide(&Decision::Reject { reason: None })
                .is_err());
        }
    }

    #[test]
    fn apply_is_one_shot() {
        let mut appt = appointment("3", AppointmentStatus::Pending);
        let update = appt.decide(&Decision::Accept).unwrap();
        appt.apply(&update).unwrap();
        assert_eq!(appt.status, AppointmentStatus::Accepted);

        let back = StatusUpdate {
            status: AppointmentStatus::Pending,
            response: None,
        };
        assert!(appt.apply(&back).is_err());
        assert_eq!(appt.status, AppointmentStatus::Accepted);
    }

    #[test]
    fn deserializes_backend_shape() {
        let json = r#"{
            "_id": 1718000000123,
            "dogName": "Luna",
            "ownerName": "Sam",
            "contact": "555-0101",
            "email": "sam@example.com",
            "date": "2026-11-03",
            "time": "14:00",
            "status": "pending"
        }"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.id.as_str(), "1718000000123");
        assert_eq!(appt.notes, "");
        assert!(appt.response.is_none());
        assert!(appt.is_pending());
    }

    #[test]
    fn status_update_omits_missing_response() {
        let update = StatusUpdate {
            status: AppointmentStatus::Accepted,
            response: None,
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"status": "accepted"})
        );
    }

    #[test]
    fn ownership_ignores_case() {
        let appt = appointment("1", AppointmentStatus::Pending);
        assert!(appt.belongs_to("JANE@example.com "));
        assert!(!appt.belongs_to("sam@example.com"));
    }
}
