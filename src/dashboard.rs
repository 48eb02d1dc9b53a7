//! Veterinarian dashboard: the request queue, decisions on pending
//! requests, and summary analytics.
//!
//! A decision is checked locally against the appointment lifecycle, sent as
//! one PATCH, and only the server's acknowledged record is written back to
//! the cache. If the request fails the cached status is left as it was.

use serde::Serialize;

use crate::core_state::CoreState;
use crate::error::AppError;
use crate::models::{Appointment, AppointmentStatus, Decision, RecordId, StatusFilter};
use crate::router::View;

// ─── Queue ────────────────────────────────────────────────────────────────────

/// Actionable requests.
pub fn pending(state: &CoreState) -> Vec<&Appointment> {
    state
        .cache()
        .appointments_matching(StatusFilter::Only(AppointmentStatus::Pending))
}

/// Everything already decided, read-only.
pub fn history(state: &CoreState) -> Vec<&Appointment> {
    state
        .cache()
        .appointments()
        .iter()
        .filter(|a| !a.is_pending())
        .collect()
}

pub fn filtered(state: &CoreState, filter: StatusFilter) -> Vec<&Appointment> {
    state.cache().appointments_matching(filter)
}

// ─── Decisions ────────────────────────────────────────────────────────────────

pub fn accept(state: &mut CoreState, id: &str) -> Result<Appointment, AppError> {
    decide(state, id, Decision::Accept)
}

/// Reject with the operator's reason, or the canned message when blank.
pub fn reject(state: &mut CoreState, id: &str, reason: Option<&str>) -> Result<Appointment, AppError> {
    decide(
        state,
        id,
        Decision::Reject {
            reason: reason.map(str::to_string),
        },
    )
}

fn decide(state: &mut CoreState, id: &str, decision: Decision) -> Result<Appointment, AppError> {
    state.ensure_access(View::VetDashboard)?;

    let current = state
        .cache()
        .find_appointment(id)
        .ok_or_else(|| AppError::AppointmentNotFound(id.to_string()))?;
    let update = current.decide(&decision)?;

    let acknowledged = state
        .api()
        .update_appointment(&RecordId::new(id), &update)
        .inspect_err(|e| tracing::warn!(id, error = %e, "Status update failed, keeping cached status"))?;
    tracing::info!(id, status = %acknowledged.status, "Appointment decided");

    state.commit_appointment(acknowledged.clone());
    Ok(acknowledged)
}

// ─── Analytics ────────────────────────────────────────────────────────────────

/// Share of cases seen for the most common skin conditions, in percent.
/// Reference figures shown beside the live counts.
pub const COMMON_SKIN_DISEASES: [(&str, u8); 4] = [
    ("Atopic Dermatitis", 85),
    ("Hot Spots", 65),
    ("Ringworm", 45),
    ("Mange", 30),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Accepted over decided, as a percentage; 0 when nothing is decided.
    pub acceptance_rate: f64,
}

impl AnalyticsSummary {
    pub fn from_appointments(appointments: &[Appointment]) -> Self {
        let count = |status: AppointmentStatus| appointments.iter().filter(|a| a.status == status).count();
        let pending = count(AppointmentStatus::Pending);
        let accepted = count(AppointmentStatus::Accepted);
        let rejected = count(AppointmentStatus::Rejected);
        let decided = accepted + rejected;
        let acceptance_rate = if decided == 0 {
            0.0
        } else {
            accepted as f64 * 100.0 / decided as f64
        };
        Self {
            total: appointments.len(),
            pending,
            accepted,
            rejected,
            acceptance_rate,
        }
    }
}

pub fn analytics(state: &CoreState) -> Result<AnalyticsSummary, AppError> {
    state.ensure_access(View::Analytics)?;
    Ok(AnalyticsSummary::from_appointments(state.cache().appointments()))
}
