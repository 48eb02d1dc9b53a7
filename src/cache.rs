//! Client-side snapshots of listings and appointments.
//!
//! Snapshots are replaced wholesale by a successful sync. Each sync carries
//! a ticket stamped with the identity generation it was issued under; when
//! the identity changes the generation moves on and results from older
//! tickets are dropped instead of overwriting the new identity's data.

use crate::api::ApiError;
use crate::models::{AdoptionListing, Appointment, StatusFilter};
use crate::session::Session;

/// Proof of which identity a sync was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTicket {
    generation: u64,
    identity: Option<Session>,
}

impl SyncTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Appointments are only fetched when this is `Some`.
    pub fn identity(&self) -> Option<&Session> {
        self.identity.as_ref()
    }
}

/// What happened to a sync result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied(usize),
    Stale,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct DomainCache {
    listings: Vec<AdoptionListing>,
    appointments: Vec<Appointment>,
    generation: u64,
    identity: Option<Session>,
}

impl DomainCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listings(&self) -> &[AdoptionListing] {
        &self.listings
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Record a new identity. Bumps the generation when it differs and
    /// drops appointment data scoped to the previous one.
    pub fn set_identity(&mut self, identity: Option<&Session>) -> bool {
        if self.identity.as_ref() == identity {
            return false;
        }
        self.generation += 1;
        self.identity = identity.cloned();
        self.appointments.clear();
        tracing::debug!(generation = self.generation, "Cache identity changed");
        true
    }

    pub fn begin_sync(&self) -> SyncTicket {
        SyncTicket {
            generation: self.generation,
            identity: self.identity.clone(),
        }
    }

    pub fn is_current(&self, ticket: &SyncTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn apply_listings(
        &mut self,
        ticket: &SyncTicket,
        result: Result<Vec<AdoptionListing>, ApiError>,
    ) -> SyncOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "Dropping stale listings sync");
            return SyncOutcome::Stale;
        }
        match result {
            Ok(listings) => {
                let count = listings.len();
                self.listings = listings;
                SyncOutcome::Applied(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Listings sync failed, keeping previous snapshot");
                SyncOutcome::Failed(e.to_string())
            }
        }
    }

    pub fn apply_appointments(
        &mut self,
        ticket: &SyncTicket,
        result: Result<Vec<Appointment>, ApiError>,
    ) -> SyncOutcome {
        if !self.is_current(ticket) {
            tracing::debug!(generation = ticket.generation, "Dropping stale appointments sync");
            return SyncOutcome::Stale;
        }
        match result {
            Ok(appointments) => {
                let count = appointments.len();
                self.appointments = appointments;
                SyncOutcome::Applied(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Appointments sync failed, keeping previous snapshot");
                SyncOutcome::Failed(e.to_string())
            }
        }
    }

    /// Insert or replace by id with a server-acknowledged record.
    pub fn upsert_appointment(&mut self, record: Appointment) {
        match self.appointments.iter_mut().find(|a| a.id == record.id) {
            Some(existing) => *existing = record,
            None => self.appointments.push(record),
        }
    }

    pub fn push_listing(&mut self, listing: AdoptionListing) {
        if !self.listings.iter().any(|l| l.id == listing.id) {
            self.listings.push(listing);
        }
    }

    pub fn find_appointment(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id.as_str() == id)
    }

    pub fn appointments_matching(&self, filter: StatusFilter) -> Vec<&Appointment> {
        filter.apply(&self.appointments)
    }

    /// The single shared snapshot narrowed to one owner's bookings.
    pub fn appointments_for(&self, email: &str) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.belongs_to(email))
            .collect()
    }
}
