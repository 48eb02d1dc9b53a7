//! Application context shared by every view and flow.
//!
//! `CoreState` owns the session, the router, the domain caches and the
//! service clients. Views read it by reference; flows mutate it through
//! the methods here so that every identity or view change funnels into
//! one resync, and every acknowledged mutation lands in the cache the same
//! way (replace the record, then resync).

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{ApiError, HttpPetCareApi, PetCareApi};
use crate::authorization::{self, AccessDecision};
use crate::cache::{DomainCache, SyncOutcome};
use crate::config::ClientConfig;
use crate::error::AppError;
use crate::inference::{HttpInferenceClient, InferenceClient};
use crate::models::{AdoptionListing, Appointment, Role};
use crate::router::{Router, View};
use crate::session::{Session, SessionState};

/// A timed success screen shown in place of the view that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub view: View,
    pub title: String,
    pub message: String,
    expires_at: Instant,
}

impl Confirmation {
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

/// Result of one resync pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub listings: SyncOutcome,
    /// `None` when signed out (appointments are not fetched).
    pub appointments: Option<SyncOutcome>,
}

pub struct CoreState {
    session: SessionState,
    router: Router,
    cache: DomainCache,
    confirmation: Option<Confirmation>,
    sync_needed: bool,
    api: Arc<dyn PetCareApi>,
    inference: Arc<dyn InferenceClient>,
}

impl CoreState {
    /// New signed-out state on the home view. Nothing is fetched until the
    /// first `settle` or `sync`.
    pub fn new(api: Arc<dyn PetCareApi>, inference: Arc<dyn InferenceClient>) -> Self {
        Self {
            session: SessionState::new(),
            router: Router::new(),
            cache: DomainCache::new(),
            confirmation: None,
            sync_needed: true,
            api,
            inference,
        }
    }

    /// Wire up the HTTP clients described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let api = HttpPetCareApi::from_config(config)?;
        let inference = HttpInferenceClient::from_config(config)?;
        tracing::info!(
            api = %config.api_base_url,
            inference = %config.inference_base_url,
            "HTTP clients configured"
        );
        Ok(Self::new(Arc::new(api), Arc::new(inference)))
    }

    // ── Read access ─────────────────────────────────────────

    pub fn session(&self) -> Option<&Session> {
        self.session.current()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn cache(&self) -> &DomainCache {
        &self.cache
    }

    pub fn api(&self) -> &dyn PetCareApi {
        self.api.as_ref()
    }

    pub fn inference(&self) -> &dyn InferenceClient {
        self.inference.as_ref()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    // ── Access ──────────────────────────────────────────────

    pub fn authorize(&self, view: View) -> AccessDecision {
        authorization::authorize(view, self.session())
    }

    /// The view that renders now: the requested one after redirects.
    pub fn resolved_view(&self) -> View {
        authorization::resolve(self.router.current(), self.session())
    }

    pub fn menu(&self) -> Vec<View> {
        authorization::menu_views(self.session())
    }

    /// Gate for flows acting on behalf of `view`.
    pub fn ensure_access(&self, view: View) -> Result<(), AppError> {
        match self.authorize(view) {
            AccessDecision::Granted => Ok(()),
            AccessDecision::LoginRequired => Err(AppError::NotSignedIn),
            AccessDecision::Redirect(_) => Err(AppError::Forbidden(view)),
        }
    }

    // ── Session ─────────────────────────────────────────────

    /// Set the identity without any credential check, then resync.
    pub fn login(&mut self, email: &str, role: Role) {
        if self.session.login(email, role) {
            self.identity_changed();
        }
        self.settle();
    }

    /// Adopt a backend-confirmed identity and go home, with a single resync.
    pub fn sign_in(&mut self, session: Session) {
        if self.session.login(&session.email, session.role) {
            self.identity_changed();
        }
        self.set_view(View::Home);
        self.settle();
    }

    /// Clear the identity and return home so no restricted view lingers.
    pub fn logout(&mut self) {
        if self.session.logout() {
            self.identity_changed();
        }
        self.set_view(View::Home);
        self.settle();
    }

    fn identity_changed(&mut self) {
        self.cache.set_identity(self.session.current());
        self.confirmation = None;
        self.sync_needed = true;
    }

    // ── Navigation ──────────────────────────────────────────

    pub fn navigate(&mut self, view: View) {
        self.set_view(view);
        self.settle();
    }

    pub fn navigate_to_name(&mut self, name: &str) {
        self.navigate(View::from_name(name));
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.router.toggle_menu()
    }

    pub fn scroll_by(&mut self, rows: usize) {
        self.router.scroll_by(rows);
    }

    fn set_view(&mut self, view: View) {
        if self.router.navigate(view) {
            self.sync_needed = true;
        }
        if self.confirmation.as_ref().is_some_and(|c| c.view != view) {
            self.confirmation = None;
        }
    }

    // ── Sync ────────────────────────────────────────────────

    /// Run the pending resync, if any trigger fired since the last one.
    pub fn settle(&mut self) -> Option<SyncReport> {
        if !self.sync_needed {
            return None;
        }
        self.sync_needed = false;
        Some(self.sync())
    }

    /// Refetch listings always, appointments only when signed in.
    pub fn sync(&mut self) -> SyncReport {
        let ticket = self.cache.begin_sync();

        let listings = self.api.list_listings();
        let listings = self.cache.apply_listings(&ticket, listings);

        let appointments = ticket.identity().map(|identity| {
            let fetched = self.api.list_appointments(identity.role, &identity.email);
            self.cache.apply_appointments(&ticket, fetched)
        });

        tracing::debug!(generation = ticket.generation(), ?listings, ?appointments, "Sync finished");
        SyncReport {
            listings,
            appointments,
        }
    }

    /// Store a server-acknowledged appointment, then resync.
    ///
    /// Visitors have no appointments snapshot, so their bookings are not cached.
    pub(crate) fn commit_appointment(&mut self, record: Appointment) {
        if self.session.is_signed_in() {
            self.cache.upsert_appointment(record);
        }
        self.sync_needed = true;
        self.settle();
    }

    /// Store a server-acknowledged listing, then resync.
    pub(crate) fn commit_listing(&mut self, listing: AdoptionListing) {
        self.cache.push_listing(listing);
        self.sync_needed = true;
        self.settle();
    }

    // ── Confirmation ────────────────────────────────────────

    /// Replace the current view with a success screen for `display_for`.
    pub fn show_confirmation(&mut self, title: &str, message: &str, display_for: Duration) {
        self.confirmation = Some(Confirmation {
            view: self.router.current(),
            title: title.to_string(),
            message: message.to_string(),
            expires_at: Instant::now() + display_for,
        });
    }

    /// Expire the confirmation and go home once its time is up.
    ///
    /// Returns `true` if it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        let expired = self
            .confirmation
            .as_ref()
            .is_some_and(|c| now >= c.expires_at);
        if expired {
            self.confirmation = None;
            self.navigate(View::Home);
        }
        expired
    }
}
