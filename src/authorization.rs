//! View access rules.
//!
//! One predicate decides, for a (view, session) pair, whether the view may
//! render. The navigation menu and the renderer both consult it, so a view
//! is never offered in one place and refused in the other.
//!
//! Rules, checked per view:
//! 1. `home` → always granted
//! 2. `login`, `register` → signed-out only, else redirect home
//! 3. `booking` → anyone but a veterinarian, else redirect home
//! 4. `vet-dashboard`, `analytics` → veterinarian only, else redirect home
//! 5. `predict`, `add-dog`, `my-appointments` → owner only; signed-out
//!    visitors get a login prompt, veterinarians are redirected home

use crate::router::View;
use crate::session::Session;

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    /// Render this view instead.
    Redirect(View),
    /// Render a sign-in prompt in place of the view.
    LoginRequired,
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Views listed in the navigation menu, in display order.
const MENU: [View; 9] = [
    View::Home,
    View::Booking,
    View::Predict,
    View::MyAppointments,
    View::AddDog,
    View::VetDashboard,
    View::Analytics,
    View::Login,
    View::Register,
];

/// Decide whether `view` may render for `session`.
pub fn authorize(view: View, session: Option<&Session>) -> AccessDecision {
    match view {
        View::Home => AccessDecision::Granted,
        View::Login | View::Register => match session {
            None => AccessDecision::Granted,
            Some(_) => AccessDecision::Redirect(View::Home),
        },
        View::Booking => match session {
            Some(s) if s.is_veterinarian() => AccessDecision::Redirect(View::Home),
            _ => AccessDecision::Granted,
        },
        View::VetDashboard | View::Analytics => match session {
            Some(s) if s.is_veterinarian() => AccessDecision::Granted,
            _ => AccessDecision::Redirect(View::Home),
        },
        View::Predict | View::AddDog | View::MyAppointments => match session {
            None => AccessDecision::LoginRequired,
            Some(s) if s.is_owner() => AccessDecision::Granted,
            Some(_) => AccessDecision::Redirect(View::Home),
        },
    }
}

/// The view that actually renders after applying redirects.
pub fn resolve(view: View, session: Option<&Session>) -> View {
    match authorize(view, session) {
        AccessDecision::Redirect(target) => target,
        AccessDecision::Granted | AccessDecision::LoginRequired => view,
    }
}

/// Menu entries for `session`: exactly the menu views it may open.
pub fn menu_views(session: Option<&Session>) -> Vec<View> {
    MENU.iter()
        .copied()
        .filter(|v| authorize(*v, session).is_granted())
        .collect()
}
