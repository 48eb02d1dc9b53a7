//! View selection and the transient chrome that goes with it.

/// Every screen the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Login,
    Register,
    Booking,
    Predict,
    AddDog,
    MyAppointments,
    VetDashboard,
    Analytics,
}

impl View {
    pub const ALL: [View; 9] = [
        View::Home,
        View::Login,
        View::Register,
        View::Booking,
        View::Predict,
        View::AddDog,
        View::MyAppointments,
        View::VetDashboard,
        View::Analytics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::Booking => "booking",
            Self::Predict => "predict",
            Self::AddDog => "add-dog",
            Self::MyAppointments => "my-appointments",
            Self::VetDashboard => "vet-dashboard",
            Self::Analytics => "analytics",
        }
    }

    /// Unrecognized names (including the legacy `adoption`) land on home.
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == wanted)
            .unwrap_or(Self::Home)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Booking => "Book Appointment",
            Self::Predict => "Predict Disease",
            Self::AddDog => "Add Dog for Adoption",
            Self::MyAppointments => "My Appointments",
            Self::VetDashboard => "Appointments",
            Self::Analytics => "Analytics",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The requested view plus chrome state that navigation resets.
#[derive(Debug)]
pub struct Router {
    current: View,
    menu_open: bool,
    scroll_offset: usize,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            current: View::Home,
            menu_open: false,
            scroll_offset: 0,
        }
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// The view last asked for, before any access guard is applied.
    pub fn current(&self) -> View {
        self.current
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Switch views, closing the menu and scrolling to the top.
    ///
    /// Returns `true` if the view changed.
    pub fn navigate(&mut self, view: View) -> bool {
        let changed = self.current != view;
        tracing::debug!(from = %self.current, to = %view, "Navigate");
        self.current = view;
        self.menu_open = false;
        self.scroll_offset = 0;
        changed
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn scroll_by(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_name(view.as_str()), view);
        }
    }

    #[test]
    fn unknown_names_default_home() {
        assert_eq!(View::from_name("adoption"), View::Home);
        assert_eq!(View::from_name("settings"), View::Home);
        assert_eq!(View::from_name(""), View::Home);
        assert_eq!(View::from_name(" Vet-Dashboard "), View::VetDashboard);
    }

    #[test]
    fn navigation_resets_chrome() {
        let mut router = Router::new();
        router.toggle_menu();
        router.scroll_by(12);
        assert!(router.navigate(View::Booking));
        assert!(!router.menu_open());
        assert_eq!(router.scroll_offset(), 0);
        assert_eq!(router.current(), View::Booking);
    }

    #[test]
    fn same_view_navigation_still_resets() {
        let mut router = Router::new();
        router.toggle_menu();
        assert!(!router.navigate(View::Home));
        assert!(!router.menu_open());
    }
}
