//! View models built from `CoreState`, plus their plain-text rendering.
//!
//! `render` applies the access guard: the screen produced is for the
//! resolved view, a login prompt, or a pending confirmation. It never
//! mutates state.

use std::io::{self, Write};

use crate::authorization::AccessDecision;
use crate::booking;
use crate::config;
use crate::core_state::{Confirmation, CoreState};
use crate::dashboard::{self, AnalyticsSummary};
use crate::inference::diseases;
use crate::models::{AdoptionListing, Appointment};
use crate::router::View;
use crate::session::Session;

pub struct Frame<'a> {
    pub view: View,
    pub session: Option<&'a Session>,
    pub menu: Vec<View>,
    pub menu_open: bool,
    pub screen: Screen<'a>,
}

pub enum Screen<'a> {
    Home {
        /// Listings from the scroll position on.
        listings: &'a [AdoptionListing],
        skipped: usize,
        can_add_dog: bool,
    },
    Login,
    Register,
    Booking {
        email: Option<&'a str>,
    },
    Predict,
    AddDog,
    MyAppointments(Vec<&'a Appointment>),
    VetDashboard {
        pending: Vec<&'a Appointment>,
        history: Vec<&'a Appointment>,
    },
    Analytics(AnalyticsSummary),
    LoginRequired {
        requested: View,
    },
    Confirmation(&'a Confirmation),
}

pub fn render(state: &CoreState) -> Frame<'_> {
    let session = state.session();
    let view = state.resolved_view();

    let screen = if let Some(confirmation) = state.confirmation() {
        Screen::Confirmation(confirmation)
    } else if state.authorize(view) == AccessDecision::LoginRequired {
        Screen::LoginRequired { requested: view }
    } else {
        screen_for(state, view)
    };

    Frame {
        view,
        session,
        menu: state.menu(),
        menu_open: state.router().menu_open(),
        screen,
    }
}

fn screen_for(state: &CoreState, view: View) -> Screen<'_> {
    let session = state.session();
    match view {
        View::Home => {
            let all = state.cache().listings();
            let skipped = state.router().scroll_offset().min(all.len());
            Screen::Home {
                listings: &all[skipped..],
                skipped,
                can_add_dog: session.is_some_and(Session::is_owner),
            }
        }
        View::Login => Screen::Login,
        View::Register => Screen::Register,
        View::Booking => Screen::Booking {
            email: session.map(|s| s.email.as_str()),
        },
        View::Predict => Screen::Predict,
        View::AddDog => Screen::AddDog,
        View::MyAppointments => {
            Screen::MyAppointments(booking::owner_appointments(state).unwrap_or_default())
        }
        View::VetDashboard => Screen::VetDashboard {
            pending: dashboard::pending(state),
            history: dashboard::history(state),
        },
        View::Analytics => Screen::Analytics(dashboard::analytics(state).unwrap_or_default()),
    }
}

// ─── Text output ──────────────────────────────────────────────────────────────

pub fn write_frame<W: Write>(out: &mut W, frame: &Frame<'_>) -> io::Result<()> {
    let who = match frame.session {
        Some(s) => format!("{} ({})", s.email, s.role.label()),
        None => "not signed in".to_string(),
    };
    writeln!(out, "== {} | {} | {} ==", config::APP_NAME, frame.view.title(), who)?;
    if frame.menu_open {
        let entries: Vec<&str> = frame.menu.iter().map(View::as_str).collect();
        writeln!(out, "menu: {}", entries.join(" | "))?;
    }

    match &frame.screen {
        Screen::Home {
            listings,
            skipped,
            can_add_dog,
        } => {
            writeln!(out, "Dogs looking for a home:")?;
            if *skipped > 0 {
                writeln!(out, "  ({skipped} above, `nav home` to return to the top)")?;
            }
            if listings.is_empty() && *skipped == 0 {
                writeln!(out, "  (none listed yet)")?;
            }
            for dog in listings.iter() {
                let photo = if dog.has_embedded_image() { " [photo]" } else { "" };
                writeln!(
                    out,
                    "  [{}] {}, {}, {} ({}){}",
                    dog.id,
                    dog.name,
                    dog.breed,
                    dog.age_label(),
                    dog.location,
                    photo
                )?;
            }
            if !can_add_dog {
                writeln!(out, "Login as a dog owner to add dogs for adoption.")?;
            }
        }
        Screen::Login => writeln!(out, "login <email> <password> <owner|vet>")?,
        Screen::Register => {
            writeln!(out, "register <email> <password> <owner|vet> <full name>")?
        }
        Screen::Booking { email } => {
            writeln!(out, "book: you will be asked for each field")?;
            if let Some(email) = email {
                writeln!(out, "Booking as {email}")?;
            }
        }
        Screen::Predict => {
            writeln!(out, "predict-image <path>  |  predict-text <symptoms>  |  tab <upload|symptoms>")?;
            let known: Vec<String> = diseases::known_labels().map(diseases::display_name).collect();
            writeln!(out, "Recognized conditions: {}", known.join(", "))?;
        }
        Screen::AddDog => writeln!(out, "add-dog: you will be asked for each field")?,
        Screen::MyAppointments(appointments) => {
            if appointments.is_empty() {
                writeln!(out, "No Appointments Yet. Book your first appointment to get started.")?;
            }
            for appt in appointments {
                write_appointment(out, appt)?;
            }
        }
        Screen::VetDashboard { pending, history } => {
            writeln!(out, "Pending requests ({}):", pending.len())?;
            if pending.is_empty() {
                writeln!(out, "  No Pending Appointments. You're all caught up!")?;
            }
            for appt in pending {
                write_appointment(out, appt)?;
            }
            writeln!(out, "History ({}):", history.len())?;
            for appt in history {
                write_appointment(out, appt)?;
            }
        }
        Screen::Analytics(summary) => {
            writeln!(out, "Total Appointments: {}", summary.total)?;
            writeln!(out, "Accepted: {}", summary.accepted)?;
            writeln!(out, "Pending: {}", summary.pending)?;
            writeln!(out, "Rejected: {}", summary.rejected)?;
            writeln!(out, "Acceptance rate: {:.1}%", summary.acceptance_rate)?;
            writeln!(out, "Common Skin Diseases:")?;
            for (name, share) in dashboard::COMMON_SKIN_DISEASES {
                let bar = "#".repeat(usize::from(share / 5));
                writeln!(out, "  {name:<18} {bar:<20} {share}%")?;
            }
        }
        Screen::LoginRequired { requested } => {
            writeln!(out, "Login Required: please log in to open {}.", requested.title())?;
            writeln!(out, "Use `nav login`.")?;
        }
        Screen::Confirmation(confirmation) => {
            writeln!(out, "{}", confirmation.title)?;
            writeln!(out, "{}", confirmation.message)?;
        }
    }
    Ok(())
}

fn write_appointment<W: Write>(out: &mut W, appt: &Appointment) -> io::Result<()> {
    writeln!(
        out,
        "  [{}] {} on {} at {} for {} ({}) [{}]",
        appt.id,
        appt.status.label(),
        appt.date,
        appt.time,
        appt.dog_name,
        appt.owner_name,
        appt.email
    )?;
    if !appt.notes.is_empty() {
        writeln!(out, "      Notes: {}", appt.notes)?;
    }
    if let Some(response) = &appt.response {
        writeln!(out, "      Veterinarian Response: {response}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPetCareApi;
    use crate::core_state::fixtures::state_with;
    use crate::models::appointment::fixtures::appointment;
    use crate::models::listing::fixtures::listing;
    use crate::models::{AppointmentStatus, Role};
    use std::time::Duration;

    fn text(state: &CoreState) -> String {
        let mut out = Vec::new();
        write_frame(&mut out, &render(state)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn home_lists_dogs() {
        let (mut state, _, _) =
            state_with(MockPetCareApi::new().with_listings(vec![listing("1", "Buddy", 1)]));
        state.settle();
        let frame = render(&state);
        assert!(matches!(frame.screen, Screen::Home { listings, can_add_dog: false, .. } if listings.len() == 1));
        assert!(text(&state).contains("Buddy, Golden Retriever, 1 year"));
    }

    #[test]
    fn signed_out_owner_view_prompts_login() {
        let (mut state, _, _) = state_with(MockPetCareApi::new());
        state.navigate(View::MyAppointments);
        assert!(matches!(
            render(&state).screen,
            Screen::LoginRequired { requested: View::MyAppointments }
        ));
    }

    #[test]
    fn vet_on_booking_sees_home() {
        let (mut state, _, _) = state_with(MockPetCareApi::new());
        state.login("vet@clinic.test", Role::Veterinarian);
        state.navigate(View::Booking);
        let frame = render(&state);
        assert_eq!(frame.view, View::Home);
        assert!(matches!(frame.screen, Screen::Home { .. }));
    }

    #[test]
    fn owner_on_dashboard_sees_home() {
        let (mut state, _, _) = state_with(MockPetCareApi::new());
        state.login("jane@example.com", Role::Owner);
        for view in [View::VetDashboard, View::Analytics] {
            state.navigate(view);
            assert!(matches!(render(&state).screen, Screen::Home { can_add_dog: true, .. }));
        }
    }

    #[test]
    fn dashboard_splits_queue() {
        let (mut state, _, _) = state_with(MockPetCareApi::new().with_appointments(vec![
            appointment("1", AppointmentStatus::Pending),
            appointment("2", AppointmentStatus::Accepted),
        ]));
        state.login("vet@clinic.test", Role::Veterinarian);
        state.navigate(View::VetDashboard);
        match render(&state).screen {
            Screen::VetDashboard { pending, history } => {
                assert_eq!(pending.len(), 1);
                assert_eq!(history.len(), 1);
            }
            _ => panic!("expected dashboard"),
        }
        assert!(text(&state).contains("Pending requests (1):"));
    }

    #[test]
    fn confirmation_replaces_screen() {
        let (mut state, _, _) = state_with(MockPetCareApi::new());
        state.navigate(View::Booking);
        state.show_confirmation("Appointment Requested!", "Thanks", Duration::from_secs(3));
        assert!(matches!(render(&state).screen, Screen::Confirmation(_)));
        assert!(text(&state).contains("Appointment Requested!"));
    }

    #[test]
    fn menu_shown_only_when_open() {
        let (mut state, _, _) = state_with(MockPetCareApi::new());
        assert!(!text(&state).contains("menu:"));
        state.toggle_menu();
        assert!(text(&state).contains("menu: home | booking | login | register"));
    }

    #[test]
    fn owner_history_screen_lists_newest_first() {
        let mut early = appointment("early", AppointmentStatus::Pending);
        early.date = "2026-11-02".into();
        let mut late = appointment("late", AppointmentStatus::Pending);
        late.date = "2026-12-01".into();
        let (mut state, _, _) =
            state_with(MockPetCareApi::new().with_appointments(vec![early, late]));
        state.login("jane@example.com", Role::Owner);
        state.navigate(View::MyAppointments);

        match render(&state).screen {
            Screen::MyAppointments(mine) => {
                let ids: Vec<&str> = mine.iter().map(|a| a.id.as_str()).collect();
                assert_eq!(ids, vec!["late", "early"]);
            }
            _ => panic!("expected owner history"),
        }
    }

    #[test]
    fn analytics_shows_common_conditions() {
        let (mut state, _, _) = state_with(MockPetCareApi::new());
        state.login("vet@clinic.test", Role::Veterinarian);
        state.navigate(View::Analytics);
        let out = text(&state);
        assert!(out.contains("Common Skin Diseases:"), "{out}");
        assert!(out.contains("Atopic Dermatitis"), "{out}");
        assert!(out.contains("85%"), "{out}");
    }

    #[test]
    fn predict_screen_lists_known_conditions() {
        let (mut state, _, _) = state_with(MockPetCareApi::new());
        state.login("jane@example.com", Role::Owner);
        state.navigate(View::Predict);
        assert!(text(&state).contains("Fungal infections"));
    }

    #[test]
    fn scrolling_skips_earlier_listings() {
        let (mut state, _, _) = state_with(MockPetCareApi::new().with_listings(vec![
            listing("1", "Buddy", 3),
            listing("2", "Luna", 2),
        ]));
        state.settle();
        state.scroll_by(1);
        match render(&state).screen {
            Screen::Home { listings, skipped, .. } => {
                assert_eq!(skipped, 1);
                assert_eq!(listings[0].name, "Luna");
            }
            _ => panic!("expected home"),
        }
        state.scroll_by(10);
        assert!(text(&state).contains("(2 above"));
    }

    #[test]
    fn embedded_photo_is_marked() {
        let mut dog = listing("1", "Buddy", 3);
        dog.image = "data:image/png;base64,AAAA".into();
        let (mut state, _, _) = state_with(MockPetCareApi::new().with_listings(vec![dog]));
        state.settle();
        assert!(text(&state).contains("[photo]"));
    }

    #[test]
    fn owner_history_shows_vet_response() {
        let mut done = appointment("1", AppointmentStatus::Accepted);
        done.response = Some("See you then".into());
        let (mut state, _, _) = state_with(MockPetCareApi::new().with_appointments(vec![done]));
        state.login("jane@example.com", Role::Owner);
        state.navigate(View::MyAppointments);
        assert!(text(&state).contains("Veterinarian Response: See you then"));
    }
}
