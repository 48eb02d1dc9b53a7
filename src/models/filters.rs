use std::str::FromStr;

use super::appointment::Appointment;
use super::enums::{AppointmentStatus, UnknownVariant};

/// Status filter for appointment lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    pub fn matches(&self, appointment: &Appointment) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => appointment.status == *status,
        }
    }

    pub fn apply<'a>(&self, appointments: &'a [Appointment]) -> Vec<&'a Appointment> {
        appointments.iter().filter(|a| self.matches(a)).collect()
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<AppointmentStatus>()
            .map(Self::Only)
            .map_err(|_| UnknownVariant {
                kind: "StatusFilter",
                value: s.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointment::fixtures::appointment;

    fn mixed() -> Vec<Appointment> {
        vec![
            appointment("1", AppointmentStatus::Pending),
            appointment("2", AppointmentStatus::Accepted),
            appointment("3", AppointmentStatus::Rejected),
        ]
    }

    #[test]
    fn pending_filter_yields_one() {
        let list = mixed();
        let pending = StatusFilter::Only(AppointmentStatus::Pending).apply(&list);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id.as_str(), "1");
    }

    #[test]
    fn all_filter_yields_everything() {
        assert_eq!(StatusFilter::All.apply(&mixed()).len(), 3);
    }

    #[test]
    fn parses_filter_names() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Rejected".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(AppointmentStatus::Rejected)
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }
}
