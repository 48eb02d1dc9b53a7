use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A wire string that matches no variant of the named enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} value: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Macro to generate a wire enum with as_str + FromStr + serde via the string form.
///
/// The first literal is the canonical wire value; any `| "alias"` literals are
/// accepted on input only.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal $(| $alias:literal)*),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($s $(| $alias)* => Ok(Self::$variant)),+,
                    _ => Err(UnknownVariant {
                        kind: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(Role {
    Owner => "user" | "owner",
    Veterinarian => "vet" | "veterinarian",
});

str_enum!(AppointmentStatus {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
});

impl Role {
    /// Human-facing name of the role.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Owner => "Dog Owner",
            Self::Veterinarian => "Veterinarian",
        }
    }
}

impl AppointmentStatus {
    /// Accepted and rejected are final.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The only legal moves are out of `Pending` into a terminal state.
    pub fn can_transition_to(&self, next: Self) -> bool {
        !self.is_terminal() && next.is_terminal()
    }

    /// Capitalized form for status badges.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }
}
