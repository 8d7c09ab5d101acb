use super::ModelError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + Display + std::str::FromStr pattern.
/// Serde uses the same snake_case strings the API sends.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
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
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Role {
    Admin => "admin",
    Doctor => "doctor",
    Staff => "staff",
    Patient => "patient",
});

str_enum!(AppointmentStatus {
    Requested => "requested",
    Scheduled => "scheduled",
    Confirmed => "confirmed",
    InProgress => "in_progress",
    Completed => "completed",
    Cancelled => "cancelled",
});

str_enum!(BedStatus {
    Available => "available",
    Occupied => "occupied",
    Maintenance => "maintenance",
});

str_enum!(BillStatus {
    Pending => "pending",
    Paid => "paid",
    Overdue => "overdue",
});

str_enum!(EmergencyStatus {
    Active => "active",
    Resolved => "resolved",
});

impl AppointmentStatus {
    /// Completed and cancelled appointments never move again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The forward-only transition graph:
    /// requested → scheduled/confirmed → in_progress → completed,
    /// with cancellation reachable from any non-terminal state.
    /// `requested` only advances through staff approval.
    pub fn can_advance_to(&self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        if next == Cancelled {
            return !self.is_terminal();
        }
        matches!(
            (self, next),
            (Requested, Scheduled)
                | (Requested, Confirmed)
                | (Scheduled, Confirmed)
                | (Scheduled, InProgress)
                | (Confirmed, InProgress)
                | (InProgress, Completed)
        )
    }

    /// Every status a UI may legally offer from the current one.
    pub fn legal_transitions(&self) -> Vec<AppointmentStatus> {
        use AppointmentStatus::*;
        [Requested, Scheduled, Confirmed, InProgress, Completed, Cancelled]
            .into_iter()
            .filter(|next| self.can_advance_to(*next))
            .collect()
    }
}
