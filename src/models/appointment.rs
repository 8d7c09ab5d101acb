use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    /// Patient profile id (not the user id).
    pub patient: i64,
    pub doctor: i64,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub doctor_name: String,
    pub appointment_date: NaiveDateTime,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl Appointment {
    /// Upcoming means strictly in the future and still on the calendar.
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.appointment_date > now
            && matches!(
                self.status,
                AppointmentStatus::Requested
                    | AppointmentStatus::Scheduled
                    | AppointmentStatus::Confirmed
            )
    }

    pub fn is_today(&self, now: NaiveDateTime) -> bool {
        self.appointment_date.date() == now.date()
    }
}

/// Payload for `appointments/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub patient: i64,
    pub doctor: i64,
    pub appointment_date: NaiveDateTime,
    pub notes: String,
    pub status: AppointmentStatus,
}

impl NewAppointment {
    pub fn new(
        patient: i64,
        doctor: i64,
        appointment_date: NaiveDateTime,
        notes: String,
        status: AppointmentStatus,
    ) -> Self {
        Self {
            patient,
            doctor,
            appointment_date,
            notes,
            status,
        }
    }
}

pub fn now_naive() -> NaiveDateTime {
    Utc::now().naive_utc()
}
