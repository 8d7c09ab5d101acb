use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub user: User,
    pub medical_id: String,
    #[serde(default)]
    pub blood_group: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub emergency_phone: String,
    /// Advisory only; bed occupancy is the source of truth for admission.
    #[serde(default)]
    pub admitted: bool,
}

impl Patient {
    pub fn display_name(&self) -> String {
        self.user.full_name()
    }
}

/// Payload for `patients/` when staff provisions a profile inline
/// during on-behalf-of booking.
#[derive(Debug, Clone, Serialize)]
pub struct NewPatientProfile {
    pub user: i64,
    pub medical_id: String,
    pub blood_group: String,
    pub allergies: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
}

/// Medical id format used everywhere a profile is provisioned client-side:
/// `P` + zero-padded numeric user id.
pub fn generate_medical_id(user_id: i64) -> String {
    format!("P{user_id:04}")
}
