use serde::{Deserialize, Serialize};

use super::enums::BedStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bed {
    pub id: i64,
    pub bed_number: String,
    pub ward: String,
    pub status: BedStatus,
    /// Patient profile id when occupied.
    #[serde(default)]
    pub patient: Option<i64>,
    #[serde(default)]
    pub patient_name: Option<String>,
}

impl Bed {
    pub fn is_available(&self) -> bool {
        self.status == BedStatus::Available
    }

    /// "12 - General Ward", the form used in notes annotations and errors.
    pub fn label(&self) -> String {
        format!("{} - {}", self.bed_number, self.ward)
    }
}
