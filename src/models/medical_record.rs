use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: i64,
    pub patient: i64,
    pub doctor: i64,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub doctor_name: String,
    #[serde(default)]
    pub appointment: Option<i64>,
    #[serde(default)]
    pub diagnosis: String,
    #[serde(default)]
    pub treatment: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: i64,
    pub medical_record: i64,
    /// Medicine catalogue id.
    pub medicine: i64,
    #[serde(default)]
    pub medicine_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub instructions: String,
}

/// Payload for `medical-records/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewMedicalRecord {
    pub patient: i64,
    pub doctor: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<i64>,
    pub diagnosis: String,
    pub treatment: String,
    pub notes: String,
}

/// Payload for `prescriptions/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPrescription {
    pub medical_record: i64,
    pub medicine: i64,
    pub quantity: u32,
    pub dosage: String,
    pub duration: String,
    pub instructions: String,
}
