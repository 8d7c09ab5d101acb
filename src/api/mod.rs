//! Access to the hospital management REST API.
//!
//! Every workflow talks to the server through the [`HospitalApi`] trait so
//! the orchestration logic can be exercised against an in-memory double in
//! tests. [`rest::RestClient`] is the production implementation.

pub mod rest;

#[cfg(test)]
pub mod memory;

use crate::models::{
    Appointment, AppointmentStatus, Bed, Bill, Doctor, EmergencyCase, InventoryItem,
    MedicalRecord, Medicine, NewAppointment, NewBill, NewMedicalRecord, NewPatientProfile,
    NewPrescription, NewUser, Patient, Prescription, User,
};

/// Errors from talking to the hospital server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Cannot reach the hospital server at {0}. Is it running?")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    Transport(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse server response: {0}")]
    ResponseParsing(String),

    #[error("Not logged in")]
    Unauthenticated,
}

/// The operations the workflows need from the server.
///
/// Collection calls return full lists; the server does not paginate and
/// visibility filtering happens client-side by id.
#[allow(async_fn_in_trait)]
pub trait HospitalApi {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError>;
    async fn list_patients(&self) -> Result<Vec<Patient>, ApiError>;
    async fn list_beds(&self) -> Result<Vec<Bed>, ApiError>;
    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError>;
    async fn list_bills(&self) -> Result<Vec<Bill>, ApiError>;
    async fn list_medical_records(&self) -> Result<Vec<MedicalRecord>, ApiError>;
    async fn list_medicines(&self) -> Result<Vec<Medicine>, ApiError>;
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ApiError>;
    async fn list_emergencies(&self) -> Result<Vec<EmergencyCase>, ApiError>;

    async fn get_appointment(&self, id: i64) -> Result<Appointment, ApiError>;

    async fn create_user(&self, user: &NewUser) -> Result<User, ApiError>;
    async fn create_patient(&self, profile: &NewPatientProfile) -> Result<Patient, ApiError>;
    async fn create_appointment(&self, appt: &NewAppointment) -> Result<Appointment, ApiError>;
    async fn create_bill(&self, bill: &NewBill) -> Result<Bill, ApiError>;
    async fn create_medical_record(
        &self,
        record: &NewMedicalRecord,
    ) -> Result<MedicalRecord, ApiError>;
    async fn create_prescription(
        &self,
        prescription: &NewPrescription,
    ) -> Result<Prescription, ApiError>;

    async fn set_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError>;
    async fn set_appointment_notes(&self, id: i64, notes: &str) -> Result<Appointment, ApiError>;

    /// Server-mediated assignment. The server re-checks occupancy and
    /// rejects a patient who already holds an occupied bed.
    async fn assign_bed(&self, bed_id: i64, patient_id: i64) -> Result<Bed, ApiError>;
    async fn release_bed(&self, bed_id: i64) -> Result<Bed, ApiError>;

    async fn mark_bill_paid(&self, bill_id: i64) -> Result<Bill, ApiError>;
}
