//! Wire types for the hospital management API.
//!
//! The remote server owns every record; this crate only holds transient,
//! session-scoped copies fetched on demand. Denormalized `*_name` fields
//! arrive read-only from the API and are kept for display; relations are
//! always resolved through the integer ids.

pub mod appointment;
pub mod bed;
pub mod billing;
pub mod doctor;
pub mod enums;
pub mod medical_record;
pub mod medicine;
pub mod operations;
pub mod patient;
pub mod user;

pub use appointment::{Appointment, NewAppointment};
pub use bed::Bed;
pub use billing::{Bill, BillMedicine, NewBill, NewBillMedicine};
pub use doctor::Doctor;
pub use enums::{AppointmentStatus, BedStatus, BillStatus, EmergencyStatus, Role};
pub use medical_record::{MedicalRecord, NewMedicalRecord, NewPrescription, Prescription};
pub use medicine::Medicine;
pub use operations::{EmergencyCase, InventoryItem};
pub use patient::{generate_medical_id, NewPatientProfile, Patient};
pub use user::{NewUser, User};

/// Errors from model-level parsing (enum strings off the wire).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },
}
