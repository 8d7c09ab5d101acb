//! Consultation outcomes: medical records and prescriptions.

use tracing::{info, warn};

use super::WorkflowError;
use crate::api::HospitalApi;
use crate::models::{
    Appointment, AppointmentStatus, MedicalRecord, NewMedicalRecord, NewPrescription,
};

#[derive(Debug, Clone)]
pub struct PrescriptionEntry {
    /// Medicine catalogue id.
    pub medicine: i64,
    pub quantity: u32,
    pub dosage: String,
    pub duration: String,
    pub instructions: String,
}

/// What the doctor records at the end of a consultation.
#[derive(Debug, Clone)]
pub struct ConsultationNote {
    pub diagnosis: String,
    pub treatment: String,
    pub notes: String,
    pub prescriptions: Vec<PrescriptionEntry>,
}

/// Record a consultation against an in-progress appointment.
///
/// The record is created first, then prescriptions one by one. A failed
/// prescription does not roll back the record; the error surfaces after
/// the successful ones are in place.
pub async fn record_consultation<A: HospitalApi>(
    api: &A,
    appointment: &Appointment,
    doctor_id: i64,
    note: &ConsultationNote,
) -> Result<MedicalRecord, WorkflowError> {
    if appointment.status != AppointmentStatus::InProgress {
        return Err(WorkflowError::ConsultationNotInProgress {
            id: appointment.id,
            status: appointment.status,
        });
    }

    let record = api
        .create_medical_record(&NewMedicalRecord {
            patient: appointment.patient,
            doctor: doctor_id,
            appointment: Some(appointment.id),
            diagnosis: note.diagnosis.clone(),
            treatment: note.treatment.clone(),
            notes: note.notes.clone(),
        })
        .await?;
    info!(id = record.id, appointment = appointment.id, "medical record created");

    for entry in &note.prescriptions {
        if let Err(e) = api
            .create_prescription(&NewPrescription {
                medical_record: record.id,
                medicine: entry.medicine,
                quantity: entry.quantity,
                dosage: entry.dosage.clone(),
                duration: entry.duration.clone(),
                instructions: entry.instructions.clone(),
            })
            .await
        {
            warn!(record = record.id, error = %e, "prescription failed");
            return Err(e.into());
        }
    }

    Ok(record)
}
