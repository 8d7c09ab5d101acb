//! Appointment booking, approval and status flows.
//!
//! Two booking paths share the bed-request convention: patients book for
//! themselves (status starts at `requested`, pending staff approval) and
//! staff book on a patient's behalf (status starts at `scheduled`,
//! optionally provisioning the patient account inline). Bed assignment is
//! best-effort in both paths: a booking never fails because a bed could
//! not be placed, the outcome is reported instead.

use chrono::NaiveDateTime;
use tracing::{info, warn};

use super::{annotations, beds, WorkflowError};
use crate::api::HospitalApi;
use crate::models::{
    generate_medical_id, Appointment, AppointmentStatus, Bed, NewAppointment, NewPatientProfile,
    NewUser, Patient, Role, User,
};

/// Intake details a patient supplies when booking.
///
/// Everything lands in the appointment notes; the server has no
/// structured fields for these.
#[derive(Debug, Clone, Default)]
pub struct MedicalIntake {
    pub symptoms: String,
    pub age: String,
    pub phone: String,
    pub address: String,
    pub blood_group: String,
    pub allergies: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub current_medications: String,
}

impl MedicalIntake {
    /// Flatten the intake into the notes format staff expect, ending with
    /// the bed-request marker when asked for.
    pub fn compose_notes(&self, request_bed: bool) -> String {
        let mut notes = self.symptoms.trim().to_string();
        let labeled = [
            ("Age", &self.age),
            ("Phone", &self.phone),
            ("Address", &self.address),
            ("Blood Group", &self.blood_group),
            ("Allergies", &self.allergies),
            ("Emergency Contact", &self.emergency_contact),
            ("Emergency Phone", &self.emergency_phone),
            ("Current Medications", &self.current_medications),
        ];
        for (label, value) in labeled {
            let value = value.trim();
            if !value.is_empty() {
                notes.push_str(&format!("\n{label}: {value}"));
            }
        }
        if request_bed {
            notes.push('\n');
            notes.push_str(annotations::BED_REQUESTED);
        }
        notes
    }
}

/// How the bed side of a booking or approval ended.
#[derive(Debug, Clone)]
pub enum BedOutcome {
    /// No bed was asked for.
    NotRequested,
    /// A bed was requested without picking one; placement waits for
    /// approval, where the request marker in the notes is honored.
    Deferred,
    Assigned(Bed),
    /// A bed was requested but none is free; the request marker stays in
    /// the notes for a later pass.
    NoneAvailable,
    /// Assignment was attempted and failed; the appointment stands.
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PatientBooking {
    pub appointment: Appointment,
    pub bed: BedOutcome,
}

/// Book an appointment as the logged-in patient.
///
/// The booking starts at `requested` and waits for staff approval. When
/// `selected_bed` names a bed and a bed was requested, assignment is
/// attempted immediately; otherwise approval handles it.
pub async fn book_as_patient<A: HospitalApi>(
    api: &A,
    user: &User,
    doctor_id: i64,
    appointment_date: NaiveDateTime,
    intake: &MedicalIntake,
    request_bed: bool,
    selected_bed: Option<i64>,
) -> Result<PatientBooking, WorkflowError> {
    let patients = api.list_patients().await?;
    let patient = patients
        .iter()
        .find(|p| p.user.id == user.id)
        .ok_or(WorkflowError::PatientProfileNotFound { user_id: user.id })?;

    let notes = intake.compose_notes(request_bed);
    let appointment = api
        .create_appointment(&NewAppointment::new(
            patient.id,
            doctor_id,
            appointment_date,
            notes,
            AppointmentStatus::Requested,
        ))
        .await?;
    info!(id = appointment.id, patient = patient.id, "appointment requested");

    let bed = match (request_bed, selected_bed) {
        (false, _) => BedOutcome::NotRequested,
        (true, None) => BedOutcome::Deferred,
        (true, Some(bed_id)) => try_assign_and_annotate(api, &appointment, bed_id, patient.id).await,
    };

    Ok(PatientBooking { appointment, bed })
}

/// A patient reference for staff booking: an existing profile or a new
/// account provisioned inline.
#[derive(Debug, Clone)]
pub enum PatientRef {
    Existing(i64),
    New(NewPatientIntake),
}

#[derive(Debug, Clone)]
pub struct NewPatientIntake {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub blood_group: String,
    pub allergies: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
}

#[derive(Debug, Clone)]
pub struct StaffBookingRequest {
    pub patient: PatientRef,
    pub doctor: i64,
    pub appointment_date: NaiveDateTime,
    pub notes: String,
    pub selected_bed: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct StaffBooking {
    pub appointment: Appointment,
    /// Present when the booking provisioned a new patient account.
    pub created_patient: Option<Patient>,
    pub bed: BedOutcome,
}

/// Book on a patient's behalf as staff.
///
/// Staff bookings skip the approval queue and start at `scheduled`.
/// There is no rollback across the create-user/create-patient/create-
/// appointment sequence; a partial failure surfaces the error and leaves
/// the earlier records in place for manual follow-up.
pub async fn book_as_staff<A: HospitalApi>(
    api: &A,
    request: &StaffBookingRequest,
) -> Result<StaffBooking, WorkflowError> {
    let (patient_id, created_patient) = match &request.patient {
        PatientRef::Existing(id) => (*id, None),
        PatientRef::New(intake) => {
            let user = api
                .create_user(&NewUser {
                    username: intake.email.clone(),
                    email: intake.email.clone(),
                    first_name: intake.first_name.clone(),
                    last_name: intake.last_name.clone(),
                    role: Role::Patient,
                    password: None,
                    phone: intake.phone.clone(),
                    address: String::new(),
                    date_of_birth: None,
                })
                .await?;
            let patient = api
                .create_patient(&NewPatientProfile {
                    user: user.id,
                    medical_id: generate_medical_id(user.id),
                    blood_group: intake.blood_group.clone(),
                    allergies: intake.allergies.clone(),
                    emergency_contact: intake.emergency_contact.clone(),
                    emergency_phone: intake.emergency_phone.clone(),
                })
                .await?;
            info!(patient = patient.id, medical_id = %patient.medical_id, "patient provisioned");
            (patient.id, Some(patient))
        }
    };

    let appointment = api
        .create_appointment(&NewAppointment::new(
            patient_id,
            request.doctor,
            request.appointment_date,
            request.notes.clone(),
            AppointmentStatus::Scheduled,
        ))
        .await?;
    info!(id = appointment.id, patient = patient_id, "appointment scheduled by staff");

    let bed = match request.selected_bed {
        None => BedOutcome::NotRequested,
        Some(bed_id) => try_assign_and_annotate(api, &appointment, bed_id, patient_id).await,
    };

    Ok(StaffBooking {
        appointment,
        created_patient,
        bed,
    })
}

#[derive(Debug, Clone)]
pub struct Approval {
    pub appointment: Appointment,
    pub bed: BedOutcome,
}

/// Approve a patient-requested appointment.
///
/// Only `requested` appointments can be approved. When the notes carry a
/// bed request, the first available bed is assigned; if none is free the
/// request marker stays for a later pass. Approval always confirms the
/// appointment regardless of the bed outcome.
pub async fn approve<A: HospitalApi>(api: &A, appointment_id: i64) -> Result<Approval, WorkflowError> {
    let appointment = api.get_appointment(appointment_id).await?;
    if appointment.status != AppointmentStatus::Requested {
        return Err(WorkflowError::NotAwaitingApproval {
            id: appointment_id,
            status: appointment.status,
        });
    }

    let bed = if annotations::bed_requested(&appointment.notes) {
        let all = api.list_beds().await?;
        match beds::available(&all).first() {
            Some(first) => try_assign_and_annotate(api, &appointment, first.id, appointment.patient).await,
            None => {
                warn!(id = appointment_id, "bed requested but none available");
                BedOutcome::NoneAvailable
            }
        }
    } else {
        BedOutcome::NotRequested
    };

    let appointment = api
        .set_appointment_status(appointment_id, AppointmentStatus::Confirmed)
        .await?;
    info!(id = appointment.id, "appointment approved");

    Ok(Approval { appointment, bed })
}

/// Move an appointment along the status graph.
///
/// The transition is validated client-side first so an illegal move is
/// rejected with both states named instead of a generic server error.
pub async fn advance<A: HospitalApi>(
    api: &A,
    appointment_id: i64,
    next: AppointmentStatus,
) -> Result<Appointment, WorkflowError> {
    let appointment = api.get_appointment(appointment_id).await?;
    if !appointment.status.can_advance_to(next) {
        return Err(WorkflowError::IllegalTransition {
            from: appointment.status,
            to: next,
        });
    }
    let updated = api.set_appointment_status(appointment_id, next).await?;
    info!(id = appointment_id, from = %appointment.status, to = %next, "appointment advanced");
    Ok(updated)
}

/// Assign a specific bed in the context of an appointment, recording the
/// assignment marker in its notes.
pub async fn assign_bed_to_appointment<A: HospitalApi>(
    api: &A,
    appointment_id: i64,
    bed_id: i64,
) -> Result<Bed, WorkflowError> {
    let appointment = api.get_appointment(appointment_id).await?;
    let bed = beds::assign(api, bed_id, appointment.patient).await?;
    let notes = annotations::append_assignment(&appointment.notes, &bed);
    api.set_appointment_notes(appointment_id, &notes).await?;
    Ok(bed)
}

/// Best-effort bed placement after a booking or approval. The
/// appointment already exists, so any failure here is reported as an
/// outcome rather than an error.
async fn try_assign_and_annotate<A: HospitalApi>(
    api: &A,
    appointment: &Appointment,
    bed_id: i64,
    patient_id: i64,
) -> BedOutcome {
    match beds::assign(api, bed_id, patient_id).await {
        Ok(bed) => {
            let notes = annotations::append_assignment(&appointment.notes, &bed);
            match api.set_appointment_notes(appointment.id, &notes).await {
                Ok(_) => BedOutcome::Assigned(bed),
                Err(e) => {
                    warn!(id = appointment.id, error = %e, "bed assigned but notes update failed");
                    BedOutcome::Assigned(bed)
                }
            }
        }
        Err(e) => {
            warn!(id = appointment.id, error = %e, "bed assignment failed");
            BedOutcome::Failed(e.to_string())
        }
    }
}
