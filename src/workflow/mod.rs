//! Workflow orchestration over the hospital API.
//!
//! These modules encode the multi-step flows the UI drives: booking with
//! optional bed requests, staff approval, bed assignment with the
//! one-occupied-bed-per-patient rule, billing with GST totals, and the
//! per-role dashboard aggregations. All of them are generic over
//! [`HospitalApi`](crate::api::HospitalApi).

pub mod annotations;
pub mod appointments;
pub mod beds;
pub mod billing;
pub mod dashboard;
pub mod records;

use crate::api::ApiError;
use crate::models::AppointmentStatus;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No patient profile found for user {user_id}")]
    PatientProfileNotFound { user_id: i64 },

    #[error("Patient is already assigned to bed {bed_number} in {ward}. Please release that bed first.")]
    BedConflict { bed_number: String, ward: String },

    #[error("Bed {id} not found")]
    BedNotFound { id: i64 },

    #[error("Appointment {id} is {status}, not awaiting approval")]
    NotAwaitingApproval { id: i64, status: AppointmentStatus },

    #[error("Cannot move appointment from {from} to {to}")]
    IllegalTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Bill {id} is {status}, only pending bills can be paid")]
    BillNotPending {
        id: i64,
        status: crate::models::BillStatus,
    },

    #[error("Appointment {id} is {status}, consultation requires in_progress")]
    ConsultationNotInProgress { id: i64, status: AppointmentStatus },
}
