//! Bed assignment with the one-occupied-bed-per-patient rule.
//!
//! The server enforces the rule on its `assign_patient` action; the
//! client prechecks the same condition so the user sees which bed blocks
//! the assignment before any request is made.

use tracing::info;

use super::WorkflowError;
use crate::api::HospitalApi;
use crate::models::Bed;

/// Beds currently open for assignment.
pub fn available(beds: &[Bed]) -> Vec<&Bed> {
    beds.iter().filter(|b| b.is_available()).collect()
}

/// The occupied bed a patient currently holds, if any.
pub fn occupied_bed_of(beds: &[Bed], patient_id: i64) -> Option<&Bed> {
    beds.iter()
        .find(|b| !b.is_available() && b.patient == Some(patient_id))
}

/// Assign `patient_id` to `bed_id`.
///
/// Fails with [`WorkflowError::BedConflict`] naming the blocking bed when
/// the patient already occupies a different bed; reassigning the bed they
/// already hold goes through. The server re-checks on its side, so a race
/// between two clients still cannot double-assign.
pub async fn assign<A: HospitalApi>(
    api: &A,
    bed_id: i64,
    patient_id: i64,
) -> Result<Bed, WorkflowError> {
    let beds = api.list_beds().await?;
    if let Some(held) = occupied_bed_of(&beds, patient_id) {
        if held.id != bed_id {
            return Err(WorkflowError::BedConflict {
                bed_number: held.bed_number.clone(),
                ward: held.ward.clone(),
            });
        }
    }
    if !beds.iter().any(|b| b.id == bed_id) {
        return Err(WorkflowError::BedNotFound { id: bed_id });
    }

    let bed = api.assign_bed(bed_id, patient_id).await?;
    info!(bed = %bed.label(), patient_id, "bed assigned");
    Ok(bed)
}

/// Release a bed back to the available pool. Idempotent on the server.
pub async fn release<A: HospitalApi>(api: &A, bed_id: i64) -> Result<Bed, WorkflowError> {
    let bed = api.release_bed(bed_id).await?;
    info!(bed = %bed.label(), "bed released");
    Ok(bed)
}
