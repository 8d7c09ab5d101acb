//! Per-role dashboard aggregations.
//!
//! Dashboards are pure functions over already-fetched collections so the
//! UI can refresh them without extra round trips. All patient filtering
//! is by profile id.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{
    Appointment, AppointmentStatus, Bed, BedStatus, Bill, BillStatus, Doctor, EmergencyCase,
    EmergencyStatus, InventoryItem, MedicalRecord, Patient,
};

#[derive(Debug, Clone)]
pub struct PatientDashboard {
    pub appointment_count: usize,
    pub upcoming_appointments: Vec<Appointment>,
    pub bill_count: usize,
    pub pending_bills: Vec<Bill>,
    pub record_count: usize,
    pub current_bed: Option<Bed>,
}

impl PatientDashboard {
    pub fn build(
        patient: &Patient,
        appointments: &[Appointment],
        bills: &[Bill],
        records: &[MedicalRecord],
        beds: &[Bed],
        now: NaiveDateTime,
    ) -> Self {
        let appointment_count = appointments.iter().filter(|a| a.patient == patient.id).count();
        let mut upcoming: Vec<Appointment> = appointments
            .iter()
            .filter(|a| a.patient == patient.id && a.is_upcoming(now))
            .cloned()
            .collect();
        upcoming.sort_by_key(|a| a.appointment_date);

        let bill_count = bills.iter().filter(|b| b.patient == patient.id).count();
        let pending_bills = bills
            .iter()
            .filter(|b| b.patient == patient.id && b.is_pending())
            .cloned()
            .collect();

        let record_count = records.iter().filter(|r| r.patient == patient.id).count();

        let current_bed = beds
            .iter()
            .find(|b| b.status == BedStatus::Occupied && b.patient == Some(patient.id))
            .cloned();

        Self {
            appointment_count,
            upcoming_appointments: upcoming,
            bill_count,
            pending_bills,
            record_count,
            current_bed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StaffDashboard {
    pub total_appointments: usize,
    pub pending_approvals: usize,
    pub today_appointments: usize,
    pub available_beds: usize,
    pub occupied_beds: usize,
    pub active_emergencies: usize,
    pub low_stock_items: usize,
    pub pending_bills: usize,
}

impl StaffDashboard {
    pub fn build(
        appointments: &[Appointment],
        beds: &[Bed],
        emergencies: &[EmergencyCase],
        inventory: &[InventoryItem],
        bills: &[Bill],
        now: NaiveDateTime,
    ) -> Self {
        Self {
            total_appointments: appointments.len(),
            pending_approvals: appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Requested)
                .count(),
            today_appointments: appointments.iter().filter(|a| a.is_today(now)).count(),
            available_beds: beds.iter().filter(|b| b.is_available()).count(),
            occupied_beds: beds
                .iter()
                .filter(|b| b.status == BedStatus::Occupied)
                .count(),
            active_emergencies: emergencies
                .iter()
                .filter(|e| e.status == EmergencyStatus::Active)
                .count(),
            low_stock_items: inventory.iter().filter(|i| i.is_low_stock()).count(),
            pending_bills: bills
                .iter()
                .filter(|b| b.status == BillStatus::Pending)
                .count(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DoctorDashboard {
    pub today_appointments: Vec<Appointment>,
    pub pending_count: usize,
    pub distinct_patients: usize,
    pub completed_count: usize,
}

impl DoctorDashboard {
    pub fn build(doctor: &Doctor, appointments: &[Appointment], now: NaiveDateTime) -> Self {
        let mine: Vec<&Appointment> = appointments
            .iter()
            .filter(|a| a.doctor == doctor.id)
            .collect();

        let mut today: Vec<Appointment> = mine
            .iter()
            .filter(|a| a.is_today(now) && !a.status.is_terminal())
            .map(|a| (*a).clone())
            .collect();
        today.sort_by_key(|a| a.appointment_date);

        let distinct_patients = mine.iter().map(|a| a.patient).collect::<HashSet<_>>().len();

        Self {
            today_appointments: today,
            pending_count: mine
                .iter()
                .filter(|a| {
                    matches!(
                        a.status,
                        AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
                    )
                })
                .count(),
            distinct_patients,
            completed_count: mine
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
                .count(),
        }
    }
}

/// Appointments for one calendar day.
#[derive(Debug, Clone)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
}

/// Split appointments into upcoming and history, each grouped by day in
/// ascending date order.
pub fn group_by_date(
    appointments: &[Appointment],
    now: NaiveDateTime,
) -> (Vec<DateGroup>, Vec<DateGroup>) {
    let mut upcoming: BTreeMap<NaiveDate, Vec<Appointment>> = BTreeMap::new();
    let mut history: BTreeMap<NaiveDate, Vec<Appointment>> = BTreeMap::new();

    for appt in appointments {
        let bucket = if appt.appointment_date >= now {
            &mut upcoming
        } else {
            &mut history
        };
        bucket
            .entry(appt.appointment_date.date())
            .or_default()
            .push(appt.clone());
    }

    let collect = |map: BTreeMap<NaiveDate, Vec<Appointment>>| {
        map.into_iter()
            .map(|(date, mut appointments)| {
                appointments.sort_by_key(|a| a.appointment_date);
                DateGroup { date, appointments }
            })
            .collect()
    };

    (collect(upcoming), collect(history))
}
