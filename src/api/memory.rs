//! In-memory [`HospitalApi`] double for workflow tests.
//!
//! Mirrors the server behaviors the workflows depend on: denormalized
//! names on creation, the one-occupied-bed-per-patient rejection, bill
//! total computation, and paid-date stamping.

use std::sync::Mutex;

use chrono::Utc;

use super::{ApiError, HospitalApi};
use crate::models::{
    Appointment, AppointmentStatus, Bed, BedStatus, Bill, BillMedicine, BillStatus, Doctor,
    EmergencyCase, InventoryItem, MedicalRecord, Medicine, NewAppointment, NewBill,
    NewMedicalRecord, NewPatientProfile, NewPrescription, NewUser, Patient, Prescription, User,
};
use crate::workflow::billing::{round2, TAX_RATE};

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<User>,
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    beds: Vec<Bed>,
    appointments: Vec<Appointment>,
    bills: Vec<Bill>,
    records: Vec<MedicalRecord>,
    prescriptions: Vec<Prescription>,
    medicines: Vec<Medicine>,
    inventory: Vec<InventoryItem>,
    emergencies: Vec<EmergencyCase>,
}

pub struct MemoryApi {
    state: Mutex<State>,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }

    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    fn next_id(state: &mut State) -> i64 {
        state.next_id += 1;
        state.next_id
    }

    // ── Seeding ─────────────────────────────────────────────

    pub fn add_user(&self, username: &str, first: &str, last: &str, role: crate::models::Role) -> User {
        self.with(|s| {
            let user = User {
                id: Self::next_id(s),
                username: username.into(),
                email: format!("{username}@example.com"),
                first_name: first.into(),
                last_name: last.into(),
                role,
                phone: String::new(),
                address: String::new(),
                date_of_birth: None,
            };
            s.users.push(user.clone());
            user
        })
    }

    pub fn add_patient(&self, user: User) -> Patient {
        self.with(|s| {
            let id = Self::next_id(s);
            let patient = Patient {
                id,
                medical_id: crate::models::generate_medical_id(user.id),
                user,
                blood_group: String::new(),
                allergies: String::new(),
                emergency_contact: String::new(),
                emergency_phone: String::new(),
                admitted: false,
            };
            s.patients.push(patient.clone());
            patient
        })
    }

    pub fn add_doctor(&self, user: User, specialty: &str) -> Doctor {
        self.with(|s| {
            let doctor = Doctor {
                id: Self::next_id(s),
                user,
                license_number: "LIC-0001".into(),
                specialty: specialty.into(),
                department: specialty.into(),
                available: true,
            };
            s.doctors.push(doctor.clone());
            doctor
        })
    }

    pub fn add_bed(&self, bed_number: &str, ward: &str, status: BedStatus) -> Bed {
        self.with(|s| {
            let bed = Bed {
                id: Self::next_id(s),
                bed_number: bed_number.into(),
                ward: ward.into(),
                status,
                patient: None,
                patient_name: None,
            };
            s.beds.push(bed.clone());
            bed
        })
    }

    pub fn add_medicine(&self, name: &str, unit_price: f64) -> Medicine {
        self.with(|s| {
            let medicine = Medicine {
                id: Self::next_id(s),
                name: name.into(),
                unit_price,
                description: String::new(),
            };
            s.medicines.push(medicine.clone());
            medicine
        })
    }

    pub fn add_inventory(&self, name: &str, quantity: u32, minimum_threshold: u32) -> InventoryItem {
        self.with(|s| {
            let item = InventoryItem {
                id: Self::next_id(s),
                name: name.into(),
                category: "Supplies".into(),
                quantity,
                minimum_threshold,
            };
            s.inventory.push(item.clone());
            item
        })
    }

    pub fn add_emergency(&self, description: &str, status: crate::models::EmergencyStatus) -> EmergencyCase {
        self.with(|s| {
            let case = EmergencyCase {
                id: Self::next_id(s),
                patient: None,
                patient_name: None,
                description: description.into(),
                status,
                priority: "high".into(),
            };
            s.emergencies.push(case.clone());
            case
        })
    }

    fn patient_display_name(state: &State, patient_id: i64) -> String {
        state
            .patients
            .iter()
            .find(|p| p.id == patient_id)
            .map(|p| p.display_name())
            .unwrap_or_default()
    }
}

impl Default for MemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl HospitalApi for MemoryApi {
    async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        Ok(self.with(|s| s.doctors.clone()))
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, ApiError> {
        Ok(self.with(|s| s.patients.clone()))
    }

    async fn list_beds(&self) -> Result<Vec<Bed>, ApiError> {
        Ok(self.with(|s| s.beds.clone()))
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>, ApiError> {
        Ok(self.with(|s| s.appointments.clone()))
    }

    async fn list_bills(&self) -> Result<Vec<Bill>, ApiError> {
        Ok(self.with(|s| s.bills.clone()))
    }

    async fn list_medical_records(&self) -> Result<Vec<MedicalRecord>, ApiError> {
        Ok(self.with(|s| s.records.clone()))
    }

    async fn list_medicines(&self) -> Result<Vec<Medicine>, ApiError> {
        Ok(self.with(|s| s.medicines.clone()))
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, ApiError> {
        Ok(self.with(|s| s.inventory.clone()))
    }

    async fn list_emergencies(&self) -> Result<Vec<EmergencyCase>, ApiError> {
        Ok(self.with(|s| s.emergencies.clone()))
    }

    async fn get_appointment(&self, id: i64) -> Result<Appointment, ApiError> {
        self.with(|s| {
            s.appointments
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or(ApiError::Status {
                    status: 404,
                    body: "Not found.".into(),
                })
        })
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.with(|s| {
            let created = User {
                id: Self::next_id(s),
                username: user.username.clone(),
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                role: user.role,
                phone: user.phone.clone(),
                address: user.address.clone(),
                date_of_birth: user.date_of_birth,
            };
            s.users.push(created.clone());
            Ok(created)
        })
    }

    async fn create_patient(&self, profile: &NewPatientProfile) -> Result<Patient, ApiError> {
        self.with(|s| {
            let user = s
                .users
                .iter()
                .find(|u| u.id == profile.user)
                .cloned()
                .ok_or(ApiError::Status {
                    status: 400,
                    body: "Unknown user.".into(),
                })?;
            let patient = Patient {
                id: Self::next_id(s),
                user,
                medical_id: profile.medical_id.clone(),
                blood_group: profile.blood_group.clone(),
                allergies: profile.allergies.clone(),
                emergency_contact: profile.emergency_contact.clone(),
                emergency_phone: profile.emergency_phone.clone(),
                admitted: false,
            };
            s.patients.push(patient.clone());
            Ok(patient)
        })
    }

    async fn create_appointment(&self, appt: &NewAppointment) -> Result<Appointment, ApiError> {
        self.with(|s| {
            let patient_name = Self::patient_display_name(s, appt.patient);
            let doctor_name = s
                .doctors
                .iter()
                .find(|d| d.id == appt.doctor)
                .map(|d| d.display_name())
                .unwrap_or_default();
            let created = Appointment {
                id: Self::next_id(s),
                patient: appt.patient,
                doctor: appt.doctor,
                patient_name,
                doctor_name,
                appointment_date: appt.appointment_date,
                status: appt.status,
                notes: appt.notes.clone(),
                created_at: Some(Utc::now().naive_utc()),
            };
            s.appointments.push(created.clone());
            Ok(created)
        })
    }

    async fn create_bill(&self, bill: &NewBill) -> Result<Bill, ApiError> {
        self.with(|s| {
            let medicines: Vec<BillMedicine> = bill
                .medicines
                .iter()
                .map(|m| BillMedicine {
                    medicine_name: m.name.clone(),
                    quantity: m.quantity,
                    unit_price: m.unit_price,
                    total_price: round2(f64::from(m.quantity) * m.unit_price),
                })
                .collect();
            let medicine_total = round2(medicines.iter().map(|m| m.total_price).sum());
            let subtotal = bill.doctor_fee + bill.room_charge + medicine_total;
            let total_amount = round2(subtotal * (1.0 + TAX_RATE));
            let created = Bill {
                id: Self::next_id(s),
                patient: bill.patient,
                patient_name: Self::patient_display_name(s, bill.patient),
                description: bill.description.clone(),
                due_date: bill.due_date,
                doctor_fee: bill.doctor_fee,
                room_charge: bill.room_charge,
                medicine_total,
                total_amount,
                status: BillStatus::Pending,
                paid_date: None,
                medicines,
            };
            s.bills.push(created.clone());
            Ok(created)
        })
    }

    async fn create_medical_record(
        &self,
        record: &NewMedicalRecord,
    ) -> Result<MedicalRecord, ApiError> {
        self.with(|s| {
            let created = MedicalRecord {
                id: Self::next_id(s),
                patient: record.patient,
                doctor: record.doctor,
                patient_name: Self::patient_display_name(s, record.patient),
                doctor_name: String::new(),
                appointment: record.appointment,
                diagnosis: record.diagnosis.clone(),
                treatment: record.treatment.clone(),
                notes: record.notes.clone(),
                created_at: Some(Utc::now().naive_utc()),
                prescriptions: Vec::new(),
            };
            s.records.push(created.clone());
            Ok(created)
        })
    }

    async fn create_prescription(
        &self,
        prescription: &NewPrescription,
    ) -> Result<Prescription, ApiError> {
        self.with(|s| {
            let medicine_name = s
                .medicines
                .iter()
                .find(|m| m.id == prescription.medicine)
                .map(|m| m.name.clone())
                .unwrap_or_default();
            let created = Prescription {
                id: Self::next_id(s),
                medical_record: prescription.medical_record,
                medicine: prescription.medicine,
                medicine_name,
                quantity: prescription.quantity,
                dosage: prescription.dosage.clone(),
                duration: prescription.duration.clone(),
                instructions: prescription.instructions.clone(),
            };
            s.prescriptions.push(created.clone());
            if let Some(record) = s
                .records
                .iter_mut()
                .find(|r| r.id == prescription.medical_record)
            {
                record.prescriptions.push(created.clone());
            }
            Ok(created)
        })
    }

    async fn set_appointment_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        self.with(|s| {
            let appt = s
                .appointments
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(ApiError::Status {
                    status: 404,
                    body: "Not found.".into(),
                })?;
            appt.status = status;
            Ok(appt.clone())
        })
    }

    async fn set_appointment_notes(&self, id: i64, notes: &str) -> Result<Appointment, ApiError> {
        self.with(|s| {
            let appt = s
                .appointments
                .iter_mut()
                .find(|a| a.id == id)
                .ok_or(ApiError::Status {
                    status: 404,
                    body: "Not found.".into(),
                })?;
            appt.notes = notes.to_string();
            Ok(appt.clone())
        })
    }

    async fn assign_bed(&self, bed_id: i64, patient_id: i64) -> Result<Bed, ApiError> {
        self.with(|s| {
            // The target bed is excluded from the occupancy check, so a
            // same-bed reassign succeeds.
            if let Some(held) = s.beds.iter().find(|b| {
                b.id != bed_id && b.status == BedStatus::Occupied && b.patient == Some(patient_id)
            }) {
                return Err(ApiError::Status {
                    status: 400,
                    body: format!(
                        "Patient is already assigned to bed {} in {}. Please release that bed first.",
                        held.bed_number, held.ward
                    ),
                });
            }
            let patient_name = Self::patient_display_name(s, patient_id);
            let bed = s
                .beds
                .iter_mut()
                .find(|b| b.id == bed_id)
                .ok_or(ApiError::Status {
                    status: 404,
                    body: "Not found.".into(),
                })?;
            if bed.status != BedStatus::Available && bed.patient != Some(patient_id) {
                return Err(ApiError::Status {
                    status: 400,
                    body: format!("Bed {} is not available.", bed.bed_number),
                });
            }
            bed.status = BedStatus::Occupied;
            bed.patient = Some(patient_id);
            bed.patient_name = Some(patient_name);
            Ok(bed.clone())
        })
    }

    async fn release_bed(&self, bed_id: i64) -> Result<Bed, ApiError> {
        self.with(|s| {
            let bed = s
                .beds
                .iter_mut()
                .find(|b| b.id == bed_id)
                .ok_or(ApiError::Status {
                    status: 404,
                    body: "Not found.".into(),
                })?;
            bed.status = BedStatus::Available;
            bed.patient = None;
            bed.patient_name = None;
            Ok(bed.clone())
        })
    }

    async fn mark_bill_paid(&self, bill_id: i64) -> Result<Bill, ApiError> {
        self.with(|s| {
            let bill = s
                .bills
                .iter_mut()
                .find(|b| b.id == bill_id)
                .ok_or(ApiError::Status {
                    status: 404,
                    body: "Not found.".into(),
                })?;
            bill.status = BillStatus::Paid;
            bill.paid_date = Some(Utc::now().naive_utc());
            Ok(bill.clone())
        })
    }
}
