//! Bill drafting, payment and visibility.
//!
//! Totals follow the server's formula: 18% GST on the sum of doctor fee,
//! room charge and extended medicine lines, rounded to two decimals. The
//! draft computes the same numbers client-side so the preview matches
//! what the server will store.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use super::WorkflowError;
use crate::api::HospitalApi;
use crate::models::{Bill, NewBill, NewBillMedicine, Patient};
use crate::receipt::{self, Receipt};

/// GST applied to every bill.
pub const TAX_RATE: f64 = 0.18;

/// Round to two decimals, the precision bills are stored at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A medicine line on a draft bill.
#[derive(Debug, Clone)]
pub struct MedicineLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl MedicineLine {
    pub fn total(&self) -> f64 {
        round2(f64::from(self.quantity) * self.unit_price)
    }
}

/// An in-progress bill, edited locally until submitted.
#[derive(Debug, Clone)]
pub struct BillDraft {
    pub patient: i64,
    pub description: String,
    pub due_date: NaiveDate,
    pub doctor_fee: f64,
    pub room_charge: f64,
    pub lines: Vec<MedicineLine>,
}

impl BillDraft {
    pub fn new(patient: i64, description: String, due_date: NaiveDate) -> Self {
        Self {
            patient,
            description,
            due_date,
            doctor_fee: 0.0,
            room_charge: 0.0,
            lines: Vec::new(),
        }
    }

    pub fn add_line(&mut self, name: &str, quantity: u32, unit_price: f64) {
        self.lines.push(MedicineLine {
            name: name.to_string(),
            quantity,
            unit_price,
        });
    }

    pub fn remove_line(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    pub fn set_quantity(&mut self, index: usize, quantity: u32) {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = quantity;
        }
    }

    pub fn set_unit_price(&mut self, index: usize, unit_price: f64) {
        if let Some(line) = self.lines.get_mut(index) {
            line.unit_price = unit_price;
        }
    }

    /// Lines that would actually be billed. Empty names and zeroed
    /// quantities or prices are edit leftovers, not charges.
    fn sanitized_lines(&self) -> Vec<&MedicineLine> {
        self.lines
            .iter()
            .filter(|l| !l.name.trim().is_empty() && l.quantity > 0 && l.unit_price > 0.0)
            .collect()
    }

    pub fn medicine_total(&self) -> f64 {
        round2(self.sanitized_lines().iter().map(|l| l.total()).sum())
    }

    pub fn subtotal(&self) -> f64 {
        round2(self.doctor_fee + self.room_charge + self.medicine_total())
    }

    pub fn tax(&self) -> f64 {
        round2(self.subtotal() * TAX_RATE)
    }

    pub fn total(&self) -> f64 {
        round2(self.subtotal() * (1.0 + TAX_RATE))
    }

    /// Submit the draft. The server owns the stored totals.
    pub async fn submit<A: HospitalApi>(&self, api: &A) -> Result<Bill, WorkflowError> {
        let medicines = self
            .sanitized_lines()
            .into_iter()
            .map(|l| NewBillMedicine {
                name: l.name.clone(),
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect();
        let bill = api
            .create_bill(&NewBill {
                patient: self.patient,
                description: self.description.clone(),
                due_date: self.due_date,
                doctor_fee: self.doctor_fee,
                room_charge: self.room_charge,
                medicines,
            })
            .await?;
        info!(id = bill.id, total = bill.total_amount, "bill created");
        Ok(bill)
    }
}

/// Settle a pending bill and render its receipt.
pub async fn mark_paid<A: HospitalApi>(
    api: &A,
    bill: &Bill,
    paid_on: NaiveDateTime,
) -> Result<(Bill, Receipt), WorkflowError> {
    if !bill.is_pending() {
        return Err(WorkflowError::BillNotPending {
            id: bill.id,
            status: bill.status,
        });
    }
    let paid = api.mark_bill_paid(bill.id).await?;
    info!(id = paid.id, "bill paid");
    let receipt = receipt::render(&paid, paid.paid_date.unwrap_or(paid_on));
    Ok((paid, receipt))
}

/// The pending bills a patient sees. Staff and admin views use the
/// unfiltered list.
pub fn pending_bills_for<'a>(bills: &'a [Bill], patient: &Patient) -> Vec<&'a Bill> {
    bills
        .iter()
        .filter(|b| b.patient == patient.id && b.is_pending())
        .collect()
}

/// A patient's settled bills, for payment history.
pub fn paid_history_for<'a>(bills: &'a [Bill], patient: &Patient) -> Vec<&'a Bill> {
    bills
        .iter()
        .filter(|b| b.patient == patient.id && !b.is_pending())
        .collect()
}
