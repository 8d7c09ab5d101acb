use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::BillStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    pub id: i64,
    /// Patient profile id.
    pub patient: i64,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub doctor_fee: f64,
    #[serde(default)]
    pub room_charge: f64,
    #[serde(default)]
    pub medicine_total: f64,
    pub total_amount: f64,
    pub status: BillStatus,
    #[serde(default)]
    pub paid_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub medicines: Vec<BillMedicine>,
}

impl Bill {
    pub fn is_pending(&self) -> bool {
        self.status == BillStatus::Pending
    }
}

/// A medicine line as the server returns it, prices already extended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillMedicine {
    pub medicine_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Payload for `billings/`. The server computes the medicine subtotal,
/// tax and grand total from these inputs.
#[derive(Debug, Clone, Serialize)]
pub struct NewBill {
    pub patient: i64,
    pub description: String,
    pub due_date: NaiveDate,
    pub doctor_fee: f64,
    pub room_charge: f64,
    pub medicines: Vec<NewBillMedicine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBillMedicine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_server_shape() {
        let bill: Bill = serde_json::from_str(
            r#"{
                "id": 5,
                "patient": 3,
                "patient_name": "Asha Rao",
                "description": "Consultation",
                "due_date": "2026-04-01",
                "doctor_fee": 500.0,
                "room_charge": 1000.0,
                "medicine_total": 100.0,
                "total_amount": 1888.0,
                "status": "pending",
                "medicines": [
                    {"medicine_name": "Paracetamol", "quantity": 2,
                     "unit_price": 50.0, "total_price": 100.0}
                ]
            }"#,
        )
        .unwrap();
        assert!(bill.is_pending());
        assert_eq!(bill.medicines.len(), 1);
        assert_eq!(bill.total_amount, 1888.0);
        assert!(bill.paid_date.is_none());
    }
}
