//! Operational records surfaced on the staff dashboard.

use serde::{Deserialize, Serialize};

use super::enums::EmergencyStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub quantity: u32,
    #[serde(default)]
    pub minimum_threshold: u32,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.minimum_threshold
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyCase {
    pub id: i64,
    #[serde(default)]
    pub patient: Option<i64>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub description: String,
    pub status: EmergencyStatus,
    #[serde(default)]
    pub priority: String,
}
